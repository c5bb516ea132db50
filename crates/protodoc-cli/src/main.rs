//! protodoc CLI
//!
//! Inspects how the comments in a protobuf descriptor set render in generated
//! code: file preambles, per-declaration doc blocks, and raw comment lookup by
//! declaration path.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`; when it is unset
//! or unparseable the filter falls back to `protodoc=warn`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod proto;

#[derive(Parser)]
#[command(name = "protodoc")]
#[command(
    author,
    version,
    about = "Render protobuf comments the way code generators emit them"
)]
struct Cli {
    #[command(subcommand)]
    command: proto::ProtoCommands,
}

const DEFAULT_FILTER: &str = "protodoc=warn";

/// Builds the log filter from a `RUST_LOG` value, if any.
fn env_filter(spec: Option<&str>) -> EnvFilter {
    spec.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(env_filter(rust_log.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    proto::cmd_proto(cli.command)
}
