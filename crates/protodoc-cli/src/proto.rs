//! Descriptor set inspection commands.
//!
//! Input is a descriptor set JSON, e.g. from
//! `buf build --as-file-descriptor-set -o descriptor.json`.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use protodoc_comments::{
    declarations, FileDescriptor, FileDescriptorSet, GeneratorInfo, SourcePath,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ProtoCommands {
    /// Print the generated-file preamble (comments + banner + directives).
    Preamble {
        /// Descriptor set JSON file.
        descriptor: PathBuf,
        /// Only this file (as named in the descriptor set).
        #[arg(long)]
        file: Option<String>,
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Print the doc block of every declaration.
    Docs {
        /// Descriptor set JSON file.
        descriptor: PathBuf,
        /// Only this file (as named in the descriptor set).
        #[arg(long)]
        file: Option<String>,
        /// Number of spaces to indent each block by.
        #[arg(long, default_value_t = 0)]
        indent: usize,
    },

    /// Print the comments attached to one declaration path as JSON.
    Comments {
        /// Descriptor set JSON file.
        descriptor: PathBuf,
        /// File the path is relative to.
        #[arg(long)]
        file: String,
        /// Declaration path, e.g. `4,0,2,1` (message 0, field 1).
        #[arg(long)]
        path: SourcePath,
    },
}

/// Generator settings; flags override values from `--config`.
#[derive(Args, Debug, Default)]
pub struct GeneratorArgs {
    /// JSON file with `name`, `version`, `parameter`, `eslint_disable`, `ts_nocheck`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Generator name shown in the banner.
    #[arg(long)]
    plugin_name: Option<String>,
    /// Generator version shown in the banner.
    #[arg(long)]
    plugin_version: Option<String>,
    /// Plugin parameter the generator was invoked with.
    #[arg(long)]
    parameter: Option<String>,
    /// Emit `/* eslint-disable */`.
    #[arg(long)]
    eslint_disable: bool,
    /// Emit `/* @ts-nocheck */`.
    #[arg(long)]
    ts_nocheck: bool,
}

impl GeneratorArgs {
    pub fn resolve(&self) -> Result<GeneratorInfo> {
        let mut info = match &self.config {
            Some(path) => GeneratorInfo::from_json_file(path)?,
            None => GeneratorInfo::new("protodoc", env!("CARGO_PKG_VERSION")),
        };
        if let Some(name) = &self.plugin_name {
            info.name = name.clone();
        }
        if let Some(version) = &self.plugin_version {
            info.version = version.clone();
        }
        if let Some(parameter) = &self.parameter {
            info.parameter = parameter.clone();
        }
        info.eslint_disable |= self.eslint_disable;
        info.ts_nocheck |= self.ts_nocheck;
        Ok(info)
    }
}

pub fn cmd_proto(command: ProtoCommands) -> Result<()> {
    match command {
        ProtoCommands::Preamble {
            descriptor,
            file,
            generator,
        } => {
            let set = read_descriptor_set(&descriptor)?;
            let generator = generator.resolve()?;
            for f in select_files(&set, file.as_deref())? {
                if file.is_none() {
                    println!("{} {}", "==>".cyan(), f.name().bold());
                }
                println!("{}", f.preamble(&generator));
            }
            Ok(())
        }
        ProtoCommands::Docs {
            descriptor,
            file,
            indent,
        } => {
            let set = read_descriptor_set(&descriptor)?;
            for f in select_files(&set, file.as_deref())? {
                println!("{} {}", "==>".cyan(), f.name().bold());
                print!("{}", render_docs(f, indent));
            }
            Ok(())
        }
        ProtoCommands::Comments {
            descriptor,
            file,
            path,
        } => {
            let set = read_descriptor_set(&descriptor)?;
            let comments = set.file(&file)?.comments(path.as_slice());
            println!("{}", serde_json::to_string_pretty(&comments)?);
            Ok(())
        }
    }
}

fn read_descriptor_set(path: &Path) -> Result<FileDescriptorSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read descriptor json: {}", path.display()))?;
    let set = FileDescriptorSet::from_json(&text)
        .with_context(|| format!("invalid descriptor set: {}", path.display()))?;
    tracing::info!(path = %path.display(), files = set.file.len(), "loaded descriptor set");
    Ok(set)
}

fn select_files<'a>(
    set: &'a FileDescriptorSet,
    name: Option<&str>,
) -> Result<Vec<&'a FileDescriptor>> {
    match name {
        Some(name) => Ok(vec![set.file(name)?]),
        None => Ok(set.file.iter().collect()),
    }
}

/// One entry per declaration: a `kind fqn path` header, then the block.
fn render_docs(file: &FileDescriptor, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut out = String::new();
    for doc in declarations(file) {
        out.push_str(&format!(
            "{indent}// {} {} {}\n",
            doc.kind.as_str(),
            doc.fqn,
            doc.path
        ));
        out.push_str(&doc.render(&indent));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET: &str = r#"{
        "file": [{
            "name": "a.proto",
            "package": "a",
            "syntax": "proto3",
            "messageType": [{"name": "A"}],
            "sourceCodeInfo": {"location": [{"path": [4, 0], "leadingComments": " An A.\n"}]}
        }, {
            "name": "b.proto"
        }]
    }"#;

    #[test]
    fn flags_override_config_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = dir.path().join("protodoc.json");
        fs::write(
            &config,
            r#"{"name": "protoc-gen-x", "version": "1.0.0", "parameter": "target=ts"}"#,
        )?;

        let args = GeneratorArgs {
            config: Some(config),
            plugin_version: Some("2.0.0".to_string()),
            ts_nocheck: true,
            ..GeneratorArgs::default()
        };
        let info = args.resolve()?;
        assert_eq!(info.name, "protoc-gen-x");
        assert_eq!(info.version, "2.0.0");
        assert_eq!(info.parameter, "target=ts");
        assert!(!info.eslint_disable);
        assert!(info.ts_nocheck);
        Ok(())
    }

    #[test]
    fn defaults_without_config() -> Result<()> {
        let info = GeneratorArgs::default().resolve()?;
        assert_eq!(info.name, "protodoc");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.parameter.is_empty());
        Ok(())
    }

    #[test]
    fn selects_named_or_all_files() -> Result<()> {
        let set = FileDescriptorSet::from_json(SET)?;
        assert_eq!(select_files(&set, None)?.len(), 2);
        let only_b = select_files(&set, Some("b.proto"))?;
        assert_eq!(only_b[0].name(), "b.proto");
        assert!(select_files(&set, Some("c.proto")).is_err());
        Ok(())
    }

    #[test]
    fn docs_output_lists_each_declaration() -> Result<()> {
        let set = FileDescriptorSet::from_json(SET)?;
        let out = render_docs(set.file("a.proto")?, 2);
        assert_eq!(
            out,
            "  // message a.A [4, 0]\n  /**\n   * An A.\n   *\n   * @generated from message a.A\n   */\n"
        );
        Ok(())
    }

    #[test]
    fn reading_a_missing_descriptor_names_the_path() {
        let err = read_descriptor_set(Path::new("/nonexistent/descriptor.json"))
            .expect_err("should error");
        assert!(format!("{err:#}").contains("/nonexistent/descriptor.json"));
    }
}
