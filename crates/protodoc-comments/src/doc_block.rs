//! `/** ... */` documentation blocks.

/// Sequence that would close the block early.
const BLOCK_END: &str = "*/";
/// Replacement for [`BLOCK_END`] inside block content.
const BLOCK_END_ESCAPED: &str = "*\\/";

/// Accumulates comment text and renders it as a documentation block.
///
/// Lines never contain a raw `*/`: it is escaped on the way in, so the only
/// `*/` in the rendered output is the closing fence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    lines: Vec<String>,
}

impl DocBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text`, one line per `\n`-separated segment.
    ///
    /// A single trailing newline is dropped. An empty string still adds one
    /// (empty) line.
    pub fn append(&mut self, text: &str) {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let text = text.replace(BLOCK_END, BLOCK_END_ESCAPED);
        self.lines.extend(text.split('\n').map(|line| {
            // A leading `/` would join the ` *` line prefix into `*/`.
            if line.starts_with('/') {
                format!("\\{line}")
            } else {
                line.to_string()
            }
        }));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the block with every line prefixed by `indent`.
    ///
    /// Returns an empty string for an empty block; the caller should then
    /// omit the block altogether. The closing fence has no trailing newline.
    pub fn render(&self, indent: &str) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = format!("{indent}/**\n");
        for line in &self.lines {
            out.push_str(indent);
            out.push_str(" *");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str(" */");
        out
    }
}
