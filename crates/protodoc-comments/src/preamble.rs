//! File preamble: source comments, generation banner, tool directives.
//!
//! Layout of a preamble:
//!
//! ```text
//! // <comments attached to `syntax = ...`, e.g. a license header>
//!
//! // @generated by <name> <version>[ with parameter "<parameter>"]
//! // @generated from file <file> ([package <package>, ]syntax <syntax>)
//! /* eslint-disable */
//! /* @ts-nocheck */
//!
//! // <comments attached to `package ...`>
//! ```

use std::fmt::Write as _;

use crate::comments::CommentSet;
use crate::config::GeneratorInfo;
use crate::descriptor::Syntax;

const ESLINT_DISABLE: &str = "/* eslint-disable */\n";
const TS_NOCHECK: &str = "/* @ts-nocheck */\n";

/// Builds the header placed at the top of a generated file.
///
/// The result never ends in a newline.
pub fn make_file_preamble(
    generator: &GeneratorInfo,
    file_name: &str,
    package_name: &str,
    syntax: &Syntax,
    syntax_comments: &CommentSet,
    package_comments: &CommentSet,
) -> String {
    let mut out = String::new();
    write_leading_comments(&mut out, syntax_comments);
    write_generation_info(&mut out, generator, file_name, package_name, syntax);
    if generator.eslint_disable {
        out.push_str(ESLINT_DISABLE);
    }
    if generator.ts_nocheck {
        out.push_str(TS_NOCHECK);
    }
    out.push('\n');
    write_leading_comments(&mut out, package_comments);
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_generation_info(
    out: &mut String,
    generator: &GeneratorInfo,
    file_name: &str,
    package_name: &str,
    syntax: &Syntax,
) {
    let _ = write!(out, "// @generated by {} {}", generator.name, generator.version);
    if !generator.parameter.is_empty() {
        let _ = write!(out, " with parameter \"{}\"", generator.parameter);
    }
    out.push('\n');
    let _ = write!(out, "// @generated from file {file_name} (");
    if !package_name.is_empty() {
        let _ = write!(out, "package {package_name}, ");
    }
    let _ = writeln!(out, "syntax {syntax})");
}

/// Detached comments first, then the leading comment, each as a run of `//`
/// lines followed by a blank line.
fn write_leading_comments(out: &mut String, comments: &CommentSet) {
    for comment in &comments.leading_detached {
        write_line_comment(out, comment);
        out.push('\n');
    }
    if !comments.leading.is_empty() {
        write_line_comment(out, &comments.leading);
        out.push('\n');
    }
}

fn write_line_comment(out: &mut String, comment: &str) {
    let comment = comment.strip_suffix('\n').unwrap_or(comment);
    for line in comment.split('\n') {
        out.push_str("//");
        out.push_str(line);
        out.push('\n');
    }
}
