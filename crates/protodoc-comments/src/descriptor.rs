//! Descriptor set JSON (subset).
//!
//! This is the JSON rendering of `google.protobuf.FileDescriptorSet`, as
//! written by `buf build --as-file-descriptor-set -o descriptor.json`. Only the
//! parts needed to address declarations and look up their comments are
//! modelled; options are kept as raw JSON so custom extensions survive.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::comments::{CommentSet, Location};
use crate::config::GeneratorInfo;
use crate::path::{DeclarationKind, SourcePath};
use crate::preamble::make_file_preamble;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to parse descriptor set JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("file `{name}` not found in descriptor set")]
    UnknownFile { name: String },
}

/// Raw options object, including extension keys like `"[acme.v1.http]"`.
pub type Options = BTreeMap<String, Value>;

fn option_flag(options: &Option<Options>, key: &str) -> bool {
    options
        .as_ref()
        .and_then(|o| o.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

// =============================================================================
// Syntax
// =============================================================================

/// The `syntax` of a file, as printed in the preamble banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Syntax {
    Proto2,
    Proto3,
    Editions,
    Other(String),
}

impl Syntax {
    /// `protoc` leaves `syntax` unset for proto2 files.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None | Some("") | Some("proto2") => Syntax::Proto2,
            Some("proto3") => Syntax::Proto3,
            Some("editions") => Syntax::Editions,
            Some(other) => Syntax::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Syntax::Proto2 => "proto2",
            Syntax::Proto3 => "proto3",
            Syntax::Editions => "editions",
            Syntax::Other(label) => label,
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Descriptor types
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDescriptorSet {
    #[serde(default)]
    pub file: Vec<FileDescriptor>,
}

impl FileDescriptorSet {
    pub fn from_json(text: &str) -> Result<Self, DescriptorError> {
        let set: FileDescriptorSet = serde_json::from_str(text)?;
        tracing::debug!(files = set.file.len(), "parsed descriptor set");
        Ok(set)
    }

    pub fn file(&self, name: &str) -> Result<&FileDescriptor, DescriptorError> {
        self.file
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| DescriptorError::UnknownFile {
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: Option<String>,
    pub package: Option<String>,
    #[serde(default)]
    pub dependency: Vec<String>,
    #[serde(default)]
    pub message_type: Vec<MessageDescriptor>,
    #[serde(default)]
    pub enum_type: Vec<EnumDescriptor>,
    #[serde(default)]
    pub service: Vec<ServiceDescriptor>,
    #[serde(default)]
    pub extension: Vec<FieldDescriptor>,
    #[serde(default)]
    pub options: Option<Options>,
    #[serde(default)]
    pub source_code_info: Option<SourceCodeInfo>,
    pub syntax: Option<String>,
}

impl FileDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }

    pub fn syntax(&self) -> Syntax {
        Syntax::from_label(self.syntax.as_deref())
    }

    /// Location table; empty when the set was built without source info.
    pub fn locations(&self) -> &[Location] {
        self.source_code_info
            .as_ref()
            .map(|info| info.location.as_slice())
            .unwrap_or(&[])
    }

    pub fn comments(&self, path: &[i32]) -> CommentSet {
        CommentSet::for_path(self.locations(), path)
    }

    pub fn syntax_comments(&self) -> CommentSet {
        self.comments(SourcePath::file_level(DeclarationKind::FileSyntax).as_slice())
    }

    pub fn package_comments(&self) -> CommentSet {
        self.comments(SourcePath::file_level(DeclarationKind::FilePackage).as_slice())
    }

    pub fn preamble(&self, generator: &GeneratorInfo) -> String {
        make_file_preamble(
            generator,
            self.name(),
            self.package(),
            &self.syntax(),
            &self.syntax_comments(),
            &self.package_comments(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCodeInfo {
    #[serde(default)]
    pub location: Vec<Location>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDescriptor {
    pub name: Option<String>,
    #[serde(default)]
    pub field: Vec<FieldDescriptor>,
    #[serde(default)]
    pub extension: Vec<FieldDescriptor>,
    #[serde(default)]
    pub nested_type: Vec<MessageDescriptor>,
    #[serde(default)]
    pub enum_type: Vec<EnumDescriptor>,
    #[serde(default)]
    pub oneof_decl: Vec<OneofDescriptor>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl MessageDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_deprecated(&self) -> bool {
        option_flag(&self.options, "deprecated")
    }

    /// Synthesized `FooEntry` messages backing `map<K, V>` fields.
    pub fn is_map_entry(&self) -> bool {
        option_flag(&self.options, "mapEntry")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub type_name: Option<String>,
    pub extendee: Option<String>,
    pub default_value: Option<String>,
    pub oneof_index: Option<i32>,
    pub json_name: Option<String>,
    pub proto3_optional: Option<bool>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn number(&self) -> i32 {
        self.number.unwrap_or(0)
    }

    pub fn is_deprecated(&self) -> bool {
        option_flag(&self.options, "deprecated")
    }

    pub fn is_repeated(&self) -> bool {
        self.label.as_deref() == Some("LABEL_REPEATED")
    }

    /// Scalar keyword (`string`, `int32`, ...) or the referenced type name
    /// without its leading dot.
    pub fn type_label(&self) -> String {
        match self.typ.as_deref() {
            Some("TYPE_MESSAGE") | Some("TYPE_ENUM") | Some("TYPE_GROUP") | None => self
                .type_name
                .as_deref()
                .map(|n| n.trim_start_matches('.').to_string())
                .unwrap_or_default(),
            Some(scalar) => scalar
                .strip_prefix("TYPE_")
                .unwrap_or(scalar)
                .to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneofDescriptor {
    pub name: Option<String>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl OneofDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumDescriptor {
    pub name: Option<String>,
    #[serde(default)]
    pub value: Vec<EnumValueDescriptor>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl EnumDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_deprecated(&self) -> bool {
        option_flag(&self.options, "deprecated")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    pub name: Option<String>,
    pub number: Option<i32>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl EnumValueDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn number(&self) -> i32 {
        self.number.unwrap_or(0)
    }

    pub fn is_deprecated(&self) -> bool {
        option_flag(&self.options, "deprecated")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: Option<String>,
    #[serde(default)]
    pub method: Vec<MethodDescriptor>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl ServiceDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_deprecated(&self) -> bool {
        option_flag(&self.options, "deprecated")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: Option<String>,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
    pub client_streaming: Option<bool>,
    pub server_streaming: Option<bool>,
    #[serde(default)]
    pub options: Option<Options>,
}

impl MethodDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_deprecated(&self) -> bool {
        option_flag(&self.options, "deprecated")
    }
}

pub(crate) fn qualify_type_name(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
