//! Declaration paths into `google.protobuf.FileDescriptorProto`.
//!
//! `SourceCodeInfo` does not point into the descriptor tree; it addresses each
//! declaration by the sequence of (field number, index) pairs that leads to it
//! from the file root. For example `[4, 2, 2, 0]` is "message_type[2].field[0]".
//!
//! The field numbers are fixed by `descriptor.proto`, so they live in one
//! enumeration here instead of being spelled out at every call site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Field numbers
// =============================================================================

/// A repeated or singular descriptor field that extends a path one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `FileDescriptorProto.package`
    FilePackage,
    /// `FileDescriptorProto.message_type`
    FileMessageType,
    /// `FileDescriptorProto.enum_type`
    FileEnumType,
    /// `FileDescriptorProto.service`
    FileService,
    /// `FileDescriptorProto.extension`
    FileExtension,
    /// `FileDescriptorProto.syntax`
    FileSyntax,
    /// `DescriptorProto.field`
    MessageField,
    /// `DescriptorProto.nested_type`
    MessageNestedType,
    /// `DescriptorProto.enum_type`
    MessageEnumType,
    /// `DescriptorProto.extension`
    MessageExtension,
    /// `DescriptorProto.oneof_decl`
    MessageOneofDecl,
    /// `EnumDescriptorProto.value`
    EnumValue,
    /// `ServiceDescriptorProto.method`
    ServiceMethod,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 13] = [
        DeclarationKind::FilePackage,
        DeclarationKind::FileMessageType,
        DeclarationKind::FileEnumType,
        DeclarationKind::FileService,
        DeclarationKind::FileExtension,
        DeclarationKind::FileSyntax,
        DeclarationKind::MessageField,
        DeclarationKind::MessageNestedType,
        DeclarationKind::MessageEnumType,
        DeclarationKind::MessageExtension,
        DeclarationKind::MessageOneofDecl,
        DeclarationKind::EnumValue,
        DeclarationKind::ServiceMethod,
    ];

    /// Field number of this descriptor field in `descriptor.proto`.
    pub const fn field_number(self) -> i32 {
        match self {
            DeclarationKind::FilePackage => 2,
            DeclarationKind::FileMessageType => 4,
            DeclarationKind::FileEnumType => 5,
            DeclarationKind::FileService => 6,
            DeclarationKind::FileExtension => 7,
            DeclarationKind::FileSyntax => 12,
            DeclarationKind::MessageField => 2,
            DeclarationKind::MessageNestedType => 3,
            DeclarationKind::MessageEnumType => 4,
            DeclarationKind::MessageExtension => 6,
            DeclarationKind::MessageOneofDecl => 8,
            DeclarationKind::EnumValue => 2,
            DeclarationKind::ServiceMethod => 2,
        }
    }

    /// Singular fields are addressed without a trailing index.
    pub const fn is_singular(self) -> bool {
        matches!(
            self,
            DeclarationKind::FilePackage | DeclarationKind::FileSyntax
        )
    }
}

// =============================================================================
// SourcePath
// =============================================================================

/// An owned declaration path, relative to one file descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePath(Vec<i32>);

impl SourcePath {
    /// The empty path (the file itself).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a singular file-level field such as `package` or `syntax`.
    pub fn file_level(kind: DeclarationKind) -> Self {
        Self(vec![kind.field_number()])
    }

    /// Extends the path by `kind` and the element index within that field.
    ///
    /// # Panics
    ///
    /// If `index` does not fit in an `i32`; `SourceCodeInfo` paths are
    /// `int32` on the wire, so such a declaration cannot be addressed.
    pub fn child(&self, kind: DeclarationKind, index: usize) -> Self {
        let index = i32::try_from(index)
            .unwrap_or_else(|_| panic!("declaration index {index} exceeds i32::MAX"));
        let mut path = self.0.clone();
        path.push(kind.field_number());
        path.push(index);
        Self(path)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i32>> for SourcePath {
    fn from(path: Vec<i32>) -> Self {
        Self(path)
    }
}

impl From<&[i32]> for SourcePath {
    fn from(path: &[i32]) -> Self {
        Self(path.to_vec())
    }
}

impl AsRef<[i32]> for SourcePath {
    fn as_ref(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}")?;
        }
        f.write_str("]")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathParseError {
    #[error("invalid path element `{element}`: expected an integer")]
    InvalidElement { element: String },
}

impl FromStr for SourcePath {
    type Err = PathParseError;

    /// Accepts `4,0,2,1`, `4 0 2 1` and the `[4, 0, 2, 1]` display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
        inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i32>()
                    .map_err(|_| PathParseError::InvalidElement {
                        element: part.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SourcePath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_numbers_match_descriptor_proto() {
        assert_eq!(DeclarationKind::FilePackage.field_number(), 2);
        assert_eq!(DeclarationKind::FileMessageType.field_number(), 4);
        assert_eq!(DeclarationKind::FileEnumType.field_number(), 5);
        assert_eq!(DeclarationKind::FileService.field_number(), 6);
        assert_eq!(DeclarationKind::FileExtension.field_number(), 7);
        assert_eq!(DeclarationKind::FileSyntax.field_number(), 12);
        assert_eq!(DeclarationKind::MessageField.field_number(), 2);
        assert_eq!(DeclarationKind::MessageNestedType.field_number(), 3);
        assert_eq!(DeclarationKind::MessageEnumType.field_number(), 4);
        assert_eq!(DeclarationKind::MessageExtension.field_number(), 6);
        assert_eq!(DeclarationKind::MessageOneofDecl.field_number(), 8);
        assert_eq!(DeclarationKind::EnumValue.field_number(), 2);
        assert_eq!(DeclarationKind::ServiceMethod.field_number(), 2);
    }

    #[test]
    fn only_package_and_syntax_are_singular() {
        let singular: Vec<_> = DeclarationKind::ALL
            .iter()
            .filter(|k| k.is_singular())
            .collect();
        assert_eq!(
            singular,
            vec![&DeclarationKind::FilePackage, &DeclarationKind::FileSyntax]
        );
    }

    #[test]
    fn child_paths_alternate_field_number_and_index() {
        let message = SourcePath::root().child(DeclarationKind::FileMessageType, 2);
        let field = message.child(DeclarationKind::MessageField, 0);
        assert_eq!(field.as_slice(), &[4, 2, 2, 0]);
        // the parent is not modified
        assert_eq!(message.as_slice(), &[4, 2]);
    }

    #[test]
    fn largest_addressable_index_is_kept_exactly() {
        let path = SourcePath::root().child(DeclarationKind::FileEnumType, i32::MAX as usize);
        assert_eq!(path.as_slice(), &[5, i32::MAX]);
    }

    #[test]
    #[should_panic(expected = "exceeds i32::MAX")]
    fn index_beyond_i32_panics_instead_of_wrapping() {
        let _ = SourcePath::root().child(DeclarationKind::FileMessageType, i32::MAX as usize + 1);
    }

    #[test]
    fn file_level_paths_have_no_index() {
        assert_eq!(
            SourcePath::file_level(DeclarationKind::FileSyntax).as_slice(),
            &[12]
        );
        assert_eq!(
            SourcePath::file_level(DeclarationKind::FilePackage).as_slice(),
            &[2]
        );
    }

    #[test]
    fn display_and_parse_agree() {
        let path = SourcePath::from(vec![4, 0, 3, 1, 2, 5]);
        assert_eq!(path.to_string(), "[4, 0, 3, 1, 2, 5]");
        assert_eq!(path.to_string().parse::<SourcePath>(), Ok(path.clone()));
        assert_eq!("4,0,3,1,2,5".parse::<SourcePath>(), Ok(path.clone()));
        assert_eq!("4 0 3 1 2 5".parse::<SourcePath>(), Ok(path));
    }

    #[test]
    fn parse_rejects_non_integers() {
        let err = "4,x".parse::<SourcePath>().expect_err("should error");
        assert_eq!(
            err,
            PathParseError::InvalidElement {
                element: "x".to_string()
            }
        );
    }

    #[test]
    fn empty_text_parses_to_root() {
        assert_eq!("".parse::<SourcePath>(), Ok(SourcePath::root()));
        assert!(SourcePath::root().is_empty());
    }
}
