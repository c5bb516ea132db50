//! Protobuf comments → generated-code documentation.
//!
//! Given a descriptor set (the JSON form of `google.protobuf.FileDescriptorSet`)
//! this crate answers two questions for a code generator:
//!
//! - which comments belong to a declaration (`CommentSet::for_path`, keyed by
//!   the declaration's `SourcePath`), and
//! - how they appear in the generated file (`DocBlock` above declarations,
//!   `make_file_preamble` at the top of the file).
//!
//! Everything here is a pure function of its inputs; generating files in
//! parallel needs no coordination.

pub mod comments;
pub mod config;
pub mod declarations;
pub mod descriptor;
pub mod doc_block;
pub mod path;
pub mod preamble;

pub use comments::{CommentSet, Location};
pub use config::{ConfigError, GeneratorInfo};
pub use declarations::{declarations, field_declaration, DeclarationDoc, ElementKind};
pub use descriptor::{
    DescriptorError, EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FileDescriptor,
    FileDescriptorSet, MessageDescriptor, MethodDescriptor, OneofDescriptor, Options,
    ServiceDescriptor, SourceCodeInfo, Syntax,
};
pub use doc_block::DocBlock;
pub use path::{DeclarationKind, PathParseError, SourcePath};
pub use preamble::make_file_preamble;
