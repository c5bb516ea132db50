//! Per-declaration documentation for a whole file.
//!
//! Walks a `FileDescriptor` in declaration order, builds the source path of
//! every message, field, oneof, enum, enum value, service, method and
//! extension, resolves its comments and prepares the doc block that generated
//! code places above it:
//!
//! ```text
//! /**
//!  * <leading comment>
//!  *
//!  * @generated from message pkg.v1.Foo
//!  * @deprecated
//!  */
//! ```

use serde::Serialize;

use crate::comments::CommentSet;
use crate::descriptor::{
    qualify_type_name, EnumDescriptor, FieldDescriptor, FileDescriptor, MessageDescriptor,
    ServiceDescriptor, Syntax,
};
use crate::doc_block::DocBlock;
use crate::path::{DeclarationKind, SourcePath};

/// What a documented declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Message,
    Field,
    Oneof,
    Enum,
    EnumValue,
    Service,
    Method,
    Extension,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Message => "message",
            ElementKind::Field => "field",
            ElementKind::Oneof => "oneof",
            ElementKind::Enum => "enum",
            ElementKind::EnumValue => "enum_value",
            ElementKind::Service => "service",
            ElementKind::Method => "method",
            ElementKind::Extension => "extension",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeclarationDoc {
    pub kind: ElementKind,
    pub path: SourcePath,
    /// Fully-qualified name; enum values are qualified by their enum.
    pub fqn: String,
    pub comments: CommentSet,
    pub deprecated: bool,
    pub block: DocBlock,
}

impl DeclarationDoc {
    fn new(
        file: &FileDescriptor,
        kind: ElementKind,
        path: SourcePath,
        fqn: String,
        generated_from: String,
        deprecated: bool,
    ) -> Self {
        let comments = file.comments(path.as_slice());
        let mut block = DocBlock::new();
        if !comments.leading.is_empty() {
            block.append(&comments.leading);
            block.append("");
        }
        block.append(&format!(" @generated from {generated_from}"));
        if deprecated {
            block.append(" @deprecated");
        }
        tracing::trace!(kind = kind.as_str(), %path, fqn = %fqn, "documented declaration");
        Self {
            kind,
            path,
            fqn,
            comments,
            deprecated,
            block,
        }
    }

    pub fn render(&self, indent: &str) -> String {
        self.block.render(indent)
    }
}

/// Documentation for every declaration in `file`, in declaration order.
///
/// Synthesized map entry messages are skipped; their fields are rendered as
/// `map<K, V>` on the owning field instead.
pub fn declarations(file: &FileDescriptor) -> Vec<DeclarationDoc> {
    let mut walker = Walker {
        file,
        package: file.package(),
        syntax: file.syntax(),
        out: Vec::new(),
    };
    let root = SourcePath::root();

    for (i, message) in file.message_type.iter().enumerate() {
        walker.message(
            message,
            root.child(DeclarationKind::FileMessageType, i),
            &[],
        );
    }
    for (i, enumeration) in file.enum_type.iter().enumerate() {
        walker.enumeration(
            enumeration,
            root.child(DeclarationKind::FileEnumType, i),
            &[],
        );
    }
    for (i, service) in file.service.iter().enumerate() {
        walker.service(service, root.child(DeclarationKind::FileService, i));
    }
    for (i, extension) in file.extension.iter().enumerate() {
        walker.extension(
            extension,
            root.child(DeclarationKind::FileExtension, i),
            &[],
        );
    }

    walker.out
}

struct Walker<'a> {
    file: &'a FileDescriptor,
    package: &'a str,
    syntax: Syntax,
    out: Vec<DeclarationDoc>,
}

impl Walker<'_> {
    fn qualify(&self, parts: &[String]) -> String {
        qualify_type_name(self.package, &parts.join("."))
    }

    fn push(
        &mut self,
        kind: ElementKind,
        path: SourcePath,
        fqn: String,
        generated_from: String,
        deprecated: bool,
    ) {
        let doc = DeclarationDoc::new(self.file, kind, path, fqn, generated_from, deprecated);
        self.out.push(doc);
    }

    fn message(&mut self, message: &MessageDescriptor, path: SourcePath, scope: &[String]) {
        if message.is_map_entry() {
            return;
        }
        let mut scope = scope.to_vec();
        scope.push(message.name().to_string());
        let fqn = self.qualify(&scope);

        self.push(
            ElementKind::Message,
            path.clone(),
            fqn.clone(),
            format!("message {fqn}"),
            message.is_deprecated(),
        );

        for (i, field) in message.field.iter().enumerate() {
            let declaration = field_declaration(field, Some(message), &self.syntax);
            self.push(
                ElementKind::Field,
                path.child(DeclarationKind::MessageField, i),
                format!("{fqn}.{}", field.name()),
                format!("field: {declaration}"),
                field.is_deprecated(),
            );
        }
        for (i, oneof) in message.oneof_decl.iter().enumerate() {
            let oneof_fqn = format!("{fqn}.{}", oneof.name());
            self.push(
                ElementKind::Oneof,
                path.child(DeclarationKind::MessageOneofDecl, i),
                oneof_fqn.clone(),
                format!("oneof {oneof_fqn}"),
                false,
            );
        }
        for (i, enumeration) in message.enum_type.iter().enumerate() {
            self.enumeration(
                enumeration,
                path.child(DeclarationKind::MessageEnumType, i),
                &scope,
            );
        }
        for (i, nested) in message.nested_type.iter().enumerate() {
            self.message(
                nested,
                path.child(DeclarationKind::MessageNestedType, i),
                &scope,
            );
        }
        for (i, extension) in message.extension.iter().enumerate() {
            self.extension(
                extension,
                path.child(DeclarationKind::MessageExtension, i),
                &scope,
            );
        }
    }

    fn enumeration(&mut self, enumeration: &EnumDescriptor, path: SourcePath, scope: &[String]) {
        let mut scope = scope.to_vec();
        scope.push(enumeration.name().to_string());
        let fqn = self.qualify(&scope);

        self.push(
            ElementKind::Enum,
            path.clone(),
            fqn.clone(),
            format!("enum {fqn}"),
            enumeration.is_deprecated(),
        );

        for (i, value) in enumeration.value.iter().enumerate() {
            self.push(
                ElementKind::EnumValue,
                path.child(DeclarationKind::EnumValue, i),
                format!("{fqn}.{}", value.name()),
                format!("enum value: {} = {};", value.name(), value.number()),
                value.is_deprecated(),
            );
        }
    }

    fn service(&mut self, service: &ServiceDescriptor, path: SourcePath) {
        let fqn = qualify_type_name(self.package, service.name());
        self.push(
            ElementKind::Service,
            path.clone(),
            fqn.clone(),
            format!("service {fqn}"),
            service.is_deprecated(),
        );

        for (i, method) in service.method.iter().enumerate() {
            let method_fqn = format!("{fqn}.{}", method.name());
            self.push(
                ElementKind::Method,
                path.child(DeclarationKind::ServiceMethod, i),
                method_fqn.clone(),
                format!("rpc {method_fqn}"),
                method.is_deprecated(),
            );
        }
    }

    fn extension(&mut self, extension: &FieldDescriptor, path: SourcePath, scope: &[String]) {
        let mut scope = scope.to_vec();
        scope.push(extension.name().to_string());
        let fqn = self.qualify(&scope);
        let declaration = field_declaration(extension, None, &self.syntax);
        self.push(
            ElementKind::Extension,
            path,
            fqn,
            format!("extension: {declaration}"),
            extension.is_deprecated(),
        );
    }
}

/// Renders a field the way it reads in the `.proto` source, e.g.
/// `repeated string tags = 3;` or `map<string, int32> counts = 4;`.
///
/// `owner` is the message declaring the field; it is needed to resolve map
/// entry types, which are nested inside it.
pub fn field_declaration(
    field: &FieldDescriptor,
    owner: Option<&MessageDescriptor>,
    syntax: &Syntax,
) -> String {
    let mut out = String::new();

    if let Some((key, value)) = owner.and_then(|m| map_entry_types(field, m)) {
        out.push_str(&format!("map<{key}, {value}> "));
    } else {
        match field.label.as_deref() {
            Some("LABEL_REPEATED") => out.push_str("repeated "),
            Some("LABEL_REQUIRED") => out.push_str("required "),
            Some("LABEL_OPTIONAL")
                if *syntax == Syntax::Proto2 || field.proto3_optional == Some(true) =>
            {
                out.push_str("optional ")
            }
            _ => {}
        }
        out.push_str(&field.type_label());
        out.push(' ');
    }
    out.push_str(&format!("{} = {}", field.name(), field.number()));

    let mut options = Vec::new();
    if let Some(default) = &field.default_value {
        match field.typ.as_deref() {
            Some("TYPE_STRING") | Some("TYPE_BYTES") => {
                options.push(format!("default = \"{default}\""))
            }
            _ => options.push(format!("default = {default}")),
        }
    }
    if field.is_deprecated() {
        options.push("deprecated = true".to_string());
    }
    if !options.is_empty() {
        out.push_str(&format!(" [{}]", options.join(", ")));
    }
    out.push(';');
    out
}

fn map_entry_types(field: &FieldDescriptor, owner: &MessageDescriptor) -> Option<(String, String)> {
    if !field.is_repeated() || field.typ.as_deref() != Some("TYPE_MESSAGE") {
        return None;
    }
    let entry_name = field.type_name.as_deref()?.rsplit('.').next()?;
    let entry = owner
        .nested_type
        .iter()
        .find(|m| m.name() == entry_name && m.is_map_entry())?;
    let key = entry.field.iter().find(|f| f.number() == 1)?;
    let value = entry.field.iter().find(|f| f.number() == 2)?;
    Some((key.type_label(), value.type_label()))
}
