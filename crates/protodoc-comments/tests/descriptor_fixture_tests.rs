use protodoc_comments::{
    declarations, DeclarationKind, ElementKind, FileDescriptorSet, GeneratorInfo, SourcePath,
};

const PAYMENTS: &str = "acme/payments/v1/payments.proto";

fn fixture() -> FileDescriptorSet {
    let fixture_path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/descriptor.json");
    let text = std::fs::read_to_string(&fixture_path).expect("read fixture");
    FileDescriptorSet::from_json(&text).expect("parse fixture")
}

#[test]
fn preamble_for_commented_file() {
    let set = fixture();
    let file = set.file(PAYMENTS).expect("file");
    let generator = GeneratorInfo::new("protoc-gen-x", "1.0.0")
        .with_parameter("target=ts")
        .with_eslint_disable(true)
        .with_ts_nocheck(true);

    assert_eq!(
        file.preamble(&generator),
        "// Copyright 2024 Acme Corp.\n\
         //\n\
         // Licensed under the Apache License, Version 2.0.\n\
         \n\
         // @generated by protoc-gen-x 1.0.0 with parameter \"target=ts\"\n\
         // @generated from file acme/payments/v1/payments.proto (package acme.payments.v1, syntax proto3)\n\
         /* eslint-disable */\n\
         /* @ts-nocheck */\n\
         \n\
         // Package acme.payments.v1 provides the payments API.\n"
    );
}

#[test]
fn preamble_for_file_without_source_info() {
    let set = fixture();
    let file = set.file("google/protobuf/timestamp.proto").expect("file");
    assert_eq!(
        file.preamble(&GeneratorInfo::new("protoc-gen-x", "1.0.0")),
        "// @generated by protoc-gen-x 1.0.0\n\
         // @generated from file google/protobuf/timestamp.proto (package google.protobuf, syntax proto3)\n"
    );
}

#[test]
fn comments_resolve_by_constructed_path() {
    let set = fixture();
    let file = set.file(PAYMENTS).expect("file");

    let payment = SourcePath::root().child(DeclarationKind::FileMessageType, 0);
    let payment_id = payment.child(DeclarationKind::MessageField, 0);
    let comments = file.comments(payment_id.as_slice());
    assert_eq!(comments.leading, " Opaque identifier, e.g. `pay_123`.\n");
    assert_eq!(comments.trailing, " immutable\n");

    let pending = payment
        .child(DeclarationKind::MessageEnumType, 0)
        .child(DeclarationKind::EnumValue, 1);
    assert_eq!(
        file.comments(pending.as_slice()).leading,
        " Authorized but not captured.\n"
    );

    let service = SourcePath::root().child(DeclarationKind::FileService, 0);
    let service_comments = file.comments(service.as_slice());
    assert_eq!(service_comments.leading_detached, vec![" Service section.\n".to_string()]);
    assert_eq!(service_comments.leading, " Read access to payments.\n");

    let request = SourcePath::root().child(DeclarationKind::FileMessageType, 1);
    assert!(file.comments(request.as_slice()).is_empty());
}

#[test]
fn declarations_cover_the_file() {
    let set = fixture();
    let file = set.file(PAYMENTS).expect("file");
    let docs = declarations(file);

    let count = |kind: ElementKind| docs.iter().filter(|d| d.kind == kind).count();
    assert_eq!(count(ElementKind::Message), 2, "map entries are skipped");
    assert_eq!(count(ElementKind::Field), 7);
    assert_eq!(count(ElementKind::Enum), 1);
    assert_eq!(count(ElementKind::EnumValue), 3);
    assert_eq!(count(ElementKind::Service), 1);
    assert_eq!(count(ElementKind::Method), 1);
    assert_eq!(docs.len(), 15);
}

#[test]
fn declaration_blocks_render_like_generated_code() {
    let set = fixture();
    let file = set.file(PAYMENTS).expect("file");
    let docs = declarations(file);
    let by_fqn = |fqn: &str| {
        docs.iter()
            .find(|d| d.fqn == fqn)
            .unwrap_or_else(|| panic!("missing declaration {fqn}"))
    };

    assert_eq!(
        by_fqn("acme.payments.v1.Payment.amount_cents").render("  "),
        "  /**\n   \
         * Amount in cents. Matches the glob `*\\/cents`.\n   \
         *\n   \
         * @generated from field: int64 amount_cents = 2;\n   \
         */"
    );
    assert!(by_fqn("acme.payments.v1.Payment.metadata")
        .render("")
        .contains("@generated from field: map<string, string> metadata = 4;"));
    assert!(by_fqn("acme.payments.v1.Payment.status")
        .render("")
        .contains("@generated from field: acme.payments.v1.Payment.Status status = 3;"));

    let legacy = by_fqn("acme.payments.v1.Payment.legacy_ref");
    assert!(legacy.deprecated);
    assert!(legacy.render("").ends_with(
        " * @generated from field: string legacy_ref = 6 [deprecated = true];\n * @deprecated\n */"
    ));

    assert_eq!(
        by_fqn("acme.payments.v1.PaymentService").render(""),
        "/**\n * Read access to payments.\n *\n * @generated from service acme.payments.v1.PaymentService\n */"
    );
    assert_eq!(
        by_fqn("acme.payments.v1.Payment.Status.STATUS_PENDING").render("    "),
        "    /**\n     \
         * Authorized but not captured.\n     \
         *\n     \
         * @generated from enum value: STATUS_PENDING = 1;\n     \
         */"
    );
}
