//! Validation of mapping documents against the workspace.

use mapperlink::hir::{MappingDocument, StatementElement, StatementKind};
use mapperlink::ide::{Severity, check_document, check_document_with, check_file, codes};
use tokio_util::sync::CancellationToken;

use crate::helpers::fixtures::{BROKEN_MAPPER_XML, USER_MAPPER_PATH};
use crate::helpers::host_helpers::{host_with_project, load};

#[test]
fn test_consistent_document_has_no_diagnostics() {
    let mut host = host_with_project();
    let file = host.lookup_file(USER_MAPPER_PATH).unwrap();
    let ctx = host.context();
    let diagnostics = check_file(&ctx, file);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn test_broken_document_reports_each_failure() {
    let mut host = host_with_project();
    load(&mut host, "mapper/Broken.xml", BROKEN_MAPPER_XML);
    let file = host.lookup_file("mapper/Broken.xml").unwrap();
    let ctx = host.context();

    let diagnostics = check_file(&ctx, file);
    let found: Vec<_> = diagnostics.iter().map(|d| d.code.as_deref()).collect();
    assert_eq!(
        found,
        [
            Some(codes::UNRESOLVED_PROPERTY),
            Some(codes::UNBOUND_STATEMENT),
            Some(codes::UNRESOLVED_TYPE),
        ]
    );
    assert_eq!(diagnostics[1].severity, Severity::Warning);
    assert!(diagnostics.iter().all(|d| d.file == file));
}

#[test]
fn test_property_diagnostic_points_at_the_path() {
    let mut host = host_with_project();
    load(&mut host, "mapper/Broken.xml", BROKEN_MAPPER_XML);
    let file = host.lookup_file("mapper/Broken.xml").unwrap();
    let ctx = host.context();

    let diagnostics = check_file(&ctx, file);
    let range = diagnostics[0].range;
    assert_eq!(&BROKEN_MAPPER_XML[range], "address.zip");
}

#[test]
fn test_type_diagnostic_points_at_the_attribute_value() {
    let mut host = host_with_project();
    load(&mut host, "mapper/Broken.xml", BROKEN_MAPPER_XML);
    let file = host.lookup_file("mapper/Broken.xml").unwrap();
    let ctx = host.context();

    let diagnostics = check_file(&ctx, file);
    assert_eq!(diagnostics[2].code.as_deref(), Some(codes::UNRESOLVED_TYPE));
    assert_eq!(&BROKEN_MAPPER_XML[diagnostics[2].range], "Usr");
}

#[test]
fn test_cancelled_check_stops() {
    let mut host = host_with_project();
    load(&mut host, "mapper/Broken.xml", BROKEN_MAPPER_XML);
    let file = host.lookup_file("mapper/Broken.xml").unwrap();
    let ctx = host.context();
    let document = ctx.markup().document(file).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(check_document_with(&ctx, &document, &cancel).is_err());
}

#[test]
fn test_unresolved_namespace_reported_once() {
    let mut host = host_with_project();
    let text = BROKEN_MAPPER_XML.replace("com.app.dao.UserMapper", "com.app.dao.Missing");
    load(&mut host, "mapper/Broken.xml", &text);
    let file = host.lookup_file("mapper/Broken.xml").unwrap();
    let ctx = host.context();

    let diagnostics = check_file(&ctx, file);
    let namespace_errors = diagnostics
        .iter()
        .filter(|d| d.code.as_deref() == Some(codes::UNRESOLVED_NAMESPACE))
        .count();
    assert_eq!(namespace_errors, 1);
    assert_eq!(&text[diagnostics[0].range], "com.app.dao.Missing");
    assert!(
        diagnostics
            .iter()
            .all(|d| d.code.as_deref() != Some(codes::UNBOUND_STATEMENT))
    );
}

#[test]
fn test_unknown_id_reference_reported() {
    let mut host = host_with_project();
    let file = host.file_id("mapper/Refs.xml");
    let document = MappingDocument::new(file)
        .with_namespace("com.app.dao.UserMapper")
        .with_statement(
            StatementElement::new("findById", StatementKind::Select, file)
                .with_attribute("resultMap", "missingMap"),
        );
    let ctx = host.context();

    let diagnostics = check_document(&ctx, &document);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::UNRESOLVED_REFERENCE));
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_document_without_namespace_is_not_checked() {
    let mut host = host_with_project();
    let file = host.file_id("mapper/Empty.xml");
    let document = MappingDocument::new(file).with_statement(
        StatementElement::new("anything", StatementKind::Select, file)
            .with_attribute("resultType", "Nope"),
    );
    let ctx = host.context();
    assert!(check_document(&ctx, &document).is_empty());
}
