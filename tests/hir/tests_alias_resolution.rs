//! Alias table construction and type token resolution across documents.

use mapperlink::hir::{AliasDeclaration, AliasDeclarations, SearchScope, TypeDecl};
use mapperlink::ide::{AnalysisHost, AnalysisOptions, ResolutionEngine};
use mapperlink::ModuleId;
use rstest::rstest;

use crate::helpers::fixtures::{BEANS_XML, CONFIG_PATH};
use crate::helpers::host_helpers::{host_with_model, host_with_project, load};

#[rstest]
#[case("User", "com.app.model.User")]
#[case("Member", "com.app.model.User")]
#[case("purchase", "com.app.model.Order")]
#[case("Address", "com.app.model.Address")]
#[case("long", "java.lang.Long")]
#[case("string", "java.lang.String")]
#[case("com.app.model.User", "com.app.model.User")]
fn test_type_tokens_resolve(#[case] token: &str, #[case] expected: &str) {
    let mut host = host_with_project();
    let ctx = host.context();
    let resolved = ResolutionEngine::new().resolve_alias(&ctx, token);
    assert_eq!(
        resolved.map(|t| t.qualified_name.to_string()),
        Some(expected.to_string())
    );
}

#[rstest]
#[case("user")]
#[case("Order")]
#[case("Usr")]
#[case("com.app.model.Usr")]
#[case("")]
fn test_unknown_tokens_do_not_resolve(#[case] token: &str) {
    let mut host = host_with_project();
    let ctx = host.context();
    assert!(ResolutionEngine::new().resolve_alias(&ctx, token).is_none());
}

#[test]
fn test_interfaces_are_not_package_aliases() {
    let mut host = host_with_model();
    host.set_alias_declarations(
        "config.xml",
        AliasDeclarations::new(vec![AliasDeclaration::Package("com.app.dao".into())]),
    );
    let ctx = host.context();
    assert!(ctx.alias_table().get("UserMapper").is_none());
}

#[test]
fn test_last_registration_wins() {
    let mut host = host_with_model();
    host.set_alias_declarations(
        "a.xml",
        AliasDeclarations::new(vec![AliasDeclaration::Explicit {
            alias: Some("Thing".into()),
            type_name: "com.app.model.User".into(),
        }]),
    );
    host.set_alias_declarations(
        "b.xml",
        AliasDeclarations::new(vec![AliasDeclaration::Explicit {
            alias: Some("Thing".into()),
            type_name: "com.app.model.Address".into(),
        }]),
    );

    let ctx = host.context();
    let resolved = ResolutionEngine::new().resolve_alias(&ctx, "Thing");
    assert_eq!(
        resolved.map(|t| t.qualified_name.to_string()).as_deref(),
        Some("com.app.model.Address")
    );
}

#[test]
fn test_qualified_name_bypasses_alias_table() {
    let mut host = host_with_model();
    host.set_alias_declarations(
        "config.xml",
        AliasDeclarations::new(vec![AliasDeclaration::Explicit {
            alias: Some("com.app.model.User".into()),
            type_name: "com.app.model.Address".into(),
        }]),
    );

    let ctx = host.context();
    let resolved = ResolutionEngine::new().resolve_alias(&ctx, "com.app.model.User");
    assert_eq!(
        resolved.map(|t| t.qualified_name.to_string()).as_deref(),
        Some("com.app.model.User")
    );
}

#[test]
fn test_beans_document_registers_package_aliases() {
    let mut host = host_with_model();
    load(&mut host, "applicationContext.xml", BEANS_XML);
    let ctx = host.context();
    let engine = ResolutionEngine::new();
    assert!(engine.resolve_alias(&ctx, "UserDto").is_some());
    assert!(engine.resolve_alias(&ctx, "User").is_none());
}

#[test]
fn test_removing_configuration_drops_its_aliases() {
    let mut host = host_with_project();
    assert!(host.context().alias_table().get("Member").is_some());

    host.remove_file(CONFIG_PATH);
    let ctx = host.context();
    assert!(ctx.alias_table().get("Member").is_none());
    assert!(ctx.alias_table().get("long").is_some());
}

#[test]
fn test_builtin_aliases_can_be_disabled() {
    let mut host = AnalysisHost::with_options(AnalysisOptions {
        builtin_aliases: false,
    });
    host.set_file_types("java/lang.java", vec![TypeDecl::class("java.lang.Long")]);
    let ctx = host.context();
    assert!(ResolutionEngine::new().resolve_alias(&ctx, "long").is_none());
}

#[test]
fn test_alias_outside_scope_does_not_resolve() {
    let mut host = host_with_model();
    host.set_file_types(
        "other/Widget.java",
        vec![TypeDecl::class("com.other.Widget").in_module(ModuleId::new(3))],
    );
    host.set_alias_declarations(
        "config.xml",
        AliasDeclarations::new(vec![AliasDeclaration::Package("com.other".into())]),
    );

    let ctx = host.context();
    let engine = ResolutionEngine::new();
    assert!(engine.resolve_alias(&ctx, "Widget").is_some());

    let narrowed = ctx.with_scope(SearchScope::modules([ModuleId::ROOT]));
    assert!(engine.resolve_alias(&narrowed, "Widget").is_none());
}
