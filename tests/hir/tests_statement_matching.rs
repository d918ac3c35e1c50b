//! Binding between mapper interface methods and statement elements.

use mapperlink::hir::{MappingDocument, SearchScope, StatementElement, StatementKind, TypeDecl};
use mapperlink::ide::ResolutionEngine;
use tokio_util::sync::CancellationToken;

use crate::helpers::fixtures::{USER_MAPPER_PATH, USER_MAPPER_XML};
use crate::helpers::host_helpers::{host_with_project, load, method, type_symbol};

fn ids(statements: &[StatementElement]) -> Vec<String> {
    statements.iter().map(|s| s.id.to_string()).collect()
}

#[test]
fn test_method_finds_its_statement() {
    let mut host = host_with_project();
    let ctx = host.context();
    let find_by_id = method(&ctx, "com.app.dao.UserMapper", "findById");

    let found = ResolutionEngine::new()
        .find_statements(&ctx, &find_by_id, &CancellationToken::new())
        .unwrap();
    assert_eq!(ids(&found), ["findById"]);
    assert_eq!(found[0].kind, StatementKind::Select);
}

#[test]
fn test_inherited_method_finds_statement_of_subtype_mapper() {
    let mut host = host_with_project();
    let ctx = host.context();
    let select_all = method(&ctx, "com.app.dao.BaseMapper", "selectAll");

    let found = ResolutionEngine::new()
        .find_statements(&ctx, &select_all, &CancellationToken::new())
        .unwrap();
    assert_eq!(ids(&found), ["selectAll"]);
}

#[test]
fn test_unrelated_method_with_same_name_finds_nothing() {
    let mut host = host_with_project();
    let ctx = host.context();
    let select_all = method(&ctx, "com.app.dao.OrderMapper", "selectAll");

    let engine = ResolutionEngine::new();
    let cancel = CancellationToken::new();
    assert!(engine.find_statements(&ctx, &select_all, &cancel).unwrap().is_empty());
    assert!(engine.first_statement(&ctx, &select_all, &cancel).unwrap().is_none());
}

#[test]
fn test_statement_finds_declared_and_inherited_methods() {
    let mut host = host_with_project();
    let ctx = host.context();
    let engine = ResolutionEngine::new();
    let file = host.lookup_file(USER_MAPPER_PATH).unwrap();
    let document = ctx.markup().document(file).unwrap();

    let find_by_id = document.statement("findById").unwrap();
    let methods = engine.find_methods(&ctx, find_by_id);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].owner.as_ref(), "com.app.dao.UserMapper");

    let select_all = document.statement("selectAll").unwrap();
    let methods = engine.find_methods(&ctx, select_all);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].owner.as_ref(), "com.app.dao.BaseMapper");
}

#[test]
fn test_non_statement_elements_bind_to_no_method() {
    let mut host = host_with_project();
    let ctx = host.context();
    let file = host.lookup_file(USER_MAPPER_PATH).unwrap();
    let document = ctx.markup().document(file).unwrap();

    let engine = ResolutionEngine::new();
    for id in ["userMap", "userColumns"] {
        let element = document.statement(id).unwrap();
        assert!(engine.find_methods(&ctx, element).is_empty(), "{id}");
    }
}

#[test]
fn test_several_documents_may_share_a_namespace() {
    let mut host = host_with_project();
    load(&mut host, "mapper/UserMapperExt.xml", USER_MAPPER_XML);
    let ctx = host.context();
    let find_by_id = method(&ctx, "com.app.dao.UserMapper", "findById");
    let engine = ResolutionEngine::new();
    let cancel = CancellationToken::new();

    let found = engine.find_statements(&ctx, &find_by_id, &cancel).unwrap();
    assert_eq!(found.len(), 2);
    assert_ne!(found[0].file, found[1].file);

    let user_mapper = type_symbol(&ctx, "com.app.dao.UserMapper");
    let mappers = engine.matching_mappers(&ctx, &user_mapper, &cancel).unwrap();
    assert_eq!(mappers.len(), 2);
}

#[test]
fn test_statement_ids_follow_namespace_rebinding() {
    let mut host = host_with_project();
    host.set_file_types(
        "com/app/dao/AccountMapper.java",
        vec![
            TypeDecl::interface("com.app.dao.AccountMapper")
                .method("findById", &["long"], None),
        ],
    );
    let file = host.lookup_file(USER_MAPPER_PATH).unwrap();
    let ctx = host.context();
    let account_find = method(&ctx, "com.app.dao.AccountMapper", "findById");
    let engine = ResolutionEngine::new();
    let cancel = CancellationToken::new();
    assert!(engine.find_statements(&ctx, &account_find, &cancel).unwrap().is_empty());

    let document = ctx.markup().document(file).unwrap();
    let account = type_symbol(&ctx, "com.app.dao.AccountMapper");
    host.set_mapping_document(mapperlink::ide::rebind_namespace(&document, &account));

    let ctx = host.context();
    assert_eq!(
        ids(&engine.find_statements(&ctx, &account_find, &cancel).unwrap()),
        ["findById"]
    );
}

#[test]
fn test_id_references_resolve_locally_and_qualified() {
    let mut host = host_with_project();
    let other = host.file_id("mapper/Shared.xml");
    host.set_mapping_document(
        MappingDocument::new(other)
            .with_namespace("com.app.dao.Shared")
            .with_statement(StatementElement::new("baseColumns", StatementKind::Sql, other)),
    );
    let ctx = host.context();
    let engine = ResolutionEngine::new();
    let file = host.lookup_file(USER_MAPPER_PATH).unwrap();
    let document = ctx.markup().document(file).unwrap();

    let cancel = CancellationToken::new();
    let resolve = |reference: &str, kind| {
        engine
            .resolve_id_ref(&ctx, &document, reference, kind, &cancel)
            .unwrap()
    };

    assert_eq!(ids(&resolve("userColumns", StatementKind::Sql)), ["userColumns"]);
    assert_eq!(
        ids(&resolve("com.app.dao.Shared.baseColumns", StatementKind::Sql)),
        ["baseColumns"]
    );
    assert!(resolve("userColumns", StatementKind::ResultMap).is_empty());
    assert!(resolve("baseColumns", StatementKind::Sql).is_empty());
}

#[test]
fn test_cancelled_scan_reports_cancellation() {
    let mut host = host_with_project();
    let ctx = host.context();
    let find_by_id = method(&ctx, "com.app.dao.UserMapper", "findById");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let engine = ResolutionEngine::new();
    assert!(engine.find_statements(&ctx, &find_by_id, &cancel).is_err());
    let user_mapper = type_symbol(&ctx, "com.app.dao.UserMapper");
    assert!(engine.matching_mappers(&ctx, &user_mapper, &cancel).is_err());

    let file = host.lookup_file(USER_MAPPER_PATH).unwrap();
    let document = ctx.markup().document(file).unwrap();
    let qualified = "com.app.dao.UserMapper.userColumns";
    assert!(
        engine
            .resolve_id_ref(&ctx, &document, qualified, StatementKind::Sql, &cancel)
            .is_err()
    );
}

#[test]
fn test_nothing_resolves_while_indexing() {
    let mut host = host_with_project();
    host.set_indexing(true);
    let ctx = host.context();
    let scope = SearchScope::All;
    assert!(ctx.graph().lookup_by_qualified_name("com.app.dao.UserMapper", &scope).is_some());

    let user_mapper = ctx
        .graph()
        .lookup_by_qualified_name("com.app.dao.UserMapper", &scope)
        .unwrap();
    let methods = ctx.graph().methods(&user_mapper);
    let found = ResolutionEngine::new()
        .find_statements(&ctx, &methods[0], &CancellationToken::new())
        .unwrap();
    assert!(found.is_empty());
}
