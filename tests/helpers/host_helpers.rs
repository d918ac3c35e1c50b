//! Host setup and symbol lookup helpers.

use mapperlink::hir::{MethodSymbol, SearchScope, TypeSymbol, WorkspaceContext};
use mapperlink::ide::AnalysisHost;

use super::fixtures::{CONFIG_PATH, CONFIG_XML, USER_MAPPER_PATH, USER_MAPPER_XML, model_sources};

/// A host with the model classes only.
pub fn host_with_model() -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, decls) in model_sources() {
        host.set_file_types(path, decls);
    }
    host
}

/// A host with the model classes, the configuration and the user mapper.
pub fn host_with_project() -> AnalysisHost {
    let mut host = host_with_model();
    load(&mut host, CONFIG_PATH, CONFIG_XML);
    load(&mut host, USER_MAPPER_PATH, USER_MAPPER_XML);
    host
}

/// Loads an XML document, failing the test if it is not recognised.
pub fn load(host: &mut AnalysisHost, path: &str, text: &str) {
    let kind = host
        .set_file_content(path, text)
        .unwrap_or_else(|e| panic!("failed to load '{}': {}", path, e));
    assert!(kind.is_some(), "'{}' was not recognised", path);
}

pub fn type_symbol(ctx: &WorkspaceContext, qualified_name: &str) -> TypeSymbol {
    ctx.graph()
        .lookup_by_qualified_name(qualified_name, &SearchScope::All)
        .unwrap_or_else(|| panic!("type '{}' should exist", qualified_name))
}

pub fn method(ctx: &WorkspaceContext, owner: &str, name: &str) -> MethodSymbol {
    let owner = type_symbol(ctx, owner);
    ctx.graph()
        .methods(&owner)
        .into_iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("method '{}' should exist", name))
}
