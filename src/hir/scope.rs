//! Search scopes restricting which declarations and documents a query can see.

use std::sync::Arc;

use crate::base::ModuleId;

/// The set of modules visible to a query.
///
/// `Modules` holds a module together with its (transitive) dependencies, as
/// computed by [`ClassIndex::module_scope`](super::ClassIndex::module_scope).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Every module of the workspace.
    #[default]
    All,
    Modules(Arc<[ModuleId]>),
}

impl SearchScope {
    pub fn modules(modules: impl IntoIterator<Item = ModuleId>) -> Self {
        SearchScope::Modules(modules.into_iter().collect())
    }

    pub fn contains(&self, module: ModuleId) -> bool {
        match self {
            SearchScope::All => true,
            SearchScope::Modules(modules) => modules.contains(&module),
        }
    }
}
