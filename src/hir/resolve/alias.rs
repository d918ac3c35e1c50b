//! Type token resolution: aliases first, fully qualified names otherwise.

use tracing::trace;

use crate::base::constants::DOT_SEPARATOR;
use crate::hir::alias::AliasTable;
use crate::hir::class_index::DeclarationGraph;
use crate::hir::scope::SearchScope;
use crate::hir::symbols::TypeSymbol;

/// Resolves the value of a type-valued attribute (`resultType="User"`).
///
/// A token without a `.` is only ever an alias; a token with one is only ever a
/// fully qualified name. The two lookups never fall back to each other.
#[derive(Clone, Copy)]
pub struct AliasResolver<'a> {
    table: &'a AliasTable,
    graph: &'a dyn DeclarationGraph,
    scope: &'a SearchScope,
}

impl<'a> AliasResolver<'a> {
    pub fn new(
        table: &'a AliasTable,
        graph: &'a dyn DeclarationGraph,
        scope: &'a SearchScope,
    ) -> Self {
        Self { table, graph, scope }
    }

    pub fn resolve(&self, token: &str) -> Option<TypeSymbol> {
        let token = token.trim();
        if token.is_empty() || !self.graph.is_ready() {
            return None;
        }

        if !token.contains(DOT_SEPARATOR) {
            let target = self.table.get(token)?;
            trace!("[ALIAS] '{}' -> {}", token, target.qualified_name);
            return self.scope.contains(target.module).then(|| target.clone());
        }

        self.graph.lookup_by_qualified_name(token, self.scope)
    }
}
