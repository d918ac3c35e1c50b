//! Workspace context — the collaborators every resolution query reads from.

use std::fmt;
use std::sync::Arc;

use super::alias::{AliasRegistry, AliasTable};
use super::class_index::DeclarationGraph;
use super::mapping::MarkupIndex;
use super::scope::SearchScope;

/// Handles to the declaration graph, the markup index and the alias table of one
/// open workspace, plus the scope queries are restricted to.
///
/// The alias table is captured when the context is created, so a context reads one
/// consistent snapshot even if the registry is rebuilt afterwards. Cloning is cheap.
/// A context is passed into every query; there is no ambient global state.
#[derive(Clone)]
pub struct WorkspaceContext {
    graph: Arc<dyn DeclarationGraph>,
    markup: Arc<dyn MarkupIndex>,
    aliases: Arc<AliasTable>,
    scope: SearchScope,
}

impl WorkspaceContext {
    pub fn new(
        graph: Arc<dyn DeclarationGraph>,
        markup: Arc<dyn MarkupIndex>,
        aliases: &AliasRegistry,
    ) -> Self {
        Self {
            graph,
            markup,
            aliases: aliases.snapshot(),
            scope: SearchScope::All,
        }
    }

    /// The same workspace, restricted to `scope`.
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn graph(&self) -> &dyn DeclarationGraph {
        &*self.graph
    }

    pub fn markup(&self) -> &dyn MarkupIndex {
        &*self.markup
    }

    /// The alias table as it was when this context was created.
    pub fn alias_table(&self) -> Arc<AliasTable> {
        self.aliases.clone()
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }
}

impl fmt::Debug for WorkspaceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceContext")
            .field("scope", &self.scope)
            .field("aliases", &self.aliases.len())
            .field("graph_ready", &self.graph.is_ready())
            .field("markup_ready", &self.markup.is_ready())
            .finish_non_exhaustive()
    }
}
