//! Namespace matching between mapping documents and mapper interfaces.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::Cancelled;
use crate::hir::class_index::DeclarationGraph;
use crate::hir::mapping::{MappingDocument, MarkupIndex};
use crate::hir::scope::SearchScope;
use crate::hir::symbols::TypeSymbol;

/// Resolves declared namespaces and finds the documents bound to a type.
///
/// Namespaces are always fully qualified; aliases never apply to them.
#[derive(Clone, Copy)]
pub struct NamespaceMatcher<'a> {
    graph: &'a dyn DeclarationGraph,
    markup: &'a dyn MarkupIndex,
    scope: &'a SearchScope,
}

impl<'a> NamespaceMatcher<'a> {
    pub fn new(
        graph: &'a dyn DeclarationGraph,
        markup: &'a dyn MarkupIndex,
        scope: &'a SearchScope,
    ) -> Self {
        Self {
            graph,
            markup,
            scope,
        }
    }

    /// The type a document's namespace denotes, if it has one and it resolves.
    pub fn resolve_namespace(&self, document: &MappingDocument) -> Option<TypeSymbol> {
        if !self.graph.is_ready() {
            return None;
        }
        let namespace = document.declared_namespace()?;
        self.graph.lookup_by_qualified_name(namespace, self.scope)
    }

    /// Every document whose namespace resolves to `target`, in discovery order.
    ///
    /// The token is polled between documents.
    pub fn matching_mappers(
        &self,
        target: &TypeSymbol,
        cancel: &CancellationToken,
    ) -> Result<Vec<Arc<MappingDocument>>, Cancelled> {
        let mut found = Vec::new();
        self.scan(target, cancel, |doc| {
            found.push(doc);
            true
        })?;
        Ok(found)
    }

    /// The first document bound to `target`.
    pub fn first_mapper(
        &self,
        target: &TypeSymbol,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<MappingDocument>>, Cancelled> {
        let mut found = None;
        self.scan(target, cancel, |doc| {
            found = Some(doc);
            false
        })?;
        Ok(found)
    }

    /// Feed matching documents to `accept` until it returns `false`.
    fn scan(
        &self,
        target: &TypeSymbol,
        cancel: &CancellationToken,
        mut accept: impl FnMut(Arc<MappingDocument>) -> bool,
    ) -> Result<(), Cancelled> {
        if !self.markup.is_ready() {
            return Ok(());
        }
        for document in self.markup.all_mapping_documents(self.scope) {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            let Some(bound) = self.resolve_namespace(&document) else {
                continue;
            };
            if bound.qualified_name == target.qualified_name {
                trace!(
                    "[NAMESPACE] {} bound by {}",
                    target.qualified_name, document.file
                );
                if !accept(document) {
                    break;
                }
            }
        }
        Ok(())
    }
}
