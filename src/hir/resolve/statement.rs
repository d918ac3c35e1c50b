//! Statement matching — mapper methods ↔ statement elements.
//!
//! A statement's signature id is `<resolved namespace>.<id>`; a method's is
//! `<owner>.<name>`. A query against a method also accepts statements written for
//! any type inheriting from the method's owner, so a statement bound to an overriding
//! mapper satisfies a query on the base declaration.

use rustc_hash::FxHashSet;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::Cancelled;
use super::namespace::NamespaceMatcher;
use crate::base::constants::DOT_SEPARATOR;
use crate::hir::class_index::DeclarationGraph;
use crate::hir::mapping::{MappingDocument, MarkupIndex, StatementElement, StatementKind};
use crate::hir::scope::SearchScope;
use crate::hir::symbols::{MethodSymbol, signature_id};

#[derive(Clone, Copy)]
pub struct StatementMatcher<'a> {
    graph: &'a dyn DeclarationGraph,
    markup: &'a dyn MarkupIndex,
    scope: &'a SearchScope,
}

impl<'a> StatementMatcher<'a> {
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

    /// Signature ids a statement may carry to match `method`: the method's own id plus
    /// `<subtype>.<name>` for every transitive subtype of its owner.
    pub fn candidate_ids(&self, method: &MethodSymbol) -> FxHashSet<String> {
        let mut ids = FxHashSet::default();
        ids.insert(method.signature_id());

        if let Some(owner) = self
            .graph
            .lookup_by_qualified_name(&method.owner, &SearchScope::All)
        {
            for subtype in self.graph.inheritors_of(&owner) {
                ids.insert(signature_id(&subtype.qualified_name, &method.name));
            }
        }
        ids
    }

    /// Every statement element matching `method`, across all visible documents.
    pub fn find_statements(
        &self,
        method: &MethodSymbol,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatementElement>, Cancelled> {
        let mut found = Vec::new();
        self.scan(method, cancel, |statement| {
            found.push(statement.clone());
            true
        })?;
        Ok(found)
    }

    pub fn first_statement(
        &self,
        method: &MethodSymbol,
        cancel: &CancellationToken,
    ) -> Result<Option<StatementElement>, Cancelled> {
        let mut found = None;
        self.scan(method, cancel, |statement| {
            found = Some(statement.clone());
            false
        })?;
        Ok(found)
    }

    /// Signature ids are recomputed from the live documents on every scan.
    fn scan(
        &self,
        method: &MethodSymbol,
        cancel: &CancellationToken,
        mut accept: impl FnMut(&StatementElement) -> bool,
    ) -> Result<(), Cancelled> {
        if !self.graph.is_ready() || !self.markup.is_ready() {
            return Ok(());
        }

        let ids = self.candidate_ids(method);
        trace!("[STATEMENT] {} candidate ids: {:?}", method.name, ids);
        let namespaces = NamespaceMatcher::new(self.graph, self.markup, self.scope);

        for document in self.markup.all_mapping_documents(self.scope) {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            let Some(bound) = namespaces.resolve_namespace(&document) else {
                continue;
            };
            for statement in document.dao_elements() {
                if ids.contains(&signature_id(&bound.qualified_name, &statement.id))
                    && !accept(statement)
                {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Methods a statement element binds to: methods of the namespace type (including
    /// inherited ones) named like the statement id.
    pub fn find_methods(&self, statement: &StatementElement) -> Vec<MethodSymbol> {
        self.markup
            .document(statement.file)
            .map(|document| self.methods_for(&document, statement))
            .unwrap_or_default()
    }

    /// Like [`find_methods`](Self::find_methods), against a document the caller
    /// already holds (which need not be indexed yet).
    pub fn methods_for(
        &self,
        document: &MappingDocument,
        statement: &StatementElement,
    ) -> Vec<MethodSymbol> {
        if !statement.kind.is_statement() {
            return Vec::new();
        }
        let namespaces = NamespaceMatcher::new(self.graph, self.markup, self.scope);
        namespaces
            .resolve_namespace(document)
            .map(|owner| self.graph.methods_by_name(&owner, &statement.id))
            .unwrap_or_default()
    }

    /// Resolve an id reference (`refid`, `resultMap`, `extends`, `parameterMap`).
    ///
    /// A plain id is looked up in `from`; `namespace.id` in every document whose
    /// declared namespace is textually `namespace`. Only the cross-document lookup
    /// polls `cancel`.
    pub fn resolve_id_ref(
        &self,
        from: &MappingDocument,
        reference: &str,
        kind: StatementKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatementElement>, Cancelled> {
        let reference = reference.trim();
        let Some((namespace, id)) = reference.rsplit_once(DOT_SEPARATOR) else {
            return Ok(from
                .statement(reference)
                .filter(|s| s.kind == kind)
                .cloned()
                .into_iter()
                .collect());
        };
        if namespace.is_empty() || id.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for document in self.markup.all_mapping_documents(self.scope) {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            if document.declared_namespace() != Some(namespace) {
                continue;
            }
            if let Some(statement) = document.statement(id).filter(|s| s.kind == kind) {
                found.push(statement.clone());
            }
        }
        Ok(found)
    }

}
