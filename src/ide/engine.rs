//! Resolution engine — the query surface consumed by navigation, completion and
//! validation.
//!
//! The engine is stateless. Each call builds the resolver it needs over the
//! collaborators of the given [`WorkspaceContext`], takes one alias-table snapshot
//! where aliases matter, and returns owned results.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::hir::{
    AliasResolver, Cancelled, FieldSymbol, MappingDocument, MethodSymbol, NamespaceMatcher,
    PropertyResolver, ResolvedSegment, StatementElement, StatementKind, StatementMatcher,
    TypeSymbol, WorkspaceContext,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct ResolutionEngine;

impl ResolutionEngine {
    pub fn new() -> Self {
        Self
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    /// Resolve a type token: an alias if it has no `.`, a qualified name otherwise.
    pub fn resolve_alias(&self, ctx: &WorkspaceContext, token: &str) -> Option<TypeSymbol> {
        let table = ctx.alias_table();
        AliasResolver::new(&table, ctx.graph(), ctx.scope()).resolve(token)
    }

    // ========================================================================
    // NAMESPACES
    // ========================================================================

    pub fn resolve_namespace(
        &self,
        ctx: &WorkspaceContext,
        document: &MappingDocument,
    ) -> Option<TypeSymbol> {
        self.namespaces(ctx).resolve_namespace(document)
    }

    pub fn matching_mappers(
        &self,
        ctx: &WorkspaceContext,
        target: &TypeSymbol,
        cancel: &CancellationToken,
    ) -> Result<Vec<Arc<MappingDocument>>, Cancelled> {
        self.namespaces(ctx).matching_mappers(target, cancel)
    }

    pub fn first_mapper(
        &self,
        ctx: &WorkspaceContext,
        target: &TypeSymbol,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<MappingDocument>>, Cancelled> {
        self.namespaces(ctx).first_mapper(target, cancel)
    }

    fn namespaces<'a>(&self, ctx: &'a WorkspaceContext) -> NamespaceMatcher<'a> {
        NamespaceMatcher::new(ctx.graph(), ctx.markup(), ctx.scope())
    }

    // ========================================================================
    // STATEMENTS
    // ========================================================================

    pub fn find_statements(
        &self,
        ctx: &WorkspaceContext,
        method: &MethodSymbol,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatementElement>, Cancelled> {
        self.statements(ctx).find_statements(method, cancel)
    }

    pub fn first_statement(
        &self,
        ctx: &WorkspaceContext,
        method: &MethodSymbol,
        cancel: &CancellationToken,
    ) -> Result<Option<StatementElement>, Cancelled> {
        self.statements(ctx).first_statement(method, cancel)
    }

    pub fn find_methods(
        &self,
        ctx: &WorkspaceContext,
        statement: &StatementElement,
    ) -> Vec<MethodSymbol> {
        self.statements(ctx).find_methods(statement)
    }

    /// Methods bound to `statement`, resolved against a document the caller holds.
    pub fn methods_in(
        &self,
        ctx: &WorkspaceContext,
        document: &MappingDocument,
        statement: &StatementElement,
    ) -> Vec<MethodSymbol> {
        self.statements(ctx).methods_for(document, statement)
    }

    pub fn resolve_id_ref(
        &self,
        ctx: &WorkspaceContext,
        from: &MappingDocument,
        reference: &str,
        kind: StatementKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<StatementElement>, Cancelled> {
        self.statements(ctx).resolve_id_ref(from, reference, kind, cancel)
    }

    fn statements<'a>(&self, ctx: &'a WorkspaceContext) -> StatementMatcher<'a> {
        StatementMatcher::new(ctx.graph(), ctx.markup(), ctx.scope())
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    pub fn resolve_property_path(
        &self,
        ctx: &WorkspaceContext,
        path: &str,
        root: &TypeSymbol,
    ) -> Option<FieldSymbol> {
        self.properties(ctx).resolve(path, root)
    }

    /// Like [`resolve_property_path`](Self::resolve_property_path), but a final
    /// setter-only segment also counts.
    pub fn resolve_property_target(
        &self,
        ctx: &WorkspaceContext,
        path: &str,
        root: &TypeSymbol,
    ) -> Option<ResolvedSegment> {
        self.properties(ctx).resolve_target(path, root)
    }

    pub fn enumerate_settable_properties(
        &self,
        ctx: &WorkspaceContext,
        ty: &TypeSymbol,
    ) -> Vec<FieldSymbol> {
        self.properties(ctx).enumerate_settable_properties(ty)
    }

    fn properties<'a>(&self, ctx: &'a WorkspaceContext) -> PropertyResolver<'a> {
        PropertyResolver::new(ctx.graph(), ctx.scope())
    }
}
