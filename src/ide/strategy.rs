//! Attribute strategies — which resolver an attribute value goes through.
//!
//! Every reference-bearing attribute of a mapping document falls into one of a
//! closed set of kinds, decided from the tag and attribute names alone.

use crate::base::constants::{
    EXTENDS_ATTR, ID_ATTR, INCLUDE_TAG, JAVA_TYPE_ATTR, MAPPER_TAG, NAMESPACE_ATTR,
    OF_TYPE_ATTR, PARAMETER_MAP_ATTR, PARAMETER_TYPE_ATTR, PROPERTY_ATTR, REFID_ATTR,
    RESULT_MAP_ATTR, RESULT_MAP_TAG, RESULT_TYPE_ATTR, TYPE_ALIAS_TAG, TYPE_ATTR,
};
use tokio_util::sync::CancellationToken;

use crate::hir::{
    MappingDocument, MethodSymbol, ResolvedSegment, StatementElement, StatementKind,
    TypeSymbol, WorkspaceContext,
};

use super::engine::ResolutionEngine;

/// How an attribute value is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// A type token: alias or qualified name (`resultType`, `parameterType`, ...).
    Alias,
    /// The document's `namespace`, always a qualified name.
    Namespace,
    /// The `id` of a statement, bound to mapper methods.
    StatementId,
    /// A reference to another id-bearing element of the given kind.
    IdRef(StatementKind),
    /// A dotted property path against the enclosing element's root type.
    PropertyPath,
}

impl AttributeKind {
    pub fn classify(tag: &str, attribute: &str) -> Option<Self> {
        let is_statement = StatementKind::from_tag(tag).is_some_and(StatementKind::is_statement);
        let kind = match (tag, attribute) {
            (MAPPER_TAG, NAMESPACE_ATTR) => Self::Namespace,
            (_, ID_ATTR) if is_statement => Self::StatementId,
            (_, RESULT_TYPE_ATTR | PARAMETER_TYPE_ATTR | JAVA_TYPE_ATTR | OF_TYPE_ATTR) => {
                Self::Alias
            }
            (RESULT_MAP_TAG | TYPE_ALIAS_TAG, TYPE_ATTR) => Self::Alias,
            (INCLUDE_TAG, REFID_ATTR) => Self::IdRef(StatementKind::Sql),
            (RESULT_MAP_TAG, EXTENDS_ATTR) | (_, RESULT_MAP_ATTR) => {
                Self::IdRef(StatementKind::ResultMap)
            }
            (_, PARAMETER_MAP_ATTR) => Self::IdRef(StatementKind::ParameterMap),
            (_, PROPERTY_ATTR) => Self::PropertyPath,
            _ => return None,
        };
        Some(kind)
    }
}

/// One attribute occurrence to resolve.
#[derive(Clone, Copy, Debug)]
pub struct AttributeQuery<'a> {
    pub document: &'a MappingDocument,
    /// The id-bearing element the attribute sits on or under, if any.
    pub element: Option<&'a StatementElement>,
    pub tag: &'a str,
    pub attribute: &'a str,
    pub value: &'a str,
}

/// What an attribute value resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedTarget {
    Type(TypeSymbol),
    Methods(Vec<MethodSymbol>),
    Elements(Vec<StatementElement>),
    Property(ResolvedSegment),
}

/// Resolve an attribute value with the strategy its kind selects.
///
/// `None` when the attribute carries no reference or nothing matches.
pub fn resolve_attribute(ctx: &WorkspaceContext, query: &AttributeQuery<'_>) -> Option<ResolvedTarget> {
    let engine = ResolutionEngine::new();
    match AttributeKind::classify(query.tag, query.attribute)? {
        AttributeKind::Alias => engine.resolve_alias(ctx, query.value).map(ResolvedTarget::Type),
        AttributeKind::Namespace => {
            let namespace = query.value.trim();
            if namespace.is_empty() || !ctx.graph().is_ready() {
                return None;
            }
            ctx.graph()
                .lookup_by_qualified_name(namespace, ctx.scope())
                .map(ResolvedTarget::Type)
        }
        AttributeKind::StatementId => {
            let methods = engine.methods_in(ctx, query.document, query.element?);
            non_empty(methods).map(ResolvedTarget::Methods)
        }
        AttributeKind::IdRef(kind) => {
            // Single-attribute lookups run to completion.
            let elements = engine
                .resolve_id_ref(ctx, query.document, query.value, kind, &CancellationToken::new())
                .ok()?;
            non_empty(elements).map(ResolvedTarget::Elements)
        }
        AttributeKind::PropertyPath => {
            let root = property_root(ctx, query.element?)?;
            engine
                .resolve_property_target(ctx, query.value, &root)
                .map(ResolvedTarget::Property)
        }
    }
}

/// The type property paths under `element` resolve against: a result map's `type`,
/// or a statement's `parameterType`.
pub fn property_root(ctx: &WorkspaceContext, element: &StatementElement) -> Option<TypeSymbol> {
    let token = match element.kind {
        StatementKind::ResultMap => element.attribute(TYPE_ATTR),
        kind if kind.is_statement() => element.attribute(PARAMETER_TYPE_ATTR),
        _ => None,
    }?;
    ResolutionEngine::new().resolve_alias(ctx, token)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
