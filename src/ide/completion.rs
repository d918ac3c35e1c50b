//! Completion of property paths and type aliases.

use std::sync::Arc;

use crate::base::constants::DOT_SEPARATOR;
use crate::hir::{PropertyResolver, TypeSymbol, WorkspaceContext};

/// The kind of a completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Property,
    Alias,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Property => 10, // Property
            CompletionKind::Alias => 7,     // Class
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Detail text (property type, alias target).
    pub detail: Option<Arc<str>>,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Suggestions for the last segment of a partially typed property path.
///
/// `"address.ci"` offers the settable properties of `address`'s type starting with
/// `ci`. Nothing is offered when the typed prefix does not resolve.
pub fn property_completions(
    ctx: &WorkspaceContext,
    root: &TypeSymbol,
    partial: &str,
) -> Vec<CompletionItem> {
    let resolver = PropertyResolver::new(ctx.graph(), ctx.scope());
    let partial = partial.trim_start();
    let (host, stem) = match partial.rsplit_once(DOT_SEPARATOR) {
        None => (Some(root.clone()), partial),
        Some((prefix, stem)) => {
            let host = resolver
                .resolve_target(prefix, root)
                .and_then(|segment| segment.ty().cloned())
                .and_then(|ty| ctx.graph().lookup_by_qualified_name(&ty, ctx.scope()));
            (host, stem)
        }
    };
    let Some(host) = host else {
        return Vec::new();
    };

    resolver
        .enumerate_settable_properties(&host)
        .into_iter()
        .filter(|field| field.name.starts_with(stem))
        .map(|field| {
            CompletionItem::new(field.name.as_str(), CompletionKind::Property).with_detail(field.ty)
        })
        .collect()
}

/// Aliases of the current alias table starting with `prefix`, sorted by label.
pub fn alias_completions(ctx: &WorkspaceContext, prefix: &str) -> Vec<CompletionItem> {
    let table = ctx.alias_table();
    let mut items: Vec<_> = table
        .entries()
        .filter(|(alias, target)| alias.starts_with(prefix) && ctx.scope().contains(target.module))
        .map(|(alias, target)| {
            CompletionItem::new(alias.as_str(), CompletionKind::Alias)
                .with_detail(target.qualified_name.clone())
        })
        .collect();
    items.sort_by(|a, b| a.label.cmp(&b.label));
    items
}
