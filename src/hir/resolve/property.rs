//! Property path resolution — `address.city` against a chain of fields and setters.
//!
//! Each segment resolves against the current type, first as a non-static field
//! (inherited fields included), then as a non-static single-argument setter. The
//! segment's declared type becomes the next current type. Interfaces and annotation
//! types never host properties.
//!
//! Setters are looked up under both spellings frameworks generate for a property
//! `oName`: `setOName` and `setoName`.

use tracing::trace;

use crate::base::constants::{DOT_SEPARATOR, SETTER_PREFIX};
use crate::hir::class_index::DeclarationGraph;
use crate::hir::scope::SearchScope;
use crate::hir::symbols::{FieldSymbol, MethodSymbol, TypeRef, TypeSymbol};

/// Outcome of resolving one segment. At least one of the two is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSegment {
    pub field: Option<FieldSymbol>,
    pub accessor: Option<MethodSymbol>,
}

impl ResolvedSegment {
    /// Declared type of the property: the field's type, else the setter's argument.
    pub fn ty(&self) -> Option<&TypeRef> {
        self.field
            .as_ref()
            .map(|f| &f.ty)
            .or_else(|| self.accessor.as_ref()?.parameter_types.first())
    }
}

/// Setter names accepted for a property: `set` + capitalized name, then `set` + name.
pub fn setter_names(property: &str) -> Vec<String> {
    let mut chars = property.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let capitalized: String = first.to_uppercase().chain(chars).collect();
    let conventional = format!("{SETTER_PREFIX}{capitalized}");
    let verbatim = format!("{SETTER_PREFIX}{property}");
    if conventional == verbatim {
        vec![conventional]
    } else {
        vec![conventional, verbatim]
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c == '$' || unicode_ident::is_xid_start(c))
        && chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
}

#[derive(Clone, Copy)]
pub struct PropertyResolver<'a> {
    graph: &'a dyn DeclarationGraph,
    scope: &'a SearchScope,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(graph: &'a dyn DeclarationGraph, scope: &'a SearchScope) -> Self {
        Self { graph, scope }
    }

    /// The field the last segment of `path` resolves to.
    ///
    /// `None` if any segment fails, or if the last segment only resolves to a setter.
    pub fn resolve(&self, path: &str, root: &TypeSymbol) -> Option<FieldSymbol> {
        self.resolve_target(path, root)?.field
    }

    /// The last segment of `path`, whether it resolved to a field or only a setter.
    pub fn resolve_target(&self, path: &str, root: &TypeSymbol) -> Option<ResolvedSegment> {
        self.resolve_chain(path, root)?.pop()
    }

    /// Every segment of `path`, in order. All-or-nothing.
    pub fn resolve_chain(&self, path: &str, root: &TypeSymbol) -> Option<Vec<ResolvedSegment>> {
        if !self.graph.is_ready() {
            return None;
        }
        let segments: Vec<&str> = path.trim().split(DOT_SEPARATOR).collect();
        if segments.iter().any(|s| !is_identifier(s)) {
            trace!("[PROPERTY] malformed path '{}'", path);
            return None;
        }

        let mut current = root.clone();
        let mut resolved = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let Some(step) = self.resolve_segment(segment, &current) else {
                trace!(
                    "[PROPERTY] '{}' not found on {}",
                    segment, current.qualified_name
                );
                return None;
            };
            if i + 1 < segments.len() {
                let ty = step.ty()?;
                current = self.graph.lookup_by_qualified_name(ty, self.scope)?;
            }
            resolved.push(step);
        }
        Some(resolved)
    }

    /// Resolve one segment against `ty`.
    pub fn resolve_segment(&self, name: &str, ty: &TypeSymbol) -> Option<ResolvedSegment> {
        if self.graph.is_interface_or_annotation(ty) {
            return None;
        }

        if let Some(field) = self.find_field(name, ty) {
            return Some(ResolvedSegment {
                field: Some(field),
                accessor: None,
            });
        }

        self.find_setter(name, ty).map(|accessor| ResolvedSegment {
            field: None,
            accessor: Some(accessor),
        })
    }

    /// Fields of `ty` (inherited included) usable as the first segment of a path.
    pub fn enumerate_settable_properties(&self, ty: &TypeSymbol) -> Vec<FieldSymbol> {
        if !self.graph.is_ready() {
            return Vec::new();
        }
        self.graph
            .all_fields(ty)
            .into_iter()
            .filter(|f| self.resolve_segment(&f.name, ty).is_some())
            .collect()
    }

    fn find_field(&self, name: &str, ty: &TypeSymbol) -> Option<FieldSymbol> {
        self.graph
            .all_fields(ty)
            .into_iter()
            .find(|f| !f.is_static && f.name == name)
    }

    fn find_setter(&self, name: &str, ty: &TypeSymbol) -> Option<MethodSymbol> {
        setter_names(name).iter().find_map(|setter| {
            self.graph
                .methods_by_name(ty, setter)
                .into_iter()
                .find(|m| !m.is_static && m.parameter_types.len() == 1)
        })
    }
}
