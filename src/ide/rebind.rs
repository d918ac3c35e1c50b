//! Pointing a mapping document at a different mapper type.

use crate::hir::{MappingDocument, TypeSymbol};

/// A copy of `document` whose namespace names `target`.
///
/// The input is left untouched; the caller swaps the result into its index. The
/// old namespace range no longer points at the namespace text, so it is dropped.
pub fn rebind_namespace(document: &MappingDocument, target: &TypeSymbol) -> MappingDocument {
    document
        .clone()
        .with_namespace(&target.qualified_name)
        .without_namespace_range()
}
