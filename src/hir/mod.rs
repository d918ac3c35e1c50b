//! High-level IR (HIR) — the semantic model the resolvers run against.
//!
//! Two collaborators describe the workspace: the host language's
//! [`DeclarationGraph`] (classes, fields, methods) and the [`MarkupIndex`] of parsed
//! mapping documents. The [`AliasRegistry`] holds the current [`AliasTable`], rebuilt
//! wholesale from its [`AliasSource`]s. A [`WorkspaceContext`] bundles the three.
//!
//! ## Key Types
//!
//! - [`TypeSymbol`], [`FieldSymbol`], [`MethodSymbol`] — declaration handles
//! - [`ClassIndex`] — in-memory declaration graph
//! - [`MappingDocument`], [`StatementElement`] — parsed mapping documents
//! - [`MapperIndex`] — in-memory markup index
//!
//! ## Resolvers
//!
//! ```text
//! AliasResolver      token ("User", "com.app.User")   → TypeSymbol
//! NamespaceMatcher   TypeSymbol                       → MappingDocument*
//! StatementMatcher   MethodSymbol                     → StatementElement*
//! PropertyResolver   ("address.city", root type)      → FieldSymbol
//! ```
//!
//! Resolvers borrow their collaborators for the length of one query and hold no
//! state of their own.

mod alias;
mod class_index;
mod context;
mod mapping;
mod resolve;
mod scope;
mod symbols;

pub use alias::{
    AliasDeclaration, AliasDeclarations, AliasEntry, AliasRegistry, AliasSource, AliasTable,
    BuiltinAliases,
};
pub use class_index::{ClassIndex, DeclarationGraph};
pub use context::WorkspaceContext;
pub use mapping::{
    MapperIndex, MappingDocument, MarkupIndex, PropertyRef, StatementElement, StatementKind,
};
pub use resolve::{
    AliasResolver, Cancelled, NamespaceMatcher, PropertyResolver, ResolvedSegment,
    StatementMatcher, setter_names,
};
pub use scope::SearchScope;
pub use symbols::{
    FieldSymbol, MethodSymbol, TypeDecl, TypeKind, TypeRef, TypeSymbol, package_of,
    signature_id, simple_name,
};
