//! # mapperlink-base
//!
//! Cross-document symbol resolution between mapper XML documents and the classes,
//! methods and fields of the host language they reference.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Resolution engine, attribute strategies, completion, diagnostics
//!   ↓
//! project   → XML document loading, workspace loading
//!   ↓
//! hir       → Declaration graph, markup index, alias table, resolvers
//!   ↓
//! base      → Primitives (FileId, ModuleId, TextRange, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → project → ide)
// ============================================================================

/// Foundation types: FileId, ModuleId, TextRange
pub mod base;

/// High-level IR: declarations, mapping documents, aliases, resolvers
pub mod hir;

/// Project management: document classification and loading
pub mod project;

/// IDE features: resolution engine, completion, diagnostics
pub mod ide;

// Re-export foundation types
pub use base::{FileId, ModuleId, TextRange, TextSize};

// Re-export the query surface
pub use hir::{Cancelled, WorkspaceContext};
pub use ide::{AnalysisHost, ResolutionEngine};
