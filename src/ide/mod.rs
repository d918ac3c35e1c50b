//! IDE features — the query surface for navigation, completion and validation.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take a [`WorkspaceContext`](crate::hir::WorkspaceContext)
//!    and data in, return data out
//! 2. **No editor types**: Ranges are byte ranges, converted at the editor boundary
//! 3. **Composable**: Built on top of the HIR resolvers
//!
//! ## Usage
//!
//! ```ignore
//! use mapperlink::ide::{AnalysisHost, ResolutionEngine};
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("UserMapper.xml", text)?;
//!
//! let ctx = host.context();
//! let engine = ResolutionEngine::new();
//! let statements = engine.find_statements(&ctx, &method, &cancel)?;
//! ```

mod analysis;
mod completion;
mod diagnostics;
mod engine;
mod rebind;
mod strategy;

pub use analysis::{AnalysisHost, AnalysisOptions};
pub use completion::{CompletionItem, CompletionKind, alias_completions, property_completions};
pub use diagnostics::{Diagnostic, Severity, check_document, check_document_with, check_file, codes};
pub use engine::ResolutionEngine;
pub use rebind::rebind_namespace;
pub use strategy::{AttributeKind, AttributeQuery, ResolvedTarget, property_root, resolve_attribute};
