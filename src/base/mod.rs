//! Foundation types for mapperlink.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Identifier of a document known to the workspace
//! - [`ModuleId`] - Identifier of a module (a unit of visibility)
//! - [`TextRange`], [`TextSize`] - Byte ranges inside documents
//! - Domain constants (separators, tag and attribute names)
//!
//! This module has NO dependencies on other mapperlink modules.

pub mod constants;
mod ids;

pub use ids::{FileId, ModuleId};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
