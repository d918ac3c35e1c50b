//! Project management — reading documents into the workspace.
//!
//! Documents are classified by root element ([`DocumentKind`]): mapping documents
//! feed the markup index, configuration and bean documents feed the alias table.

mod error;
mod file_kind;
#[cfg(feature = "xml")]
pub mod workspace_loader;
#[cfg(feature = "xml")]
mod xml_loader;

pub use error::LoadError;
pub use file_kind::DocumentKind;
#[cfg(feature = "xml")]
pub use workspace_loader::{LoadOptions, WorkspaceLoader};
#[cfg(feature = "xml")]
pub use xml_loader::{classify_document, parse_alias_declarations, parse_mapper};
