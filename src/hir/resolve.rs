//! Cross-document resolution — the four resolvers behind the engine façade.
//!
//! Every resolver borrows its collaborators for the duration of one query and keeps
//! nothing afterwards:
//!
//! - [`AliasResolver`] - textual type token → type (alias table, then qualified lookup)
//! - [`NamespaceMatcher`] - mapping document namespace ↔ mapper interface
//! - [`StatementMatcher`] - mapper method ↔ statement elements, override-aware
//! - [`PropertyResolver`] - dotted property path → field / setter chain
//!
//! Missing matches are never errors. The only error a query reports is
//! [`Cancelled`], from the scans that poll a cancellation token.

mod alias;
mod namespace;
mod property;
mod statement;

pub use alias::AliasResolver;
pub use namespace::NamespaceMatcher;
pub use property::{PropertyResolver, ResolvedSegment, setter_names};
pub use statement::StatementMatcher;

use thiserror::Error;

/// A scanning query was superseded before it finished.
///
/// This is "no result yet", not a negative answer: callers re-query instead of
/// treating it as "nothing found".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("resolution query was cancelled")]
pub struct Cancelled;
