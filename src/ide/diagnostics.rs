//! Diagnostics — unresolved references in mapping documents.
//!
//! Every check is a resolution query; a reference that does not resolve becomes a
//! diagnostic. Documents without a namespace are skipped silently, since a document
//! being edited is often namespace-less for a moment.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::base::{FileId, TextRange};
use crate::hir::{Cancelled, MappingDocument, StatementElement, WorkspaceContext};

use super::engine::ResolutionEngine;
use super::strategy::{AttributeKind, property_root};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: FileId,
    /// Byte range in the document.
    pub range: TextRange,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn error(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, range, Severity::Error, message)
    }

    pub fn warning(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, range, Severity::Warning, message)
    }

    fn new(
        file: FileId,
        range: TextRange,
        severity: Severity,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file,
            range,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// - **E0001-E0099**: unresolved references
/// - **W0001-W0099**: suspicious but valid documents
pub mod codes {
    /// Namespace names no known type.
    pub const UNRESOLVED_NAMESPACE: &str = "E0001";
    /// Type attribute names no alias or known type.
    pub const UNRESOLVED_TYPE: &str = "E0002";
    /// Id reference names no element of the expected kind.
    pub const UNRESOLVED_REFERENCE: &str = "E0003";
    /// Property path does not resolve against its root type.
    pub const UNRESOLVED_PROPERTY: &str = "E0004";

    /// Statement whose id matches no method of the namespace type.
    pub const UNBOUND_STATEMENT: &str = "W0001";
}

// ============================================================================
// CHECKS
// ============================================================================

/// Check the indexed document of `file`.
pub fn check_file(ctx: &WorkspaceContext, file: FileId) -> Vec<Diagnostic> {
    ctx.markup()
        .document(file)
        .map(|document| check_document(ctx, &document))
        .unwrap_or_default()
}

/// Check a document against the workspace. The document need not be indexed.
pub fn check_document(ctx: &WorkspaceContext, document: &MappingDocument) -> Vec<Diagnostic> {
    check_document_with(ctx, document, &CancellationToken::new()).unwrap_or_default()
}

/// Like [`check_document`], stopping with [`Cancelled`] once `cancel` fires.
pub fn check_document_with(
    ctx: &WorkspaceContext,
    document: &MappingDocument,
    cancel: &CancellationToken,
) -> Result<Vec<Diagnostic>, Cancelled> {
    let engine = ResolutionEngine::new();
    let mut diagnostics = Vec::new();

    let Some(namespace) = document.declared_namespace() else {
        return Ok(diagnostics);
    };
    let bound = engine.resolve_namespace(ctx, document);
    if bound.is_none() {
        diagnostics.push(
            Diagnostic::error(
                document.file,
                document.namespace_range().unwrap_or_default(),
                format!("cannot resolve namespace '{namespace}'"),
            )
            .with_code(codes::UNRESOLVED_NAMESPACE),
        );
    }

    for statement in document.statements() {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        if bound.is_some()
            && statement.kind.is_statement()
            && engine.methods_in(ctx, document, statement).is_empty()
        {
            diagnostics.push(
                Diagnostic::warning(
                    document.file,
                    statement.range,
                    format!("no method '{}' in '{}'", statement.id, namespace),
                )
                .with_code(codes::UNBOUND_STATEMENT),
            );
        }
        check_attributes(ctx, &engine, document, statement, cancel, &mut diagnostics)?;
        check_properties(ctx, &engine, document, statement, &mut diagnostics);
    }

    debug!(
        "[DIAGNOSTICS] {} diagnostics for {}",
        diagnostics.len(),
        document.file
    );
    Ok(diagnostics)
}

fn check_attributes(
    ctx: &WorkspaceContext,
    engine: &ResolutionEngine,
    document: &MappingDocument,
    statement: &StatementElement,
    cancel: &CancellationToken,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), Cancelled> {
    for (name, value) in &statement.attributes {
        if value.trim().is_empty() {
            continue;
        }
        match AttributeKind::classify(statement.kind.tag(), name) {
            Some(AttributeKind::Alias) if engine.resolve_alias(ctx, value).is_none() => {
                diagnostics.push(
                    Diagnostic::error(
                        document.file,
                        statement.attribute_range(name),
                        format!("cannot resolve type '{value}'"),
                    )
                    .with_code(codes::UNRESOLVED_TYPE),
                );
            }
            Some(AttributeKind::IdRef(kind))
                if engine
                    .resolve_id_ref(ctx, document, value, kind, cancel)?
                    .is_empty() =>
            {
                diagnostics.push(
                    Diagnostic::error(
                        document.file,
                        statement.attribute_range(name),
                        format!("cannot resolve {} '{value}'", kind.tag()),
                    )
                    .with_code(codes::UNRESOLVED_REFERENCE),
                );
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_properties(
    ctx: &WorkspaceContext,
    engine: &ResolutionEngine,
    document: &MappingDocument,
    statement: &StatementElement,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if statement.property_refs.is_empty() {
        return;
    }
    let Some(root) = property_root(ctx, statement) else {
        return;
    };
    for property in &statement.property_refs {
        if engine
            .resolve_property_target(ctx, &property.path, &root)
            .is_none()
        {
            diagnostics.push(
                Diagnostic::error(
                    document.file,
                    property.range,
                    format!(
                        "cannot resolve property '{}' in '{}'",
                        property.path, root.qualified_name
                    ),
                )
                .with_code(codes::UNRESOLVED_PROPERTY),
            );
        }
    }
}
