//! Error types for loading mapping and configuration documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a document into the workspace.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error while reading a file or directory.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML.
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// A required attribute is missing from an element.
    #[error("Missing required attribute '{attribute}' on <{tag}>")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },

    /// The document's root element is not the one the loader expects.
    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// A path that must be a directory is not one.
    #[error("Directory not found: {0}")]
    NotADirectory(PathBuf),

    /// Several files of one directory failed to load.
    #[error("Failed to load {} file(s):\n  {}", .0.len(), join_failures(.0))]
    Multiple(Vec<(PathBuf, LoadError)>),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn xml(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    pub fn missing_attribute(tag: &'static str, attribute: &'static str) -> Self {
        Self::MissingAttribute { tag, attribute }
    }
}

fn join_failures(failures: &[(PathBuf, LoadError)]) -> String {
    failures
        .iter()
        .map(|(path, error)| format!("{}: {}", path.display(), error))
        .collect::<Vec<_>>()
        .join("\n  ")
}
