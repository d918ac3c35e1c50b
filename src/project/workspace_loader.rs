use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use super::error::LoadError;
use crate::ide::AnalysisHost;

/// Which files [`WorkspaceLoader`] reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// File extensions to load, without the dot.
    pub extensions: Vec<String>,
    /// Skip files and directories whose name starts with `.`.
    pub skip_hidden: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["xml".to_string()],
            skip_hidden: true,
        }
    }
}

/// Loads workspace files into an [`AnalysisHost`].
#[derive(Clone, Debug, Default)]
pub struct WorkspaceLoader {
    options: LoadOptions,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Loads every matching file under `path` into `host`.
    ///
    /// Files are read in parallel. Documents the host does not recognise are
    /// ignored. Per-file failures do not stop the load; they are returned together
    /// as [`LoadError::Multiple`]. On success, returns the number of documents loaded.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(LoadError::NotADirectory(path));
        }

        let mut paths = Vec::new();
        self.collect_file_paths(&path, &mut paths)?;
        paths.sort();

        let contents: Vec<_> = paths
            .par_iter()
            .map(|path| {
                let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e));
                (path.clone(), text)
            })
            .collect();

        let mut loaded = 0;
        let mut errors = Vec::new();
        for (path, text) in contents {
            let result = text.and_then(|text| {
                host.set_file_content(&path.to_string_lossy(), &text)
            });
            match result {
                Ok(Some(_)) => loaded += 1,
                Ok(None) => debug!("[LOAD] {} is not a mapping document, skipped", path.display()),
                Err(e) => {
                    warn!("[LOAD] failed to load {}: {}", path.display(), e);
                    errors.push((path, e));
                }
            }
        }

        debug!(
            "[LOAD] {} document(s) loaded from {}, {} failure(s)",
            loaded,
            path.display(),
            errors.len()
        );
        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Multiple(errors))
        }
    }

    /// Loads a single file into `host`.
    pub fn load_file_into_host<P: AsRef<Path>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        host.set_file_content(&path.to_string_lossy(), &text)?;
        Ok(())
    }

    fn collect_file_paths(&self, dir: &Path, results: &mut Vec<PathBuf>) -> Result<(), LoadError> {
        let entries = std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| LoadError::io(dir, e))?;
            let path = entry.path();
            if self.options.skip_hidden && is_hidden(&path) {
                continue;
            }

            if path.is_dir() {
                self.collect_file_paths(&path, results)?;
            } else if path.is_file() && self.has_wanted_extension(&path) {
                results.push(path);
            }
        }
        Ok(())
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.options
                    .extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
