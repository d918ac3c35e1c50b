//! AnalysisHost — owns the workspace state and hands out query contexts.
//!
//! The host owns the class index, the mapper index and the alias declarations read
//! from configuration documents. Changes are applied through `&mut self`; queries run
//! against a [`WorkspaceContext`] taken from [`AnalysisHost::context`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_file_types("User.java", vec![TypeDecl::class("com.app.model.User")]);
//! host.set_file_content("UserMapper.xml", text)?;
//!
//! let ctx = host.context();
//! let user = ResolutionEngine::new().resolve_alias(&ctx, "User");
//! ```
//!
//! Indexes are shared with contexts copy-on-write: a context taken before a change
//! keeps seeing the workspace as it was.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::{FileId, ModuleId};
use crate::hir::{
    AliasDeclarations, AliasRegistry, AliasSource, BuiltinAliases, ClassIndex, MapperIndex,
    MappingDocument, SearchScope, TypeDecl, WorkspaceContext,
};
#[cfg(feature = "xml")]
use crate::project::{
    DocumentKind, LoadError, classify_document, parse_alias_declarations, parse_mapper,
};

/// Options for an [`AnalysisHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Register the framework's default aliases (`string`, `int`, `map`, ...) below
    /// the aliases declared in configuration documents.
    pub builtin_aliases: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            builtin_aliases: true,
        }
    }
}

/// Owns all mutable state of one workspace.
pub struct AnalysisHost {
    options: AnalysisOptions,
    classes: Arc<ClassIndex>,
    mappers: Arc<MapperIndex>,
    /// Alias declarations per configuration file, in load order.
    alias_declarations: IndexMap<FileId, AliasDeclarations>,
    aliases: AliasRegistry,
    /// Map from file path to FileId
    file_ids: FxHashMap<Arc<str>, FileId>,
    /// Reverse map from FileId to file path
    file_paths: FxHashMap<FileId, Arc<str>>,
    /// Whether the alias table needs rebuilding
    aliases_dirty: bool,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_options(AnalysisOptions::default())
    }

    pub fn with_options(options: AnalysisOptions) -> Self {
        Self {
            options,
            classes: Arc::new(ClassIndex::new()),
            mappers: Arc::new(MapperIndex::new()),
            alias_declarations: IndexMap::new(),
            aliases: AliasRegistry::new(),
            file_ids: FxHashMap::default(),
            file_paths: FxHashMap::default(),
            aliases_dirty: true,
        }
    }

    // ========================================================================
    // FILES
    // ========================================================================

    /// The id of `path`, allocating one on first use.
    pub fn file_id(&mut self, path: &str) -> FileId {
        if let Some(id) = self.file_ids.get(path) {
            return *id;
        }
        let id = FileId::new(self.file_ids.len() as u32);
        let path: Arc<str> = Arc::from(path);
        self.file_ids.insert(path.clone(), id);
        self.file_paths.insert(id, path);
        id
    }

    /// The id of `path`, if the host has seen it.
    pub fn lookup_file(&self, path: &str) -> Option<FileId> {
        self.file_ids.get(path).copied()
    }

    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.file_paths.get(&file).map(|p| p.as_ref())
    }

    /// Forget everything `path` contributed.
    pub fn remove_file(&mut self, path: &str) {
        let Some(file) = self.lookup_file(path) else {
            return;
        };
        Arc::make_mut(&mut self.classes).remove_file(file);
        Arc::make_mut(&mut self.mappers).remove_file(file);
        self.alias_declarations.shift_remove(&file);
        self.aliases_dirty = true;
    }

    // ========================================================================
    // DECLARATIONS
    // ========================================================================

    /// Replace the types declared by `path`.
    pub fn set_file_types(&mut self, path: &str, decls: Vec<TypeDecl>) -> FileId {
        let file = self.file_id(path);
        Arc::make_mut(&mut self.classes).set_file_types(file, decls);
        self.aliases_dirty = true;
        file
    }

    pub fn add_module_dependency(&mut self, module: ModuleId, dependency: ModuleId) {
        Arc::make_mut(&mut self.classes).add_module_dependency(module, dependency);
    }

    /// Mark the declaration graph as being (re)built. Queries resolve nothing
    /// meanwhile.
    pub fn set_indexing(&mut self, indexing: bool) {
        Arc::make_mut(&mut self.classes).set_indexing(indexing);
        Arc::make_mut(&mut self.mappers).set_indexing(indexing);
        self.aliases_dirty = true;
    }

    pub fn classes(&self) -> &ClassIndex {
        &self.classes
    }

    // ========================================================================
    // DOCUMENTS
    // ========================================================================

    /// Replace the mapping document of its file.
    pub fn set_mapping_document(&mut self, document: MappingDocument) {
        if self.alias_declarations.shift_remove(&document.file).is_some() {
            self.aliases_dirty = true;
        }
        Arc::make_mut(&mut self.mappers).set_document(document);
    }

    /// Replace the alias declarations contributed by `path`.
    pub fn set_alias_declarations(&mut self, path: &str, declarations: AliasDeclarations) -> FileId {
        let file = self.file_id(path);
        Arc::make_mut(&mut self.mappers).remove_file(file);
        self.alias_declarations.insert(file, declarations);
        self.aliases_dirty = true;
        file
    }

    pub fn mappers(&self) -> &MapperIndex {
        &self.mappers
    }

    /// Classify and load an XML document from its text.
    ///
    /// Mapping documents replace the file's previous document; configuration and
    /// bean documents replace its alias declarations. A document of any other kind
    /// clears what the file contributed and returns `Ok(None)`.
    #[cfg(feature = "xml")]
    pub fn set_file_content(
        &mut self,
        path: &str,
        content: &str,
    ) -> Result<Option<DocumentKind>, LoadError> {
        self.set_module_file_content(path, ModuleId::ROOT, content)
    }

    /// [`set_file_content`](Self::set_file_content) for a file of `module`.
    #[cfg(feature = "xml")]
    pub fn set_module_file_content(
        &mut self,
        path: &str,
        module: ModuleId,
        content: &str,
    ) -> Result<Option<DocumentKind>, LoadError> {
        let kind = classify_document(content)?;
        match kind {
            Some(DocumentKind::Mapper) => {
                let file = self.file_id(path);
                let document = parse_mapper(file, module, content)?.with_path(path);
                self.set_mapping_document(document);
            }
            Some(DocumentKind::Configuration | DocumentKind::Beans) => {
                let declarations = parse_alias_declarations(content)?;
                self.set_alias_declarations(path, declarations.into_iter().collect());
            }
            None => self.remove_file(path),
        }
        debug!("[HOST] {} loaded as {:?}", path, kind);
        Ok(kind)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// A query context over the current state, rebuilding the alias table first if
    /// declarations changed.
    pub fn context(&mut self) -> WorkspaceContext {
        if self.aliases_dirty {
            self.rebuild_aliases();
        }
        WorkspaceContext::new(
            self.classes.clone(),
            self.mappers.clone(),
            &self.aliases,
        )
    }

    /// Rebuild the alias table from the built-in defaults (if enabled) and every
    /// alias declaration, in load order.
    pub fn rebuild_aliases(&mut self) {
        let mut sources: Vec<&dyn AliasSource> = Vec::new();
        if self.options.builtin_aliases {
            sources.push(&BuiltinAliases);
        }
        sources.extend(
            self.alias_declarations
                .values()
                .map(|d| d as &dyn AliasSource),
        );
        self.aliases
            .rebuild(&sources, &*self.classes, &SearchScope::All);
        self.aliases_dirty = false;
    }
}
