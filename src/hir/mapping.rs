//! Markup model — mapping documents and the id-bearing elements they declare.
//!
//! A [`MappingDocument`] is immutable once built. Re-parsing a file produces a new
//! document that replaces the old one wholesale in the [`MarkupIndex`]; nothing
//! derived from a document outlives it.

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::scope::SearchScope;
use crate::base::{FileId, ModuleId, TextRange};

// ============================================================================
// ELEMENTS
// ============================================================================

/// Tag of an id-bearing element inside a mapping document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Sql,
    ResultMap,
    ParameterMap,
}

impl StatementKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "select" => Self::Select,
            "insert" => Self::Insert,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "sql" => Self::Sql,
            "resultMap" => Self::ResultMap,
            "parameterMap" => Self::ParameterMap,
            _ => return None,
        })
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Sql => "sql",
            Self::ResultMap => "resultMap",
            Self::ParameterMap => "parameterMap",
        }
    }

    /// Statement kinds are the ones bound to mapper-interface methods.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Select | Self::Insert | Self::Update | Self::Delete
        )
    }
}

/// A `property="..."` reference on a direct child of an element
/// (`<id property="id"/>`, `<result property="address.city"/>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRef {
    pub path: SmolStr,
    pub range: TextRange,
}

/// An id-bearing element of a mapping document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementElement {
    /// The `id` attribute, unique within the document.
    pub id: SmolStr,
    pub kind: StatementKind,
    /// The owning document.
    pub file: FileId,
    /// Range of the element's start tag.
    pub range: TextRange,
    /// Attributes of the start tag, in document order (includes `id`).
    pub attributes: IndexMap<SmolStr, String>,
    /// Ranges of attribute values, keyed like `attributes`. Missing when unknown.
    pub attribute_ranges: IndexMap<SmolStr, TextRange>,
    pub property_refs: Vec<PropertyRef>,
}

impl StatementElement {
    pub fn new(id: &str, kind: StatementKind, file: FileId) -> Self {
        Self {
            id: SmolStr::new(id),
            kind,
            file,
            range: TextRange::default(),
            attributes: IndexMap::new(),
            attribute_ranges: IndexMap::new(),
            property_refs: Vec::new(),
        }
    }

    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(SmolStr::new(name), value.to_string());
        self
    }

    pub fn with_attribute_range(mut self, name: &str, range: TextRange) -> Self {
        self.attribute_ranges.insert(SmolStr::new(name), range);
        self
    }

    pub fn with_property_ref(mut self, path: &str, range: TextRange) -> Self {
        self.property_refs.push(PropertyRef {
            path: SmolStr::new(path),
            range,
        });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Range of the value of attribute `name`, falling back to the start tag.
    pub fn attribute_range(&self, name: &str) -> TextRange {
        self.attribute_ranges.get(name).copied().unwrap_or(self.range)
    }
}

// ============================================================================
// DOCUMENTS
// ============================================================================

/// A parsed mapping document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingDocument {
    pub file: FileId,
    pub module: ModuleId,
    /// Path the document was loaded from, if any.
    pub path: Option<Arc<str>>,
    namespace: Option<Arc<str>>,
    namespace_range: Option<TextRange>,
    /// Elements keyed by id, in document order.
    statements: IndexMap<SmolStr, StatementElement>,
}

impl MappingDocument {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            module: ModuleId::ROOT,
            path: None,
            namespace: None,
            namespace_range: None,
            statements: IndexMap::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(Arc::from(namespace));
        self
    }

    pub fn with_namespace_range(mut self, range: TextRange) -> Self {
        self.namespace_range = Some(range);
        self
    }

    /// Forget where the namespace was written, e.g. after it was replaced.
    pub fn without_namespace_range(mut self) -> Self {
        self.namespace_range = None;
        self
    }

    pub fn in_module(mut self, module: ModuleId) -> Self {
        self.module = module;
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(Arc::from(path));
        self
    }

    /// Add an element. A later element with the same id replaces the earlier one.
    pub fn with_statement(mut self, statement: StatementElement) -> Self {
        self.insert_statement(statement);
        self
    }

    pub fn insert_statement(&mut self, mut statement: StatementElement) {
        statement.file = self.file;
        self.statements.insert(statement.id.clone(), statement);
    }

    /// The declared namespace, unless absent or blank.
    pub fn declared_namespace(&self) -> Option<&str> {
        self.namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
    }

    pub fn namespace_range(&self) -> Option<TextRange> {
        self.namespace_range
    }

    pub fn statements(&self) -> impl Iterator<Item = &StatementElement> {
        self.statements.values()
    }

    /// Elements bound to mapper methods (`select`, `insert`, `update`, `delete`).
    pub fn dao_elements(&self) -> impl Iterator<Item = &StatementElement> {
        self.statements().filter(|s| s.kind.is_statement())
    }

    pub fn statement(&self, id: &str) -> Option<&StatementElement> {
        self.statements.get(id)
    }
}

// ============================================================================
// MARKUP INDEX
// ============================================================================

/// Read access to every mapping document of the workspace.
pub trait MarkupIndex: Send + Sync {
    /// Documents visible in `scope`, in discovery order.
    fn all_mapping_documents(&self, scope: &SearchScope) -> Vec<Arc<MappingDocument>>;

    fn document(&self, file: FileId) -> Option<Arc<MappingDocument>>;

    /// `false` while documents are still being indexed.
    fn is_ready(&self) -> bool {
        true
    }
}

/// In-memory markup index.
#[derive(Clone, Debug, Default)]
pub struct MapperIndex {
    documents: IndexMap<FileId, Arc<MappingDocument>>,
    indexing: bool,
}

impl MapperIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale-replace the document for its file.
    pub fn set_document(&mut self, document: MappingDocument) {
        self.documents.insert(document.file, Arc::new(document));
    }

    pub fn remove_file(&mut self, file: FileId) -> Option<Arc<MappingDocument>> {
        self.documents.shift_remove(&file)
    }

    pub fn set_indexing(&mut self, indexing: bool) {
        self.indexing = indexing;
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl MarkupIndex for MapperIndex {
    fn all_mapping_documents(&self, scope: &SearchScope) -> Vec<Arc<MappingDocument>> {
        self.documents
            .values()
            .filter(|d| scope.contains(d.module))
            .cloned()
            .collect()
    }

    fn document(&self, file: FileId) -> Option<Arc<MappingDocument>> {
        self.documents.get(&file).cloned()
    }

    fn is_ready(&self) -> bool {
        !self.indexing
    }
}
