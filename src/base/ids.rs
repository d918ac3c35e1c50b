//! Small copyable identifiers.

use std::fmt;

/// Identifier of a document (mapper XML, configuration XML, source file).
///
/// Ids are handed out by whoever owns the document set, usually the
/// [`AnalysisHost`](crate::ide::AnalysisHost).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Identifier of a module.
///
/// A module plus its dependencies forms the visible search scope of a query.
/// [`ModuleId::ROOT`] is used when the workspace has a single module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(u32);

impl ModuleId {
    pub const ROOT: ModuleId = ModuleId(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}
