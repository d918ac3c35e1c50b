//! Declaration graph — the host language's classes, fields and methods.
//!
//! [`DeclarationGraph`] is the capability the resolvers consume. [`ClassIndex`] is the
//! in-memory implementation used by [`AnalysisHost`](crate::ide::AnalysisHost) and the
//! tests; an editor integration can implement the trait over its own index instead.
//!
//! The class hierarchy is never stored: supertypes live on each [`TypeSymbol`], and
//! subtypes are recomputed from them on every call.

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::scope::SearchScope;
use super::symbols::{FieldSymbol, MethodSymbol, TypeDecl, TypeSymbol};
use crate::base::constants::DOT_SEPARATOR;
use crate::base::{FileId, ModuleId};

// ============================================================================
// DECLARATION GRAPH
// ============================================================================

/// Read access to the host language's declarations.
///
/// Required methods return declared members only; the provided methods add
/// inheritance on top of them.
pub trait DeclarationGraph: Send + Sync {
    /// Look up a type by fully qualified name within `scope`.
    fn lookup_by_qualified_name(&self, name: &str, scope: &SearchScope) -> Option<TypeSymbol>;

    /// Every type with the given simple name within `scope`.
    fn lookup_by_short_name(&self, name: &str, scope: &SearchScope) -> Vec<TypeSymbol>;

    /// Every type declared in `package` or one of its sub-packages.
    fn types_in_package(&self, package: &str, scope: &SearchScope) -> Vec<TypeSymbol>;

    /// Fields declared directly on `ty`, in declaration order.
    fn fields(&self, ty: &TypeSymbol) -> Vec<FieldSymbol>;

    /// Methods declared directly on `ty`, in declaration order.
    fn methods(&self, ty: &TypeSymbol) -> Vec<MethodSymbol>;

    /// Types that directly extend or implement `ty`.
    fn subtypes_of(&self, ty: &TypeSymbol) -> Vec<TypeSymbol>;

    /// `false` while the graph is still being built; queries then resolve nothing.
    fn is_ready(&self) -> bool {
        true
    }

    fn is_interface_or_annotation(&self, ty: &TypeSymbol) -> bool {
        ty.is_interface_or_annotation()
    }

    /// Direct supertypes that exist in the graph.
    fn supertypes_of(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        ty.supertypes
            .iter()
            .filter_map(|name| self.lookup_by_qualified_name(name, &SearchScope::All))
            .collect()
    }

    /// All transitive supertypes, nearest first. Cycles are cut.
    fn ancestors_of(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        walk_hierarchy(ty, |t| self.supertypes_of(t))
    }

    /// All transitive subtypes, nearest first. Cycles are cut.
    fn inheritors_of(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        walk_hierarchy(ty, |t| self.subtypes_of(t))
    }

    /// Declared fields followed by the fields of every ancestor.
    fn all_fields(&self, ty: &TypeSymbol) -> Vec<FieldSymbol> {
        let mut fields = self.fields(ty);
        for ancestor in self.ancestors_of(ty) {
            fields.extend(self.fields(&ancestor));
        }
        fields
    }

    /// Methods named `name` declared on `ty` or inherited from an ancestor.
    fn methods_by_name(&self, ty: &TypeSymbol, name: &str) -> Vec<MethodSymbol> {
        std::iter::once(ty.clone())
            .chain(self.ancestors_of(ty))
            .flat_map(|t| self.methods(&t))
            .filter(|m| m.name == name)
            .collect()
    }
}

/// Breadth-first walk over a hierarchy edge, excluding `start`.
fn walk_hierarchy(
    start: &TypeSymbol,
    mut next: impl FnMut(&TypeSymbol) -> Vec<TypeSymbol>,
) -> Vec<TypeSymbol> {
    let mut visited: FxHashSet<Arc<str>> = FxHashSet::default();
    visited.insert(start.qualified_name.clone());

    let mut queue = VecDeque::from([start.clone()]);
    let mut result = Vec::new();
    while let Some(current) = queue.pop_front() {
        for related in next(&current) {
            if visited.insert(related.qualified_name.clone()) {
                result.push(related.clone());
                queue.push_back(related);
            }
        }
    }
    result
}

// ============================================================================
// CLASS INDEX
// ============================================================================

/// In-memory declaration graph.
///
/// Types are registered per file with [`set_file_types`](Self::set_file_types); a
/// second call for the same file replaces everything the file declared.
#[derive(Clone, Debug, Default)]
pub struct ClassIndex {
    /// Qualified name -> declaration (IndexMap preserves registration order).
    types: IndexMap<Arc<str>, TypeDecl>,
    /// Simple name -> qualified names.
    by_simple_name: FxHashMap<SmolStr, Vec<Arc<str>>>,
    /// File -> qualified names declared in it.
    by_file: FxHashMap<FileId, Vec<Arc<str>>>,
    /// Module -> modules it depends on directly.
    module_deps: FxHashMap<ModuleId, Vec<ModuleId>>,
    /// Set while the owner is still populating the index.
    indexing: bool,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single type, replacing any previous declaration with the same name.
    pub fn insert(&mut self, decl: TypeDecl) {
        let qname = decl.symbol.qualified_name.clone();
        self.unlink(&qname);

        self.by_simple_name
            .entry(decl.symbol.name.clone())
            .or_default()
            .push(qname.clone());
        if let Some(file) = decl.symbol.file {
            self.by_file.entry(file).or_default().push(qname.clone());
        }
        self.types.insert(qname, decl);
    }

    /// Replace every type declared by `file`.
    pub fn set_file_types(&mut self, file: FileId, decls: Vec<TypeDecl>) {
        self.remove_file(file);
        for mut decl in decls {
            decl.symbol.file = Some(file);
            self.insert(decl);
        }
    }

    /// Forget every type declared by `file`.
    pub fn remove_file(&mut self, file: FileId) {
        if let Some(names) = self.by_file.remove(&file) {
            for name in names {
                self.remove_type(&name);
            }
        }
    }

    pub fn remove_type(&mut self, qualified_name: &str) -> Option<TypeDecl> {
        let qname = self.types.get_key_value(qualified_name)?.0.clone();
        self.unlink(&qname);
        self.types.shift_remove(qualified_name)
    }

    /// Drop `qname` from the secondary indexes.
    fn unlink(&mut self, qname: &Arc<str>) {
        let Some(old) = self.types.get(qname) else {
            return;
        };
        if let Some(names) = self.by_simple_name.get_mut(&old.symbol.name) {
            names.retain(|n| n != qname);
            if names.is_empty() {
                self.by_simple_name.remove(&old.symbol.name);
            }
        }
        if let Some(file) = old.symbol.file {
            if let Some(names) = self.by_file.get_mut(&file) {
                names.retain(|n| n != qname);
            }
        }
    }

    pub fn add_module_dependency(&mut self, module: ModuleId, dependency: ModuleId) {
        let deps = self.module_deps.entry(module).or_default();
        if !deps.contains(&dependency) {
            deps.push(dependency);
        }
    }

    /// `module` plus everything it depends on, transitively.
    pub fn module_scope(&self, module: ModuleId) -> SearchScope {
        let mut seen = vec![module];
        let mut queue = VecDeque::from([module]);
        while let Some(current) = queue.pop_front() {
            for dep in self.module_deps.get(&current).into_iter().flatten() {
                if !seen.contains(dep) {
                    seen.push(*dep);
                    queue.push_back(*dep);
                }
            }
        }
        SearchScope::modules(seen)
    }

    /// Mark the index as being (re)built. Queries resolve nothing meanwhile.
    pub fn set_indexing(&mut self, indexing: bool) {
        self.indexing = indexing;
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.types.get(qualified_name)
    }

    pub fn all_types(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.types.values().map(|d| &d.symbol)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn visible(&self, qualified_name: &str, scope: &SearchScope) -> Option<&TypeDecl> {
        self.types
            .get(qualified_name)
            .filter(|d| scope.contains(d.symbol.module))
    }
}

impl DeclarationGraph for ClassIndex {
    fn lookup_by_qualified_name(&self, name: &str, scope: &SearchScope) -> Option<TypeSymbol> {
        self.visible(name, scope).map(|d| d.symbol.clone())
    }

    fn lookup_by_short_name(&self, name: &str, scope: &SearchScope) -> Vec<TypeSymbol> {
        self.by_simple_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|qname| self.visible(qname, scope))
            .map(|d| d.symbol.clone())
            .collect()
    }

    fn types_in_package(&self, package: &str, scope: &SearchScope) -> Vec<TypeSymbol> {
        self.types
            .values()
            .map(|d| &d.symbol)
            .filter(|s| scope.contains(s.module))
            .filter(|s| {
                let pkg = s.package();
                pkg == package
                    || pkg
                        .strip_prefix(package)
                        .is_some_and(|rest| rest.starts_with(DOT_SEPARATOR))
            })
            .cloned()
            .collect()
    }

    fn fields(&self, ty: &TypeSymbol) -> Vec<FieldSymbol> {
        self.types
            .get(&ty.qualified_name)
            .map(|d| d.fields.clone())
            .unwrap_or_default()
    }

    fn methods(&self, ty: &TypeSymbol) -> Vec<MethodSymbol> {
        self.types
            .get(&ty.qualified_name)
            .map(|d| d.methods.clone())
            .unwrap_or_default()
    }

    fn subtypes_of(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        self.types
            .values()
            .filter(|d| d.symbol.supertypes.contains(&ty.qualified_name))
            .map(|d| d.symbol.clone())
            .collect()
    }

    fn is_ready(&self) -> bool {
        !self.indexing
    }
}
