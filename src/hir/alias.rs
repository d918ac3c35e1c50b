//! Alias table — short type aliases mapped to the types they stand for.
//!
//! The table is rebuilt wholesale from its [`AliasSource`]s whenever configuration
//! changes, then swapped into the [`AliasRegistry`] in one step. Readers take an
//! `Arc` snapshot and never see a half-built table.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::class_index::DeclarationGraph;
use super::scope::SearchScope;
use super::symbols::TypeSymbol;

/// A registered alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasEntry {
    pub alias: SmolStr,
    pub target: TypeSymbol,
}

impl AliasEntry {
    pub fn new(alias: &str, target: TypeSymbol) -> Self {
        Self {
            alias: SmolStr::new(alias),
            target,
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Alias -> type. An alias maps to at most one type; the last registration wins.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    entries: IndexMap<SmolStr, TypeSymbol>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry, returning the type it displaced, if any.
    pub fn register(&mut self, entry: AliasEntry) -> Option<TypeSymbol> {
        let previous = self.entries.insert(entry.alias.clone(), entry.target);
        if let Some(prev) = &previous {
            trace!(
                "[ALIAS] '{}' re-registered, was {}",
                entry.alias, prev.qualified_name
            );
        }
        previous
    }

    pub fn get(&self, alias: &str) -> Option<&TypeSymbol> {
        self.entries.get(alias)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&SmolStr, &TypeSymbol)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Something that contributes alias registrations.
pub trait AliasSource: Send + Sync {
    fn alias_entries(&self, graph: &dyn DeclarationGraph, scope: &SearchScope) -> Vec<AliasEntry>;
}

/// Framework default aliases.
///
/// An entry is only registered when its target class exists in the graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinAliases;

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("string", "java.lang.String"),
    ("byte", "java.lang.Byte"),
    ("char", "java.lang.Character"),
    ("character", "java.lang.Character"),
    ("long", "java.lang.Long"),
    ("short", "java.lang.Short"),
    ("int", "java.lang.Integer"),
    ("integer", "java.lang.Integer"),
    ("double", "java.lang.Double"),
    ("float", "java.lang.Float"),
    ("boolean", "java.lang.Boolean"),
    ("date", "java.util.Date"),
    ("decimal", "java.math.BigDecimal"),
    ("bigdecimal", "java.math.BigDecimal"),
    ("biginteger", "java.math.BigInteger"),
    ("object", "java.lang.Object"),
    ("map", "java.util.Map"),
    ("hashmap", "java.util.HashMap"),
    ("list", "java.util.List"),
    ("arraylist", "java.util.ArrayList"),
    ("collection", "java.util.Collection"),
    ("iterator", "java.util.Iterator"),
    ("ResultSet", "java.sql.ResultSet"),
];

impl AliasSource for BuiltinAliases {
    fn alias_entries(&self, graph: &dyn DeclarationGraph, scope: &SearchScope) -> Vec<AliasEntry> {
        BUILTIN_ALIASES
            .iter()
            .filter_map(|(alias, qname)| {
                graph
                    .lookup_by_qualified_name(qname, scope)
                    .map(|target| AliasEntry::new(alias, target))
            })
            .collect()
    }
}

/// An alias registration read from a configuration document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AliasDeclaration {
    /// `<typeAlias alias="user" type="com.app.User"/>`. Without an alias the type's
    /// declared alias or simple name is used.
    Explicit {
        alias: Option<SmolStr>,
        type_name: Arc<str>,
    },
    /// `<package name="com.app.model"/>` or a `typeAliasesPackage` entry: every
    /// concrete type of the package registers under its declared alias or simple name.
    Package(Arc<str>),
}

/// Alias declarations collected from configuration documents, in registration order.
#[derive(Clone, Debug, Default)]
pub struct AliasDeclarations {
    declarations: Vec<AliasDeclaration>,
}

impl AliasDeclarations {
    pub fn new(declarations: Vec<AliasDeclaration>) -> Self {
        Self { declarations }
    }

    pub fn push(&mut self, declaration: AliasDeclaration) {
        self.declarations.push(declaration);
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<AliasDeclaration> for AliasDeclarations {
    fn from_iter<T: IntoIterator<Item = AliasDeclaration>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn default_alias(ty: &TypeSymbol) -> SmolStr {
    ty.declared_alias.clone().unwrap_or_else(|| ty.name.clone())
}

impl AliasSource for AliasDeclarations {
    fn alias_entries(&self, graph: &dyn DeclarationGraph, scope: &SearchScope) -> Vec<AliasEntry> {
        let mut entries = Vec::new();
        for declaration in &self.declarations {
            match declaration {
                AliasDeclaration::Explicit { alias, type_name } => {
                    let Some(target) = graph.lookup_by_qualified_name(type_name, scope) else {
                        trace!("[ALIAS] type '{}' not found, skipping", type_name);
                        continue;
                    };
                    let alias = alias.clone().unwrap_or_else(|| default_alias(&target));
                    entries.push(AliasEntry { alias, target });
                }
                AliasDeclaration::Package(package) => {
                    entries.extend(
                        graph
                            .types_in_package(package, scope)
                            .into_iter()
                            .filter(|t| !t.is_interface_or_annotation())
                            .map(|target| AliasEntry {
                                alias: default_alias(&target),
                                target,
                            }),
                    );
                }
            }
        }
        entries
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Owner of the current alias table.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    table: RwLock<Arc<AliasTable>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current complete table.
    pub fn snapshot(&self) -> Arc<AliasTable> {
        self.table.read().clone()
    }

    /// Build a fresh table from `sources` (in order, later registrations win) and
    /// swap it in.
    pub fn rebuild(
        &self,
        sources: &[&dyn AliasSource],
        graph: &dyn DeclarationGraph,
        scope: &SearchScope,
    ) -> Arc<AliasTable> {
        let mut table = AliasTable::new();
        for source in sources {
            for entry in source.alias_entries(graph, scope) {
                table.register(entry);
            }
        }
        debug!("[ALIAS] rebuilt alias table with {} entries", table.len());
        self.replace(table)
    }

    /// Swap in a complete table.
    pub fn replace(&self, table: AliasTable) -> Arc<AliasTable> {
        let table = Arc::new(table);
        *self.table.write() = table.clone();
        table
    }
}
