//! Declaration-graph symbols: types, fields and methods of the host language.
//!
//! Symbols are plain values. The graph that owns them ([`ClassIndex`] or any other
//! [`DeclarationGraph`]) hands out clones; resolvers never mutate them.
//!
//! [`ClassIndex`]: super::ClassIndex
//! [`DeclarationGraph`]: super::DeclarationGraph

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::constants::DOT_SEPARATOR;
use crate::base::{FileId, ModuleId};

/// Name of a declared type as written in a declaration (`java.lang.String`, `int`).
pub type TypeRef = Arc<str>;

// ============================================================================
// TYPES
// ============================================================================

/// The kind of a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Annotation,
    Enum,
}

impl TypeKind {
    /// Interfaces and annotation types never host properties.
    pub fn is_interface_or_annotation(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }
}

/// Handle to a class or interface in the declaration graph.
///
/// Equality and hashing use the qualified name only.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    /// Simple name (`User`).
    pub name: SmolStr,
    /// Fully qualified name (`com.app.model.User`).
    pub qualified_name: Arc<str>,
    pub kind: TypeKind,
    /// Module declaring the type.
    pub module: ModuleId,
    /// File declaring the type, if known.
    pub file: Option<FileId>,
    /// Qualified names of the direct supertypes (extends + implements).
    pub supertypes: Vec<Arc<str>>,
    /// Alias declared on the type itself (an `@Alias("...")`-style annotation).
    pub declared_alias: Option<SmolStr>,
}

impl TypeSymbol {
    pub fn new(qualified_name: &str, kind: TypeKind) -> Self {
        Self {
            name: SmolStr::new(simple_name(qualified_name)),
            qualified_name: Arc::from(qualified_name),
            kind,
            module: ModuleId::ROOT,
            file: None,
            supertypes: Vec::new(),
            declared_alias: None,
        }
    }

    /// Package part of the qualified name (empty for the default package).
    pub fn package(&self) -> &str {
        package_of(&self.qualified_name)
    }

    pub fn is_interface_or_annotation(&self) -> bool {
        self.kind.is_interface_or_annotation()
    }
}

impl PartialEq for TypeSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeSymbol {}

impl Hash for TypeSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A field declared on a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldSymbol {
    pub name: SmolStr,
    /// Qualified name of the declaring type.
    pub owner: Arc<str>,
    pub ty: TypeRef,
    pub is_static: bool,
}

/// A method declared on a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSymbol {
    pub name: SmolStr,
    /// Qualified name of the declaring type.
    pub owner: Arc<str>,
    pub parameter_types: Vec<TypeRef>,
    pub return_type: Option<TypeRef>,
    pub is_static: bool,
}

impl MethodSymbol {
    /// `<qualifiedClassName>.<methodName>`, the key statements are matched on.
    pub fn signature_id(&self) -> String {
        signature_id(&self.owner, &self.name)
    }
}

/// Join a qualified class name and a member name into a signature id.
pub fn signature_id(qualified_class: &str, member: &str) -> String {
    let mut id = String::with_capacity(qualified_class.len() + member.len() + 1);
    id.push_str(qualified_class);
    id.push(DOT_SEPARATOR);
    id.push_str(member);
    id
}

/// `com.app.User` -> `User`
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once(DOT_SEPARATOR)
        .map_or(qualified_name, |(_, name)| name)
}

/// `com.app.User` -> `com.app`
pub fn package_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once(DOT_SEPARATOR)
        .map_or("", |(package, _)| package)
}

// ============================================================================
// TYPE DECLARATION (builder)
// ============================================================================

/// A type together with its declared members, as registered in a [`ClassIndex`].
///
/// [`ClassIndex`]: super::ClassIndex
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub symbol: TypeSymbol,
    pub fields: Vec<FieldSymbol>,
    pub methods: Vec<MethodSymbol>,
}

impl TypeDecl {
    pub fn new(qualified_name: &str, kind: TypeKind) -> Self {
        Self {
            symbol: TypeSymbol::new(qualified_name, kind),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn class(qualified_name: &str) -> Self {
        Self::new(qualified_name, TypeKind::Class)
    }

    pub fn interface(qualified_name: &str) -> Self {
        Self::new(qualified_name, TypeKind::Interface)
    }

    pub fn annotation(qualified_name: &str) -> Self {
        Self::new(qualified_name, TypeKind::Annotation)
    }

    pub fn enumeration(qualified_name: &str) -> Self {
        Self::new(qualified_name, TypeKind::Enum)
    }

    pub fn in_module(mut self, module: ModuleId) -> Self {
        self.symbol.module = module;
        self
    }

    /// Add a direct supertype (superclass or implemented / extended interface).
    pub fn extends(mut self, supertype: &str) -> Self {
        self.symbol.supertypes.push(Arc::from(supertype));
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.symbol.declared_alias = Some(SmolStr::new(alias));
        self
    }

    pub fn field(self, name: &str, ty: &str) -> Self {
        self.push_field(name, ty, false)
    }

    pub fn static_field(self, name: &str, ty: &str) -> Self {
        self.push_field(name, ty, true)
    }

    pub fn method(self, name: &str, parameters: &[&str], return_type: Option<&str>) -> Self {
        self.push_method(name, parameters, return_type, false)
    }

    pub fn static_method(self, name: &str, parameters: &[&str], return_type: Option<&str>) -> Self {
        self.push_method(name, parameters, return_type, true)
    }

    /// Add a single-argument `void` method, the shape of a property setter.
    pub fn setter(self, name: &str, parameter: &str) -> Self {
        self.push_method(name, &[parameter], None, false)
    }

    fn push_field(mut self, name: &str, ty: &str, is_static: bool) -> Self {
        self.fields.push(FieldSymbol {
            name: SmolStr::new(name),
            owner: self.symbol.qualified_name.clone(),
            ty: Arc::from(ty),
            is_static,
        });
        self
    }

    fn push_method(
        mut self,
        name: &str,
        parameters: &[&str],
        return_type: Option<&str>,
        is_static: bool,
    ) -> Self {
        self.methods.push(MethodSymbol {
            name: SmolStr::new(name),
            owner: self.symbol.qualified_name.clone(),
            parameter_types: parameters.iter().map(|p| Arc::from(*p)).collect(),
            return_type: return_type.map(Arc::from),
            is_static,
        });
        self
    }
}
