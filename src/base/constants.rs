//! Domain constants shared by the resolvers and the document loaders.

/// Separator between qualifier segments in type names, signature ids and property paths.
pub const DOT_SEPARATOR: char = '.';

/// Prefix of conventional property setters.
pub const SETTER_PREFIX: &str = "set";

// ============================================================================
// ROOT TAGS
// ============================================================================

/// Root tag of a mapping document.
pub const MAPPER_TAG: &str = "mapper";

/// Root tag of a framework configuration document.
pub const CONFIGURATION_TAG: &str = "configuration";

/// Root tag of a bean definition document.
pub const BEANS_TAG: &str = "beans";

// ============================================================================
// INNER TAGS
// ============================================================================

pub const INCLUDE_TAG: &str = "include";
pub const RESULT_MAP_TAG: &str = "resultMap";
pub const TYPE_ALIAS_TAG: &str = "typeAlias";
pub const PACKAGE_TAG: &str = "package";
pub const PROPERTY_TAG: &str = "property";

// ============================================================================
// ATTRIBUTES
// ============================================================================

pub const NAMESPACE_ATTR: &str = "namespace";
pub const ID_ATTR: &str = "id";
pub const PROPERTY_ATTR: &str = "property";
pub const TYPE_ATTR: &str = "type";
pub const PARAMETER_TYPE_ATTR: &str = "parameterType";
pub const RESULT_TYPE_ATTR: &str = "resultType";
pub const JAVA_TYPE_ATTR: &str = "javaType";
pub const OF_TYPE_ATTR: &str = "ofType";
pub const RESULT_MAP_ATTR: &str = "resultMap";
pub const PARAMETER_MAP_ATTR: &str = "parameterMap";
pub const EXTENDS_ATTR: &str = "extends";
pub const REFID_ATTR: &str = "refid";
pub const ALIAS_ATTR: &str = "alias";
pub const NAME_ATTR: &str = "name";
pub const VALUE_ATTR: &str = "value";

/// Bean property listing packages whose classes are registered as aliases.
pub const TYPE_ALIASES_PACKAGE_PROPERTY: &str = "typeAliasesPackage";

/// Characters separating packages in a `typeAliasesPackage` value.
pub const PACKAGE_DELIMITERS: &[char] = &[',', ';', ' ', '\t', '\n'];
