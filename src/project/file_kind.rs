//! Document classification by root element.

use crate::base::constants::{BEANS_TAG, CONFIGURATION_TAG, MAPPER_TAG};

/// The kinds of XML document the workspace understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `<mapper namespace="...">` — statements for one mapper interface.
    Mapper,
    /// `<configuration>` — framework configuration, including type aliases.
    Configuration,
    /// `<beans>` — bean definitions, possibly carrying `typeAliasesPackage`.
    Beans,
}

impl DocumentKind {
    /// Classify a root tag. A namespace prefix (`b:beans`) is ignored.
    pub fn from_root_tag(tag: &str) -> Option<Self> {
        let local = tag.rsplit_once(':').map_or(tag, |(_, local)| local);
        match local {
            MAPPER_TAG => Some(Self::Mapper),
            CONFIGURATION_TAG => Some(Self::Configuration),
            BEANS_TAG => Some(Self::Beans),
            _ => None,
        }
    }

    pub fn root_tag(self) -> &'static str {
        match self {
            Self::Mapper => MAPPER_TAG,
            Self::Configuration => CONFIGURATION_TAG,
            Self::Beans => BEANS_TAG,
        }
    }

    /// Configuration and bean documents contribute aliases.
    pub fn declares_aliases(self) -> bool {
        matches!(self, Self::Configuration | Self::Beans)
    }
}
