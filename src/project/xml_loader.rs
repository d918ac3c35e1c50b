//! XML loading — mapping documents and alias declarations via `quick-xml`.
//!
//! Mapping documents keep the byte range of every id-bearing element's start tag,
//! of the namespace value and of each `property` value on the element's direct
//! children, so diagnostics can point back into the text.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smol_str::SmolStr;
use tracing::trace;

use super::error::LoadError;
use super::file_kind::DocumentKind;
use crate::base::constants::{
    ALIAS_ATTR, CONFIGURATION_TAG, ID_ATTR, NAME_ATTR, NAMESPACE_ATTR, PACKAGE_DELIMITERS,
    PACKAGE_TAG, PROPERTY_ATTR, PROPERTY_TAG, TYPE_ALIAS_TAG, TYPE_ALIASES_PACKAGE_PROPERTY,
    TYPE_ATTR, VALUE_ATTR,
};
use crate::base::{FileId, ModuleId, TextRange, TextSize};
use crate::hir::{AliasDeclaration, MappingDocument, PropertyRef, StatementElement, StatementKind};

/// Parent of `<package>` elements that declare alias packages.
const TYPE_ALIASES_TAG: &str = "typeAliases";

/// Classify a document by its root element. `None` for an unknown root or no root.
pub fn classify_document(text: &str) -> Result<Option<DocumentKind>, LoadError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    loop {
        match read(&mut reader)? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(DocumentKind::from_root_tag(&tag_name(&e, &reader)?));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

// ============================================================================
// MAPPING DOCUMENTS
// ============================================================================

/// Parse a `<mapper>` document.
///
/// Top-level elements with a known tag and an `id` become statement elements;
/// elements without an id are skipped. A repeated id replaces the earlier element.
pub fn parse_mapper(file: FileId, module: ModuleId, text: &str) -> Result<MappingDocument, LoadError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut builder = MapperBuilder {
        text,
        file,
        module,
        document: None,
        open: None,
        depth: 0,
    };

    loop {
        let before = position(&reader);
        match read(&mut reader)? {
            Event::Start(e) => {
                let range = tag_range(text, before, position(&reader));
                builder.start(&e, range, &reader)?;
            }
            Event::Empty(e) => {
                let range = tag_range(text, before, position(&reader));
                builder.start(&e, range, &reader)?;
                builder.end();
            }
            Event::End(_) => builder.end(),
            Event::Eof => break,
            _ => {}
        }
    }

    builder
        .document
        .ok_or_else(|| LoadError::xml(0, "document has no root element"))
}

struct MapperBuilder<'t> {
    text: &'t str,
    file: FileId,
    module: ModuleId,
    document: Option<MappingDocument>,
    /// Top-level element whose children are being read.
    open: Option<StatementElement>,
    depth: usize,
}

impl MapperBuilder<'_> {
    fn start(
        &mut self,
        e: &BytesStart<'_>,
        range: TextRange,
        reader: &Reader<&[u8]>,
    ) -> Result<(), LoadError> {
        let tag = tag_name(e, reader)?;
        let tag_text = &self.text[usize::from(range.start())..usize::from(range.end())];
        match self.depth {
            0 => {
                if DocumentKind::from_root_tag(&tag) != Some(DocumentKind::Mapper) {
                    return Err(LoadError::UnexpectedRoot {
                        expected: DocumentKind::Mapper.root_tag(),
                        found: tag,
                    });
                }
                let mut document = MappingDocument::new(self.file).in_module(self.module);
                if let Some(namespace) = attribute(e, NAMESPACE_ATTR, reader)? {
                    document = document.with_namespace(&namespace);
                    if let Some(value) = value_range(tag_text, NAMESPACE_ATTR, range.start()) {
                        document = document.with_namespace_range(value);
                    }
                }
                self.document = Some(document);
            }
            1 => {
                if let Some(kind) = StatementKind::from_tag(&tag) {
                    let attributes = attributes(e, reader)?;
                    match attributes.get(ID_ATTR) {
                        Some(id) => {
                            let mut element =
                                StatementElement::new(id.trim(), kind, self.file).with_range(range);
                            for name in attributes.keys() {
                                if let Some(value) = value_range(tag_text, name, range.start()) {
                                    element.attribute_ranges.insert(name.clone(), value);
                                }
                            }
                            element.attributes = attributes;
                            self.open = Some(element);
                        }
                        None => trace!("[LOAD] <{}> without id skipped in {}", tag, self.file),
                    }
                }
            }
            2 => {
                if let Some(open) = self.open.as_mut() {
                    if let Some(path) = attribute(e, PROPERTY_ATTR, reader)? {
                        open.property_refs.push(PropertyRef {
                            path: SmolStr::new(path.trim()),
                            range: value_range(tag_text, PROPERTY_ATTR, range.start())
                                .unwrap_or(range),
                        });
                    }
                }
            }
            _ => {}
        }
        self.depth += 1;
        Ok(())
    }

    fn end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth != 1 {
            return;
        }
        if let (Some(element), Some(document)) = (self.open.take(), self.document.as_mut()) {
            document.insert_statement(element);
        }
    }
}

// ============================================================================
// ALIAS DECLARATIONS
// ============================================================================

/// Read the alias declarations of a `<configuration>` or `<beans>` document.
///
/// - `<typeAliases><typeAlias alias="..." type="..."/></typeAliases>`
/// - `<typeAliases><package name="..."/></typeAliases>`
/// - `<property name="typeAliasesPackage" value="a.b, c.d"/>` on any bean
pub fn parse_alias_declarations(text: &str) -> Result<Vec<AliasDeclaration>, LoadError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut declarations = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    loop {
        let (e, is_empty) = match read(&mut reader)? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                stack.pop();
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let tag = tag_name(&e, &reader)?;
        let declares_aliases =
            DocumentKind::from_root_tag(&tag).is_some_and(DocumentKind::declares_aliases);
        if stack.is_empty() && !declares_aliases {
            return Err(LoadError::UnexpectedRoot {
                expected: CONFIGURATION_TAG,
                found: tag,
            });
        }

        let parent = stack.last().map(String::as_str);
        match (parent, tag.as_str()) {
            (Some(TYPE_ALIASES_TAG), TYPE_ALIAS_TAG) => {
                let type_name = attribute(&e, TYPE_ATTR, &reader)?
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| LoadError::missing_attribute(TYPE_ALIAS_TAG, TYPE_ATTR))?;
                let alias = attribute(&e, ALIAS_ATTR, &reader)?
                    .map(|a| SmolStr::new(a.trim()))
                    .filter(|a| !a.is_empty());
                declarations.push(AliasDeclaration::Explicit {
                    alias,
                    type_name: type_name.trim().into(),
                });
            }
            (Some(TYPE_ALIASES_TAG), PACKAGE_TAG) => {
                let name = attribute(&e, NAME_ATTR, &reader)?
                    .ok_or_else(|| LoadError::missing_attribute(PACKAGE_TAG, NAME_ATTR))?;
                declarations.extend(packages(&name));
            }
            (_, PROPERTY_TAG) => {
                let name = attribute(&e, NAME_ATTR, &reader)?;
                if name.as_deref() == Some(TYPE_ALIASES_PACKAGE_PROPERTY) {
                    if let Some(value) = attribute(&e, VALUE_ATTR, &reader)? {
                        declarations.extend(packages(&value));
                    }
                }
            }
            _ => {}
        }

        if !is_empty {
            stack.push(tag);
        }
    }
    Ok(declarations)
}

fn packages(list: &str) -> impl Iterator<Item = AliasDeclaration> + '_ {
    list.split(PACKAGE_DELIMITERS)
        .filter(|p| !p.is_empty())
        .map(|p| AliasDeclaration::Package(p.into()))
}

// ============================================================================
// HELPERS
// ============================================================================

fn read<'t>(reader: &mut Reader<&'t [u8]>) -> Result<Event<'t>, LoadError> {
    reader
        .read_event()
        .map_err(|e| LoadError::xml(reader.error_position(), e.to_string()))
}

fn position(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn tag_name(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<String, LoadError> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|err| LoadError::xml(reader.buffer_position(), format!("Invalid tag name: {err}")))
}

fn attribute(
    e: &BytesStart<'_>,
    name: &str,
    reader: &Reader<&[u8]>,
) -> Result<Option<String>, LoadError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            LoadError::xml(reader.buffer_position(), format!("Attribute error: {err}"))
        })?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(|err| {
                LoadError::xml(reader.buffer_position(), format!("Attribute value error: {err}"))
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn attributes(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<IndexMap<SmolStr, String>, LoadError> {
    let mut attributes = IndexMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            LoadError::xml(reader.buffer_position(), format!("Attribute error: {err}"))
        })?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(|err| {
            LoadError::xml(reader.buffer_position(), format!("Attribute key error: {err}"))
        })?;
        let key = SmolStr::new(key);
        let value = attr.unescape_value().map_err(|err| {
            LoadError::xml(reader.buffer_position(), format!("Attribute value error: {err}"))
        })?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}

/// Range of the start tag read between `before` and `after` (leading whitespace
/// excluded).
fn tag_range(text: &str, before: usize, after: usize) -> TextRange {
    let after = after.min(text.len());
    let before = before.min(after);
    let start = text[before..after].find('<').map_or(before, |i| before + i);
    TextRange::new(text_size(start), text_size(after))
}

/// Range of the raw value of attribute `name` inside `tag_text`, shifted by `offset`.
fn value_range(tag_text: &str, name: &str, offset: TextSize) -> Option<TextRange> {
    let bytes = tag_text.as_bytes();
    for (at, _) in tag_text.match_indices(name) {
        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }
        let Some(after_eq) = tag_text[at + name.len()..].trim_start().strip_prefix('=') else {
            continue;
        };
        let quoted = after_eq.trim_start();
        let Some(quote) = quoted.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let start = tag_text.len() - quoted.len() + 1;
        let len = tag_text[start..].find(quote)?;
        return Some(TextRange::new(
            offset + text_size(start),
            offset + text_size(start + len),
        ));
    }
    None
}
