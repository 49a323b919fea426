//! Annotation file tree.
//!
//! The tree is produced by an external XML/CDS annotation parser and consumed
//! read-only here. Every node carries optional ranges: nodes synthesized while
//! the user is still typing may lack them.

use indexmap::IndexMap;

use crate::base::Range;

/// A parsed annotation file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct AnnotationFile {
    pub uri: String,
    pub range: Option<Range>,
    /// `edmx:Reference` includes, in document order.
    pub references: Vec<Reference>,
    /// The schema declared by this file.
    pub namespace: Option<Namespace>,
    /// `Annotations` blocks, in document order.
    pub targets: Vec<Target>,
}

/// A referenced namespace (`edmx:Include` in XML annotation files).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Reference {
    pub name: String,
    pub alias: Option<String>,
    pub uri: Option<String>,
    pub range: Option<Range>,
    pub name_range: Option<Range>,
    pub alias_range: Option<Range>,
    pub uri_range: Option<Range>,
}

/// The namespace (schema) declared by the annotation file itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Namespace {
    pub name: String,
    pub alias: Option<String>,
    pub range: Option<Range>,
    pub name_range: Option<Range>,
    pub alias_range: Option<Range>,
}

/// An annotation target and the terms applied to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Target {
    /// Target path as written, e.g. `MySchema.MyEntityType/MyProperty`.
    pub name: String,
    pub range: Option<Range>,
    pub name_range: Option<Range>,
    /// Annotation elements applied to the target.
    pub terms: Vec<Element>,
}

/// A generic element node (annotations, records, collections, values).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Element {
    pub name: String,
    pub range: Option<Range>,
    pub name_range: Option<Range>,
    /// Attributes keyed by name, in document order.
    pub attributes: IndexMap<String, Attribute>,
    pub content: Vec<ElementChild>,
    /// Range between the end of the start tag and the start of the end tag.
    pub content_range: Option<Range>,
}

/// An attribute of an [`Element`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub range: Option<Range>,
    pub name_range: Option<Range>,
    /// Range of the value text, quotes excluded.
    pub value_range: Option<Range>,
}

/// A text node inside element content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct TextNode {
    pub text: String,
    pub range: Option<Range>,
}

/// A child of element content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "kebab-case")
)]
pub enum ElementChild {
    Element(Element),
    Text(TextNode),
}

/// A namespace declaration participating in alias resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamespaceDeclaration<'a> {
    /// The file's own schema.
    Namespace(&'a Namespace),
    /// A referenced schema.
    Reference(&'a Reference),
}

impl NamespaceDeclaration<'_> {
    pub fn name(&self) -> &str {
        match self {
            NamespaceDeclaration::Namespace(namespace) => &namespace.name,
            NamespaceDeclaration::Reference(reference) => &reference.name,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            NamespaceDeclaration::Namespace(namespace) => namespace.alias.as_deref(),
            NamespaceDeclaration::Reference(reference) => reference.alias.as_deref(),
        }
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

impl AnnotationFile {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// All namespace declarations of this file: references first, then the
    /// file's own namespace.
    ///
    /// This is the input order expected by
    /// [`get_alias_information`](crate::names::get_alias_information).
    pub fn namespace_declarations(&self) -> Vec<NamespaceDeclaration<'_>> {
        let mut declarations: Vec<_> = self
            .references
            .iter()
            .map(NamespaceDeclaration::Reference)
            .collect();
        if let Some(namespace) = &self.namespace {
            declarations.push(NamespaceDeclaration::Namespace(namespace));
        }
        declarations
    }
}

impl Reference {
    pub fn new(name: impl Into<String>, alias: Option<&str>) -> Self {
        Self {
            name: name.into(),
            alias: alias.map(str::to_string),
            ..Self::default()
        }
    }
}

impl Namespace {
    pub fn new(name: impl Into<String>, alias: Option<&str>) -> Self {
        Self {
            name: name.into(),
            alias: alias.map(str::to_string),
            ..Self::default()
        }
    }
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_name_range(mut self, range: Range) -> Self {
        self.name_range = Some(range);
        self
    }

    pub fn with_term(mut self, term: Element) -> Self {
        self.terms.push(term);
        self
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_name_range(mut self, range: Range) -> Self {
        self.name_range = Some(range);
        self
    }

    pub fn with_content_range(mut self, range: Range) -> Self {
        self.content_range = Some(range);
        self
    }

    /// Add an attribute; an attribute with the same name is replaced in place.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute.name.clone(), attribute);
        self
    }

    pub fn with_child(mut self, child: impl Into<ElementChild>) -> Self {
        self.content.push(child.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(|attribute| attribute.value.as_str())
    }

    /// Child elements, text nodes skipped.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.content.iter().filter_map(|child| match child {
            ElementChild::Element(element) => Some(element),
            ElementChild::Text(_) => None,
        })
    }

    /// Child elements with the given name.
    pub fn elements_with_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |element| element.name == name)
    }

    /// The text node if it is the only child of this element.
    pub fn single_text(&self) -> Option<&TextNode> {
        match self.content.as_slice() {
            [ElementChild::Text(text)] => Some(text),
            _ => None,
        }
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the whole-attribute, name and value ranges at once.
    pub fn with_ranges(mut self, range: Range, name_range: Range, value_range: Range) -> Self {
        self.range = Some(range);
        self.name_range = Some(name_range);
        self.value_range = Some(value_range);
        self
    }
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}

impl ElementChild {
    pub fn range(&self) -> Option<Range> {
        match self {
            ElementChild::Element(element) => element.range,
            ElementChild::Text(text) => text.range,
        }
    }
}

impl From<Element> for ElementChild {
    fn from(element: Element) -> Self {
        ElementChild::Element(element)
    }
}

impl From<TextNode> for ElementChild {
    fn from(text: TextNode) -> Self {
        ElementChild::Text(text)
    }
}
