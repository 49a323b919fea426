//! Pointer path → positional/string context.
//!
//! A pointer path addresses a field of the annotation tree with `/`-separated
//! tokens: array indices, field names, and attribute names under
//! `attributes`. The last token may carry a `$<offset>` suffix, a UTF-16
//! offset into a string field:
//!
//! ```text
//! targets/0/terms/1/attributes/Term/value$3
//! ```
//!
//! Resolution is a typed walk: every node kind lists the fields it has, so an
//! unknown field is reported instead of silently skipped.

use indexmap::IndexMap;
use tracing::trace;

use super::error::PointerError;
use crate::base::text::{split_at_utf16, utf16_len};
use crate::syntax::{
    AnnotationFile, Attribute, Element, ElementChild, Namespace, Reference, Target, TextNode,
};

/// Result of [`get_position_data`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionData {
    /// Whether the path ended in a string field.
    pub found: bool,
    /// The deepest valid prefix of the requested path, offset suffix removed.
    pub path: String,
    /// Characters of the string field before the offset.
    pub start_string: String,
    /// Characters of the string field from the offset on.
    pub remaining_string: String,
}

/// A borrowed view of any addressable part of the tree.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    File(&'a AnnotationFile),
    References(&'a [Reference]),
    Reference(&'a Reference),
    Namespace(&'a Namespace),
    Targets(&'a [Target]),
    Target(&'a Target),
    Elements(&'a [Element]),
    Element(&'a Element),
    Attributes(&'a IndexMap<String, Attribute>),
    Attribute(&'a Attribute),
    Content(&'a [ElementChild]),
    Text(&'a TextNode),
    /// A terminal string field.
    String(&'a str),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::File(_) => "annotation file",
            NodeRef::References(_) => "reference list",
            NodeRef::Reference(_) => "reference",
            NodeRef::Namespace(_) => "namespace",
            NodeRef::Targets(_) => "target list",
            NodeRef::Target(_) => "target",
            NodeRef::Elements(_) => "term list",
            NodeRef::Element(_) => "element",
            NodeRef::Attributes(_) => "attribute map",
            NodeRef::Attribute(_) => "attribute",
            NodeRef::Content(_) => "content list",
            NodeRef::Text(_) => "text node",
            NodeRef::String(_) => "string",
        }
    }

    /// Step into the child addressed by `key`.
    pub fn child(self, key: &str) -> Result<NodeRef<'a>, PointerError> {
        let unknown = || PointerError::unknown_field(key, self.kind());
        match self {
            NodeRef::File(file) => match key {
                "uri" => Ok(NodeRef::String(&file.uri)),
                "references" => Ok(NodeRef::References(&file.references)),
                "namespace" => file.namespace.as_ref().map(NodeRef::Namespace).ok_or_else(unknown),
                "targets" => Ok(NodeRef::Targets(&file.targets)),
                _ => Err(unknown()),
            },
            NodeRef::References(references) => index(references, key).map(NodeRef::Reference),
            NodeRef::Reference(reference) => match key {
                "name" => Ok(NodeRef::String(&reference.name)),
                "alias" => reference.alias.as_deref().map(NodeRef::String).ok_or_else(unknown),
                "uri" => reference.uri.as_deref().map(NodeRef::String).ok_or_else(unknown),
                _ => Err(unknown()),
            },
            NodeRef::Namespace(namespace) => match key {
                "name" => Ok(NodeRef::String(&namespace.name)),
                "alias" => namespace.alias.as_deref().map(NodeRef::String).ok_or_else(unknown),
                _ => Err(unknown()),
            },
            NodeRef::Targets(targets) => index(targets, key).map(NodeRef::Target),
            NodeRef::Target(target) => match key {
                "name" => Ok(NodeRef::String(&target.name)),
                "terms" => Ok(NodeRef::Elements(&target.terms)),
                _ => Err(unknown()),
            },
            NodeRef::Elements(elements) => index(elements, key).map(NodeRef::Element),
            NodeRef::Element(element) => match key {
                "name" => Ok(NodeRef::String(&element.name)),
                "attributes" => Ok(NodeRef::Attributes(&element.attributes)),
                "content" => Ok(NodeRef::Content(&element.content)),
                _ => Err(unknown()),
            },
            NodeRef::Attributes(attributes) => {
                attributes.get(key).map(NodeRef::Attribute).ok_or_else(unknown)
            }
            NodeRef::Attribute(attribute) => match key {
                "name" => Ok(NodeRef::String(&attribute.name)),
                "value" => Ok(NodeRef::String(&attribute.value)),
                _ => Err(unknown()),
            },
            NodeRef::Content(content) => index(content, key).map(|child| match child {
                ElementChild::Element(element) => NodeRef::Element(element),
                ElementChild::Text(text) => NodeRef::Text(text),
            }),
            NodeRef::Text(text) => match key {
                "text" => Ok(NodeRef::String(&text.text)),
                _ => Err(unknown()),
            },
            NodeRef::String(_) => Err(unknown()),
        }
    }
}

fn index<'a, T>(items: &'a [T], key: &str) -> Result<&'a T, PointerError> {
    let index: usize = key
        .parse()
        .map_err(|_| PointerError::NotAnIndex(key.to_string()))?;
    items.get(index).ok_or(PointerError::IndexOutOfRange {
        index,
        len: items.len(),
    })
}

/// One token of a pointer path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerToken<'p> {
    pub key: &'p str,
    pub offset: Option<u32>,
}

impl<'p> PointerToken<'p> {
    /// Split an optional `$<offset>` suffix off a token.
    pub fn parse(token: &'p str) -> Result<Self, PointerError> {
        match token.split_once('$') {
            Some((key, offset)) => {
                let offset = offset
                    .parse()
                    .map_err(|_| PointerError::InvalidOffset(token.to_string()))?;
                Ok(Self {
                    key,
                    offset: Some(offset),
                })
            }
            None => Ok(Self {
                key: token,
                offset: None,
            }),
        }
    }
}

/// What a pointer path resolved to.
#[derive(Clone, Debug)]
pub enum PointerTarget<'a> {
    /// A node or list that is not a string field.
    Node(NodeRef<'a>),
    /// A string field, with the offset requested by the path if any.
    String { value: &'a str, offset: Option<u32> },
}

/// A resolved pointer path.
#[derive(Clone, Debug)]
pub struct ResolvedPointer<'a> {
    /// The path that was walked, offset suffix removed.
    pub path: String,
    pub target: PointerTarget<'a>,
}

/// A failed pointer walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerFailure {
    /// The deepest valid prefix reached before the failure.
    pub path: String,
    pub error: PointerError,
}

/// Walk `pointer` from the root of `file`.
///
/// Empty tokens are ignored, so leading and trailing slashes are accepted.
pub fn resolve_pointer<'a>(
    file: &'a AnnotationFile,
    pointer: &str,
) -> Result<ResolvedPointer<'a>, PointerFailure> {
    let mut node = NodeRef::File(file);
    let mut valid: Vec<&str> = Vec::new();
    let mut offset = None;

    let tokens: Vec<&str> = pointer.split('/').filter(|token| !token.is_empty()).collect();
    for (position, raw) in tokens.iter().enumerate() {
        let fail = |valid: &[&str], error| PointerFailure {
            path: valid.join("/"),
            error,
        };
        let token = PointerToken::parse(raw).map_err(|error| fail(valid.as_slice(), error))?;
        if token.offset.is_some() && position + 1 < tokens.len() {
            return Err(fail(valid.as_slice(), PointerError::MisplacedOffset(raw.to_string())));
        }
        node = node.child(token.key).map_err(|error| fail(valid.as_slice(), error))?;
        valid.push(token.key);
        offset = token.offset;
    }

    let path = valid.join("/");
    let target = match node {
        NodeRef::String(value) => PointerTarget::String { value, offset },
        other if offset.is_some() => {
            return Err(PointerFailure {
                path,
                error: PointerError::OffsetOnNonString(other.kind()),
            });
        }
        other => PointerTarget::Node(other),
    };
    Ok(ResolvedPointer { path, target })
}

/// Resolve a pointer path into positional/string context.
///
/// A path ending in a string field is `found`; its value is split at the
/// `$<offset>` of the last token (the whole value counts as typed when there
/// is no offset). Any other outcome reports `found == false` together with
/// the deepest valid prefix of the path.
pub fn get_position_data(file: &AnnotationFile, pointer: &str) -> PositionData {
    match resolve_pointer(file, pointer) {
        Ok(ResolvedPointer {
            path,
            target: PointerTarget::String { value, offset },
        }) => {
            let (start, remaining) =
                split_at_utf16(value, offset.unwrap_or_else(|| utf16_len(value)));
            PositionData {
                found: true,
                path,
                start_string: start.to_string(),
                remaining_string: remaining.to_string(),
            }
        }
        Ok(ResolvedPointer {
            path,
            target: PointerTarget::Node(node),
        }) => {
            trace!("[POINTER] '{}' ends on {}, not a string", pointer, node.kind());
            PositionData {
                path,
                ..PositionData::default()
            }
        }
        Err(failure) => {
            trace!(
                "[POINTER] '{}' stopped at '{}': {}",
                pointer, failure.path, failure.error
            );
            PositionData {
                path: failure.path,
                ..PositionData::default()
            }
        }
    }
}
