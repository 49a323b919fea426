//! Cursor position → pointer path.
//!
//! The walk is a depth-first descent in declaration order: references, then
//! the namespace, then targets. At every level the first node whose range
//! contains the position is taken and its siblings are skipped. Nodes without
//! a range are transparent: their children are searched, but they are never
//! the result themselves.

use std::fmt;

use tracing::trace;

use crate::base::text::offset_in_text;
use crate::base::{Position, Range};
use crate::syntax::{
    AnnotationFile, Attribute, Element, ElementChild, Namespace, Reference, Target, TextNode,
};

/// Boundary predicates used while matching a position against ranges.
///
/// Ranges are end exclusive. Editing features differ in how they treat a
/// position sitting exactly on an end edge: hover wants the token under the
/// cursor, completion wants the token the cursor has just finished typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryPolicy {
    /// Accept a position on the end edge of container nodes (files, targets,
    /// elements, attributes, content).
    pub container_end: bool,
    /// Accept a position on the end edge of terminal tokens (names, values,
    /// text).
    pub token_end: bool,
    /// Match the content of an element that has no children yet.
    pub empty_content: bool,
}

impl BoundaryPolicy {
    /// Hover, go-to-reference and similar lookups.
    pub const NAVIGATION: Self = Self {
        container_end: true,
        token_end: false,
        empty_content: false,
    };

    /// Completion while a token is being typed.
    pub const COMPLETION: Self = Self {
        container_end: true,
        token_end: true,
        empty_content: true,
    };

    pub fn for_completion(for_completion: bool) -> Self {
        if for_completion {
            Self::COMPLETION
        } else {
            Self::NAVIGATION
        }
    }
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self::NAVIGATION
    }
}

/// Result of [`find_path_to_position`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionPath {
    /// Pointer path of the matched node, e.g. `targets/0/terms/1/name`.
    pub path: String,
    /// UTF-16 offset of the position inside the matched string field, when
    /// the match is a terminal token.
    pub offset: Option<u32>,
}

impl PositionPath {
    /// The path in the form accepted by
    /// [`get_position_data`](super::get_position_data): terminal matches
    /// carry a `$<offset>` suffix.
    pub fn pointer(&self) -> String {
        match self.offset {
            Some(offset) => format!("{}${offset}", self.path),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for PositionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pointer())
    }
}

/// Find the pointer path of the node at `position`.
///
/// With `for_completion` a position on the end edge of a token, or inside an
/// element without content, still resolves to that token or content.
pub fn find_path_to_position(
    file: &AnnotationFile,
    position: Position,
    for_completion: bool,
) -> Option<PositionPath> {
    find_path_to_position_with(file, position, &BoundaryPolicy::for_completion(for_completion))
}

/// Like [`find_path_to_position`] with explicit boundary predicates.
pub fn find_path_to_position_with(
    file: &AnnotationFile,
    position: Position,
    policy: &BoundaryPolicy,
) -> Option<PositionPath> {
    let mut finder = PathFinder {
        position,
        policy: *policy,
        segments: Vec::new(),
    };
    let result = finder.file(file).map(|hit| PositionPath {
        path: finder.segments.join("/"),
        offset: hit.offset,
    });
    trace!(
        "[POSITION] {}:{} → {:?}",
        position.line, position.character, result
    );
    result
}

/// A successful match; `offset` is set for terminal tokens.
struct Hit {
    offset: Option<u32>,
}

impl Hit {
    const NODE: Hit = Hit { offset: None };
}

struct PathFinder {
    position: Position,
    policy: BoundaryPolicy,
    segments: Vec<String>,
}

impl PathFinder {
    fn in_container(&self, range: Range) -> bool {
        range.contains_with_end(self.position, self.policy.container_end)
    }

    fn in_token(&self, range: Range) -> bool {
        range.contains_with_end(self.position, self.policy.token_end)
    }

    /// Visit a node with an optional range.
    ///
    /// A ranged node containing the position is always a match: the deepest
    /// matching child if there is one, the node itself otherwise. A node
    /// without range only matches through its children.
    fn node(
        &mut self,
        range: Option<Range>,
        segment: String,
        children: impl FnOnce(&mut Self) -> Option<Hit>,
    ) -> Option<Hit> {
        if let Some(range) = range {
            if !self.in_container(range) {
                return None;
            }
        }
        let mark = self.segments.len();
        self.segments.push(segment);
        if let Some(hit) = children(self) {
            return Some(hit);
        }
        if range.is_some() {
            return Some(Hit::NODE);
        }
        self.segments.truncate(mark);
        None
    }

    /// Visit a terminal string field.
    fn token(&mut self, range: Option<Range>, field: &str, text: &str) -> Option<Hit> {
        let range = range.filter(|range| self.in_token(*range))?;
        self.segments.push(field.to_string());
        Some(Hit {
            offset: Some(offset_in_text(text, range.start, self.position)),
        })
    }

    fn optional_token(
        &mut self,
        range: Option<Range>,
        field: &str,
        text: Option<&str>,
    ) -> Option<Hit> {
        self.token(range, field, text.unwrap_or_default())
    }

    fn file(&mut self, file: &AnnotationFile) -> Option<Hit> {
        if let Some(range) = file.range {
            if !self.in_container(range) {
                return None;
            }
        }
        for (index, reference) in file.references.iter().enumerate() {
            let hit = self.node(reference.range, format!("references/{index}"), |finder| {
                finder.reference(reference)
            });
            if hit.is_some() {
                return hit;
            }
        }
        if let Some(namespace) = &file.namespace {
            let hit = self.node(namespace.range, "namespace".to_string(), |finder| {
                finder.namespace(namespace)
            });
            if hit.is_some() {
                return hit;
            }
        }
        for (index, target) in file.targets.iter().enumerate() {
            let hit = self.node(target.range, format!("targets/{index}"), |finder| {
                finder.target(target)
            });
            if hit.is_some() {
                return hit;
            }
        }
        None
    }

    fn reference(&mut self, reference: &Reference) -> Option<Hit> {
        self.token(reference.name_range, "name", &reference.name)
            .or_else(|| {
                self.optional_token(reference.alias_range, "alias", reference.alias.as_deref())
            })
            .or_else(|| self.optional_token(reference.uri_range, "uri", reference.uri.as_deref()))
    }

    fn namespace(&mut self, namespace: &Namespace) -> Option<Hit> {
        self.token(namespace.name_range, "name", &namespace.name)
            .or_else(|| {
                self.optional_token(namespace.alias_range, "alias", namespace.alias.as_deref())
            })
    }

    fn target(&mut self, target: &Target) -> Option<Hit> {
        if let Some(hit) = self.token(target.name_range, "name", &target.name) {
            return Some(hit);
        }
        for (index, term) in target.terms.iter().enumerate() {
            let hit = self.node(term.range, format!("terms/{index}"), |finder| {
                finder.element(term)
            });
            if hit.is_some() {
                return hit;
            }
        }
        None
    }

    fn element(&mut self, element: &Element) -> Option<Hit> {
        if let Some(hit) = self.token(element.name_range, "name", &element.name) {
            return Some(hit);
        }
        for (key, attribute) in &element.attributes {
            let hit = self.node(attribute.range, format!("attributes/{key}"), |finder| {
                finder.attribute(attribute)
            });
            if hit.is_some() {
                return hit;
            }
        }
        self.content(element)
    }

    fn attribute(&mut self, attribute: &Attribute) -> Option<Hit> {
        self.token(attribute.name_range, "name", &attribute.name)
            .or_else(|| self.token(attribute.value_range, "value", &attribute.value))
    }

    fn content(&mut self, element: &Element) -> Option<Hit> {
        match element.content_range {
            Some(range) if self.in_container(range) => {
                if element.content.is_empty() {
                    if !self.policy.empty_content {
                        return None;
                    }
                    self.segments.push("content".to_string());
                    return Some(Hit::NODE);
                }
                let hit = self.content_children(&element.content);
                if hit.is_none() {
                    self.segments.push("content".to_string());
                }
                Some(hit.unwrap_or(Hit::NODE))
            }
            Some(_) => None,
            // Content without a range is searched like any transparent node.
            None => self.content_children(&element.content),
        }
    }

    fn content_children(&mut self, content: &[ElementChild]) -> Option<Hit> {
        for (index, child) in content.iter().enumerate() {
            let segment = format!("content/{index}");
            let hit = match child {
                ElementChild::Element(element) => {
                    self.node(element.range, segment, |finder| finder.element(element))
                }
                ElementChild::Text(text) => {
                    self.node(text.range, segment, |finder| finder.text(text))
                }
            };
            if hit.is_some() {
                return hit;
            }
        }
        None
    }

    fn text(&mut self, text: &TextNode) -> Option<Hit> {
        self.token(text.range, "text", &text.text)
    }
}
