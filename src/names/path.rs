//! Annotation path parsing.
//!
//! A path is a `/`-separated list of segments. Besides plain (optionally
//! qualified) names a segment can be a term cast (`@UI.LineItem#q`), an action
//! or function (`MySchema.Act(MySchema.T)`) or a navigation property followed
//! by a term cast (`to_Customer@Common.Label`).

use std::fmt;

use super::identifier::{ActionFunction, Identifier, ParsedName, parse_identifier};

/// A term cast segment: `@[namespaceOrAlias.]Term[#Qualifier]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TermCast {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub namespace_or_alias: Option<String>,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub qualifier: Option<String>,
}

/// A navigation property annotated with a term: `name@Term[#Qualifier]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct NavigationPropertyAnnotation {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub namespace_or_alias: Option<String>,
    pub name: String,
    pub term: TermCast,
}

/// One segment of a [`ParsedPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "kebab-case")
)]
pub enum PathSegment {
    Identifier(Identifier),
    ActionFunction(ActionFunction),
    TermCast(TermCast),
    NavigationPropertyAnnotation(NavigationPropertyAnnotation),
}

/// Result of [`parse_path`]. Segment order is traversal order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedPath {
    pub segments: Vec<PathSegment>,
}

impl TermCast {
    /// Parse the text following `@`.
    fn parse(text: &str) -> Self {
        let (term, qualifier) = match text.split_once('#') {
            Some((term, qualifier)) => (term, Some(qualifier)),
            None => (text, None),
        };
        let parsed = parse_identifier(term);
        Self {
            namespace_or_alias: parsed.namespace_or_alias().map(str::to_string),
            name: parsed.name().to_string(),
            qualifier: qualifier
                .filter(|qualifier| !qualifier.is_empty())
                .map(str::to_string),
        }
    }
}

/// Parse a `/`-separated annotation path.
///
/// Empty segments are skipped. A bare `Collection(...)` segment is not valid
/// in path position and is dropped.
///
/// # Example
/// ```
/// use odata_annotation::names::{PathSegment, parse_path};
///
/// let path = parse_path("to_Customer/@Common.Label#short");
/// assert_eq!(path.segments.len(), 2);
/// assert!(matches!(path.segments[1], PathSegment::TermCast(_)));
/// ```
pub fn parse_path(path: &str) -> ParsedPath {
    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_segment)
        .collect();
    ParsedPath { segments }
}

fn parse_segment(segment: &str) -> Option<PathSegment> {
    match segment.find('@') {
        Some(0) => Some(PathSegment::TermCast(TermCast::parse(&segment[1..]))),
        Some(at) => {
            let navigation = parse_identifier(&segment[..at]);
            Some(PathSegment::NavigationPropertyAnnotation(
                NavigationPropertyAnnotation {
                    namespace_or_alias: navigation.namespace_or_alias().map(str::to_string),
                    name: navigation.name().to_string(),
                    term: TermCast::parse(&segment[at + 1..]),
                },
            ))
        }
        None => match parse_identifier(segment) {
            ParsedName::Identifier(identifier) => Some(PathSegment::Identifier(identifier)),
            ParsedName::ActionFunction(action) => Some(PathSegment::ActionFunction(action)),
            ParsedName::Collection(_) => None,
        },
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

fn write_qualified(
    f: &mut fmt::Formatter<'_>,
    namespace_or_alias: Option<&str>,
    name: &str,
) -> fmt::Result {
    match namespace_or_alias {
        Some(namespace) => write!(f, "{namespace}.{name}"),
        None => f.write_str(name),
    }
}

impl fmt::Display for TermCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@")?;
        write_qualified(f, self.namespace_or_alias.as_deref(), &self.name)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "#{qualifier}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Identifier(identifier) => write!(f, "{identifier}"),
            PathSegment::ActionFunction(action) => write!(f, "{action}"),
            PathSegment::TermCast(term) => write!(f, "{term}"),
            PathSegment::NavigationPropertyAnnotation(navigation) => {
                write_qualified(f, navigation.namespace_or_alias.as_deref(), &navigation.name)?;
                write!(f, "{}", navigation.term)
            }
        }
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
