//! # odata-annotation-core
//!
//! Identifier/path parsing, alias resolution and cursor-position resolution
//! for OData CSDL annotation files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Position-to-path resolver, pointer-path interpreter
//!   ↓
//! names     → Identifier parser, path parser, namespace/alias resolver
//!   ↓
//! syntax    → AnnotationFile tree (produced by an external parser)
//!   ↓
//! base      → Position/Range, UTF-16 text helpers
//! ```
//!
//! Every operation is a pure function over borrowed, immutable inputs.
//! Malformed input never panics: results degrade to `None`, empty strings
//! or `found == false`.

// ============================================================================
// MODULES (dependency order: base → syntax → names → ide)
// ============================================================================

/// Foundation types: Position, Range, UTF-16 text helpers
pub mod base;

/// Syntax: AnnotationFile tree types and accessors
pub mod syntax;

/// Names: qualified-name and path parsing, alias resolution
pub mod names;

/// IDE support: cursor position → pointer path and back
pub mod ide;

// Re-export foundation types
pub use base::{Position, Range};
pub use ide::{
    BoundaryPolicy, PositionData, PositionPath, find_path_to_position,
    find_path_to_position_with, get_position_data,
};
pub use names::{
    AliasInformation, AliasMap, ParsedName, ParsedPath, PathSegment, get_alias_information,
    parse_identifier, parse_path, to_fully_qualified_name, to_fully_qualified_path,
};
pub use syntax::{
    AnnotationFile, Attribute, Element, ElementChild, Namespace, Reference, Target, TextNode,
};
