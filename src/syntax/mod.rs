//! Syntax: the annotation file tree consumed by name and position resolution.
//!
//! Parsing annotation sources is done elsewhere; this module only defines the
//! node types the parser produces plus small read-only accessors.

mod nodes;

pub use nodes::{
    AnnotationFile, Attribute, Element, ElementChild, Namespace, NamespaceDeclaration, Reference,
    Target, TextNode,
};
