//! Names: CSDL qualified names and annotation paths.
//!
//! ## Key Types
//!
//! - [`ParsedName`]: identifier, collection or action/function signature
//! - [`ParsedPath`]: ordered [`PathSegment`]s of an annotation path
//! - [`AliasInformation`]: alias ↔ namespace maps of one annotation file
//!
//! ## Flow
//!
//! ```text
//! "UI.LineItem"       → parse_identifier → ParsedName ─┐
//! "to_X/@UI.Hidden"   → parse_path       → ParsedPath ─┤
//!                                                      ▼
//! namespace declarations → get_alias_information → to_fully_qualified_name/path
//! ```

mod alias;
mod identifier;
mod path;

pub use alias::{
    AliasInformation, AliasMap, get_alias_information, resolve_name, to_alias_qualified_name,
    to_fully_qualified_name, to_fully_qualified_path,
};
pub use identifier::{ActionFunction, Identifier, Parameter, ParsedName, parse_identifier};
pub use path::{NavigationPropertyAnnotation, ParsedPath, PathSegment, TermCast, parse_path};
