//! Error types for pointer path resolution.

use thiserror::Error;

/// Why a pointer path stopped resolving.
///
/// These never escape [`get_position_data`](super::get_position_data), which
/// reports failures as `found == false`; [`resolve_pointer`](super::resolve_pointer)
/// exposes them to callers that want the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    /// The `$` suffix of a token is not a number.
    #[error("Invalid offset in pointer token '{0}'")]
    InvalidOffset(String),

    /// A `$` suffix appears before the last token.
    #[error("Offset is only allowed on the last pointer token: '{0}'")]
    MisplacedOffset(String),

    /// An array was addressed with something other than an index.
    #[error("Expected an array index, found '{0}'")]
    NotAnIndex(String),

    /// An array index past the end of the array.
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A field the node kind does not have, or an optional field that is absent.
    #[error("Unknown field '{field}' on {node}")]
    UnknownField { field: String, node: &'static str },

    /// A `$` offset on something that is not a string field.
    #[error("Offset on non-string {0}")]
    OffsetOnNonString(&'static str),
}

impl PointerError {
    /// Create an unknown field error.
    pub fn unknown_field(field: impl Into<String>, node: &'static str) -> Self {
        Self::UnknownField {
            field: field.into(),
            node,
        }
    }
}
