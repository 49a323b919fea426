//! IDE support: cursor positions to tree addresses and back.
//!
//! Hover, completion and go-to-reference providers first turn the cursor
//! into a pointer path with [`find_path_to_position`], then use
//! [`get_position_data`] to get the string under the cursor split at the
//! cursor offset.
//!
//! ```text
//! Position ─ find_path_to_position ─▶ "targets/0/terms/0/attributes/Term/value$3"
//!                                              │
//!                                     get_position_data
//!                                              ▼
//!                         PositionData { start_string: "UI.", remaining_string: "LineItem" }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//! 3. **Soft failures**: No match is `None` / `found == false`, never an error

mod error;
mod pointer;
mod position_path;

pub use error::PointerError;
pub use pointer::{
    NodeRef, PointerFailure, PointerTarget, PointerToken, PositionData, ResolvedPointer,
    get_position_data, resolve_pointer,
};
pub use position_path::{
    BoundaryPolicy, PositionPath, find_path_to_position, find_path_to_position_with,
};
