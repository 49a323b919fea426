//! Foundation types for annotation tooling.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Range`] - Line/character positions for tree nodes
//! - [`text`] - UTF-16 aware offsets into source strings
//!
//! This module has NO dependencies on other crate modules.

mod position;
pub mod text;

pub use position::{Position, Range};
