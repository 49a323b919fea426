//! IDE support tests
//!
//! Tests for:
//! - Cursor position → pointer path
//! - Pointer path → position data
//! - End-to-end hover/completion lookups
