//! Text utilities for source strings addressed in UTF-16 code units.
//!
//! Editor positions count UTF-16 code units while Rust strings are UTF-8, so
//! every offset handed in from a cursor goes through these helpers before it
//! touches a `&str`.

use super::Position;

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Convert a UTF-16 offset into a byte offset of `text`.
///
/// Offsets past the end clamp to `text.len()`. An offset falling inside a
/// surrogate pair snaps back to the start of that character.
pub fn byte_offset_of_utf16(text: &str, offset: u32) -> usize {
    let mut units = 0u32;
    for (index, c) in text.char_indices() {
        let next = units + c.len_utf16() as u32;
        if next > offset {
            return index;
        }
        units = next;
    }
    text.len()
}

/// Split `text` at a UTF-16 offset.
pub fn split_at_utf16(text: &str, offset: u32) -> (&str, &str) {
    text.split_at(byte_offset_of_utf16(text, offset))
}

/// UTF-16 offset of `position` inside `text`, where `text` starts at `start`.
///
/// Multi-line text is walked line by line. Positions before `start` yield 0,
/// positions past the end of `text` yield its full length.
pub fn offset_in_text(text: &str, start: Position, position: Position) -> u32 {
    if position <= start {
        return 0;
    }
    let mut current = start;
    let mut offset = 0u32;
    for c in text.chars() {
        if current >= position {
            return offset;
        }
        let width = c.len_utf16() as u32;
        offset += width;
        if c == '\n' {
            current = Position::new(current.line + 1, 0);
        } else {
            current.character += width;
        }
    }
    offset
}
