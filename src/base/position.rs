/// Position tracking for annotation tree nodes
///
/// Stores the source location (line/character) of tree nodes for editor
/// features like hover, completion and go-to-reference.
/// A range in source text (0-indexed, end exclusive, LSP compatible)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A position in source text.
///
/// `character` counts UTF-16 code units, as editors using the language server
/// protocol do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range from line/character coordinates
    pub fn from_coords(
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_character),
            end: Position::new(end_line, end_character),
        }
    }

    /// Check if a position falls within this range, both edges included
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Check if a position falls within this range, end edge excluded
    pub fn contains_before_end(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    /// Check the position against this range, optionally accepting the end edge.
    pub fn contains_with_end(&self, position: Position, include_end: bool) -> bool {
        if include_end {
            self.contains(position)
        } else {
            self.contains_before_end(position)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}
