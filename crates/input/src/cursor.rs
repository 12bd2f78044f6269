//! Board cursor over the card grid.

use crate::types::{grid_columns, GameAction};

/// Position of the selection cursor on a row-major card grid.
///
/// The last row may be partial; moves that would leave the grid are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    columns: usize,
    len: usize,
}

impl Cursor {
    /// Cursor on the first card of a grid laid out by [`grid_columns`].
    pub fn new(len: usize) -> Self {
        Self::with_columns(len, grid_columns(len))
    }

    pub fn with_columns(len: usize, columns: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.index / self.columns
    }

    pub fn col(&self) -> usize {
        self.index % self.columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Back to the first card, keeping the grid shape.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Apply a cursor action. Returns true if the cursor moved.
    ///
    /// `Select` and `Restart` are not cursor actions and return false.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let target = match action {
            GameAction::CursorLeft if self.col() > 0 => Some(self.index - 1),
            GameAction::CursorRight if self.col() + 1 < self.columns => Some(self.index + 1),
            GameAction::CursorUp if self.index >= self.columns => Some(self.index - self.columns),
            GameAction::CursorDown => Some(self.index + self.columns),
            _ => None,
        };

        match target {
            Some(i) if i < self.len => {
                self.index = i;
                true
            }
            _ => false,
        }
    }
}
