//! Rewindable character cursor over an expression.

/// A character cursor supporting single-step rewind and mark/reset.
///
/// Positions are character offsets, not byte offsets. Reading past the end
/// yields `None` rather than failing.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    position: usize,
    mark: usize,
}

impl Cursor {
    /// Creates a cursor positioned at the start of `input`.
    pub fn new(input: &str) -> Self {
        Self::at(input, 0)
    }

    /// Creates a cursor positioned at character `start` of `input`.
    ///
    /// Offsets reported by the cursor stay relative to the whole input.
    pub fn at(input: &str, start: usize) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let start = start.min(chars.len());
        Self {
            chars,
            position: start,
            mark: start,
        }
    }

    /// Consumes and returns the next character.
    pub fn read(&mut self) -> Option<char> {
        let c = self.chars.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Moves back one character.
    pub fn unread(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Remembers the current position.
    pub fn mark(&mut self) {
        self.mark = self.position;
    }

    /// Returns to the last marked position.
    pub fn reset(&mut self) {
        self.position = self.mark;
    }

    /// Advances up to `n` characters, returning how many were skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let skipped = n.min(self.chars.len() - self.position);
        self.position += skipped;
        skipped
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Last marked position.
    pub fn marked(&self) -> usize {
        self.mark
    }

    /// Returns true when every character has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// The unread part of the input.
    pub fn remaining(&self) -> String {
        self.chars[self.position..].iter().collect()
    }
}
