//! Sliding character window over a [`TextSource`].
//!
//! Invariants
//! - `0 <= token_start <= stored <= data.len()`.
//! - Characters in `token_start..stored` are unconsumed; everything before
//!   `token_start` may be discarded by the next compaction.
//! - Callers address characters only relative to `token_start`, through
//!   [`CharBuffer::ensure_available`], [`CharBuffer::peek`] and
//!   [`CharBuffer::consume`].
//!
//! Growth policy: when the window is full, unconsumed characters are shifted
//! to offset 0 if they occupy at most half of the capacity; otherwise the
//! capacity is doubled. Either way the source is asked for a whole free tail
//! at once, never a single character.
#![expect(clippy::inline_always)]

use alloc::{string::String, vec, vec::Vec};

use log::debug;

use super::{error::SourceError, source::TextSource};

#[derive(Debug)]
pub(crate) struct CharBuffer {
    data: Vec<char>,
    stored: usize,
    token_start: usize,
    eof: bool,
    line: usize,
    column: usize,
}

impl CharBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec!['\0'; capacity.max(1)],
            stored: 0,
            token_start: 0,
            eof: false,
            line: 1,
            column: 1,
        }
    }

    #[inline(always)]
    pub(crate) fn available(&self) -> usize {
        self.stored - self.token_start
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// 1-based line and column of the first unconsumed character.
    pub(crate) fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Position of the character `offset` places past the first unconsumed
    /// one. `offset` must be within the available window.
    pub(crate) fn position_at(&self, offset: usize) -> (usize, usize) {
        let (mut line, mut column) = (self.line, self.column);
        let end = (self.token_start + offset).min(self.stored);
        for &ch in &self.data[self.token_start..end] {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Makes sure at least `n` unconsumed characters are buffered.
    ///
    /// Returns `Ok(false)` only if the source ran dry first.
    pub(crate) fn ensure_available<S: TextSource + ?Sized>(
        &mut self,
        source: &mut S,
        n: usize,
    ) -> Result<bool, SourceError> {
        while self.available() < n {
            if self.eof {
                return Ok(false);
            }
            if self.stored == self.data.len() {
                self.make_room();
            }
            let read = source.read_chars(&mut self.data[self.stored..])?;
            if read == 0 {
                self.eof = true;
            }
            self.stored += read;
        }
        Ok(true)
    }

    fn make_room(&mut self) {
        let unconsumed = self.available();
        let capacity = self.data.len();
        if self.token_start > 0 {
            self.data.copy_within(self.token_start..self.stored, 0);
            self.stored = unconsumed;
            self.token_start = 0;
        }
        if unconsumed * 2 > capacity {
            debug!("growing character buffer from {capacity} to {}", capacity * 2);
            self.data.resize(capacity * 2, '\0');
        } else {
            debug!("compacted character buffer, {unconsumed} characters kept");
        }
    }

    /// The unconsumed character at `offset`, if buffered.
    #[inline(always)]
    pub(crate) fn peek(&self, offset: usize) -> Option<char> {
        let idx = self.token_start + offset;
        (idx < self.stored).then(|| self.data[idx])
    }

    /// Borrow the `n` unconsumed characters starting at `token_start`.
    pub(crate) fn window(&self, n: usize) -> &[char] {
        &self.data[self.token_start..self.token_start + n]
    }

    /// Advances past `n` characters and returns them as a string.
    pub(crate) fn consume(&mut self, n: usize) -> String {
        let text: String = self.window(n).iter().collect();
        self.skip(n);
        text
    }

    /// Advances past `n` characters without materialising them.
    pub(crate) fn skip(&mut self, n: usize) {
        debug_assert!(n <= self.available(), "consumed past the buffered window");
        let (line, column) = self.position_at(n);
        self.line = line;
        self.column = column;
        self.token_start += n;
    }
}
