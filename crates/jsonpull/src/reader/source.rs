//! Character sources feeding the reader's buffer.
//!
//! A [`TextSource`] is the only I/O boundary of the reader: every other part
//! of the tokenizer works on characters already pulled into its buffer. The
//! reader never closes a source; callers get it back with `into_inner`.

#[cfg(feature = "std")]
use alloc::{vec, vec::Vec};
use core::str::Chars;

use super::error::SourceError;

/// A pull-based supplier of characters.
pub trait TextSource {
    /// Fills `dst` with up to `dst.len()` characters and returns how many were
    /// written. Returns `Ok(0)` only once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the underlying input cannot be read or
    /// decoded.
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError>;
}

impl<T: TextSource + ?Sized> TextSource for &mut T {
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError> {
        (**self).read_chars(dst)
    }
}

/// Source over an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source yielding the characters of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl TextSource for StrSource<'_> {
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError> {
        let mut written = 0;
        for slot in dst.iter_mut() {
            let Some(ch) = self.chars.next() else { break };
            *slot = ch;
            written += 1;
        }
        Ok(written)
    }
}

/// Source over an in-memory byte slice holding UTF-8 text.
///
/// Decoding is strict: the first invalid sequence is reported as
/// [`SourceError::InvalidUtf8`] with its byte offset.
#[derive(Debug, Clone)]
pub struct Utf8Source<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Utf8Source<'a> {
    /// Creates a source decoding `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl TextSource for Utf8Source<'_> {
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError> {
        let (written, consumed) = decode_utf8(&self.bytes[self.pos..], dst, true, self.pos)?;
        self.pos += consumed;
        Ok(written)
    }
}

/// Expected length of the sequence introduced by a leading byte, or 0 if the
/// byte cannot start a sequence.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decodes as many whole characters from `bytes` as fit in `dst`.
///
/// Returns `(chars written, bytes consumed)`. When `at_eof` is false a
/// multi-byte sequence cut off at the end of `bytes` is left unconsumed so
/// that the caller can complete it with the next read.
fn decode_utf8(
    bytes: &[u8],
    dst: &mut [char],
    at_eof: bool,
    base_offset: usize,
) -> Result<(usize, usize), SourceError> {
    let mut pos = 0;
    let mut written = 0;
    while written < dst.len() && pos < bytes.len() {
        let lead = bytes[pos];
        if lead.is_ascii() {
            dst[written] = char::from(lead);
            pos += 1;
            written += 1;
            continue;
        }

        match bstr::decode_utf8(&bytes[pos..]) {
            (Some(ch), len) => {
                dst[written] = ch;
                pos += len;
                written += 1;
            }
            (None, len) => {
                // Only a valid prefix cut off by the end of `bytes` may still
                // be completed; anything else is wrong at `pos` already.
                let remaining = bytes.len() - pos;
                let truncated = len == remaining && sequence_len(lead) > remaining;
                if written > 0 || (truncated && !at_eof) {
                    // Hand out what decoded cleanly; the error recurs on the
                    // next call.
                    break;
                }
                return Err(if truncated {
                    SourceError::TruncatedUtf8
                } else {
                    SourceError::InvalidUtf8(base_offset + pos)
                });
            }
        }
    }
    Ok((written, pos))
}

/// Source decoding UTF-8 from any [`std::io::Read`].
///
/// Bytes are pulled in blocks; a multi-byte sequence split across two reads is
/// carried over and completed by the next one.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    reader: R,
    buf: Vec<u8>,
    block_size: usize,
    start: usize,
    end: usize,
    offset: usize,
    eof: bool,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
    const BLOCK_SIZE: usize = 8 * 1024;

    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self::with_block_size(reader, Self::BLOCK_SIZE)
    }

    /// Wraps `reader`, reading at most `block_size` bytes at a time.
    pub fn with_block_size(reader: R, block_size: usize) -> Self {
        let block_size = block_size.max(1);
        Self {
            reader,
            // Room for a carried-over partial sequence plus one block.
            buf: vec![0; block_size + 4],
            block_size,
            start: 0,
            end: 0,
            offset: 0,
            eof: false,
        }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> Result<(), SourceError> {
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
        let limit = (self.end + self.block_size).min(self.buf.len());
        loop {
            match self.reader.read(&mut self.buf[self.end..limit]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> TextSource for IoSource<R> {
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError> {
        if dst.is_empty() {
            return Ok(0);
        }
        loop {
            if self.start < self.end {
                let (written, consumed) = decode_utf8(
                    &self.buf[self.start..self.end],
                    dst,
                    self.eof,
                    self.offset,
                )?;
                self.start += consumed;
                self.offset += consumed;
                if written > 0 {
                    return Ok(written);
                }
            }
            if self.eof {
                return Ok(0);
            }
            self.fill()?;
        }
    }
}
