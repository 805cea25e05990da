use alloc::{format, string::String, vec::Vec};

use crate::{JsonReader, NodeType, ReaderError, ReaderOptions, SourceError, TextSource, Token};

/// Hands out the text in chunks sized by `splits`, then whatever is left in
/// one go. Every chunk is also capped by the space the reader offers.
pub(crate) struct ChunkedSource {
    chars: Vec<char>,
    pos: usize,
    splits: Vec<usize>,
    next: usize,
}

impl ChunkedSource {
    pub(crate) fn new(text: &str, splits: Vec<usize>) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            splits,
            next: 0,
        }
    }
}

impl TextSource for ChunkedSource {
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError> {
        let remaining = self.chars.len() - self.pos;
        if remaining == 0 {
            return Ok(0);
        }
        let want = self
            .splits
            .get(self.next)
            .map_or(remaining, |s| 1 + s % remaining);
        self.next += 1;
        let n = want.min(dst.len());
        dst[..n].copy_from_slice(&self.chars[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// `NodeType` followed by the displayed value, e.g. `Property "a"`.
pub(crate) fn format_token(token: &Token) -> String {
    match &token.value {
        Some(value) => format!("{:?} {value}", token.node_type),
        None => format!("{:?}", token.node_type),
    }
}

/// Reads to the end, returning every token including the final
/// `EndOfInput`.
pub(crate) fn read_all<S: TextSource>(
    reader: &mut JsonReader<S>,
) -> Result<Vec<Token>, ReaderError> {
    let mut tokens = Vec::new();
    loop {
        let more = reader.read()?;
        tokens.push(reader.token().clone());
        if !more {
            debug_assert_eq!(reader.node_type(), NodeType::EndOfInput);
            return Ok(tokens);
        }
    }
}

pub(crate) fn describe(text: &str, options: ReaderOptions) -> Result<Vec<String>, ReaderError> {
    let mut reader = JsonReader::from_text(text, options);
    Ok(read_all(&mut reader)?.iter().map(format_token).collect())
}
