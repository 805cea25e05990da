//! Pull-based JSON tokenizer.
//!
//! Overview
//! - [`JsonReader`] produces exactly one [`Token`] per [`JsonReader::read`]
//!   call. The caller drives the reader; nothing is parsed ahead of demand
//!   except the characters needed to finish the current token.
//! - Input is pulled from a [`TextSource`] into a sliding character window
//!   (`CharBuffer`). Only the window is resident: documents of any size can be
//!   tokenized as long as no single token exceeds available memory.
//! - Grammar state lives in a `ScopeStack` of `Root`/`Array`/`Object`/
//!   `Property` scopes. Every scope counts the values started in it, which is
//!   all that is needed to validate comma placement.
//!
//! Grammar
//! - A JSON superset: strings may use single or double quotes, and property
//!   names may be unquoted runs of letters, digits, `_` and `$` (plus `.` and
//!   `@` when [`ReaderOptions::allow_annotations`] is set).
//! - Exactly one top-level value. Whitespace is limited to space, tab, CR and
//!   LF.
//! - Numbers are a maximal run of `[0-9.eE+-]`; the run is an `i32` when it
//!   parses as one and a finite `f64` otherwise.
//!
//! Failure
//! - Every grammar violation is returned as a [`ReaderError`] at the point of
//!   detection. There is no recovery: after an error the reader is poisoned and
//!   every further `read` fails with [`ContractError::ReadAfterError`].
//!
//! Property scopes
//! - A `Property` scope is pushed after `name:` and popped as soon as its value
//!   is complete: right after a primitive, or right after the matching `}`/`]`
//!   of a container value. Between two `read` calls the innermost scope is
//!   therefore never a property whose value has already been produced.

mod buffer;
mod date;
pub(crate) mod error;
mod escape_buffer;
mod literal;
mod numbers;
mod options;
mod scope;
pub(crate) mod source;

use alloc::{format, string::String};

use buffer::CharBuffer;
use error::{ContractError, ReaderError, SourceError, SyntaxError};
use escape_buffer::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate};
use log::trace;
pub use options::ReaderOptions;
use scope::{ScopeKind, ScopeStack};
#[cfg(feature = "std")]
use source::IoSource;
use source::{StrSource, TextSource, Utf8Source};

use crate::{
    token::{NodeType, Token},
    value::Value,
};

/// Streaming JSON reader over a [`TextSource`].
///
/// # Examples
///
/// ```rust
/// use jsonpull::{JsonReader, NodeType, ReaderOptions};
///
/// let mut reader = JsonReader::from_text(r#"{"a": [1, 2.5]}"#, ReaderOptions::default());
/// let mut nodes = Vec::new();
/// while reader.read().unwrap() {
///     nodes.push(reader.node_type());
/// }
/// assert_eq!(
///     nodes,
///     [
///         NodeType::StartObject,
///         NodeType::Property,
///         NodeType::StartArray,
///         NodeType::PrimitiveValue,
///         NodeType::PrimitiveValue,
///         NodeType::EndArray,
///         NodeType::EndObject,
///     ]
/// );
/// assert_eq!(reader.node_type(), NodeType::EndOfInput);
/// ```
#[derive(Debug)]
pub struct JsonReader<S> {
    source: S,
    buffer: CharBuffer,
    scopes: ScopeStack,
    options: ReaderOptions,
    token: Token,
    /// Reused for string literals that contain escapes.
    scratch: String,
    escape: UnicodeEscapeBuffer,
    end_of_input: bool,
    poisoned: bool,
}

impl<'a> JsonReader<StrSource<'a>> {
    /// Creates a reader over an in-memory string.
    #[must_use]
    pub fn from_text(text: &'a str, options: ReaderOptions) -> Self {
        Self::new(StrSource::new(text), options)
    }
}

impl<'a> JsonReader<Utf8Source<'a>> {
    /// Creates a reader over in-memory UTF-8 bytes.
    #[must_use]
    pub fn from_slice(bytes: &'a [u8], options: ReaderOptions) -> Self {
        Self::new(Utf8Source::new(bytes), options)
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> JsonReader<IoSource<R>> {
    /// Creates a reader decoding UTF-8 from `reader`.
    pub fn from_reader(reader: R, options: ReaderOptions) -> Self {
        Self::new(IoSource::new(reader), options)
    }
}

impl<S: TextSource> JsonReader<S> {
    /// Creates a reader pulling characters from `source`.
    pub fn new(source: S, options: ReaderOptions) -> Self {
        Self {
            source,
            buffer: CharBuffer::with_capacity(options.initial_buffer_capacity),
            scopes: ScopeStack::new(),
            options,
            token: Token::default(),
            scratch: String::new(),
            escape: UnicodeEscapeBuffer::new(),
            end_of_input: false,
            poisoned: false,
        }
    }

    /// Advances to the next token.
    ///
    /// Returns `Ok(false)` once the end of input is reached (and on every call
    /// after that), `Ok(true)` for every other node.
    ///
    /// # Errors
    ///
    /// Returns a [`ReaderError`] for any grammar violation or source failure.
    /// The reader is unusable afterwards.
    pub fn read(&mut self) -> Result<bool, ReaderError> {
        if self.poisoned {
            return Err(self.error_here(ContractError::ReadAfterError));
        }
        match self.read_token() {
            Ok(token) => {
                trace!("{:?} {:?}", token.node_type, token.raw);
                debug_assert!(
                    token.node_type != NodeType::None,
                    "read must always land on a node"
                );
                self.token = token;
                Ok(self.token.node_type != NodeType::EndOfInput)
            }
            Err(err) => {
                self.poisoned = true;
                #[cfg(any(test, feature = "fuzzing"))]
                if self.options.panic_on_error {
                    panic!("{err}");
                }
                Err(err)
            }
        }
    }

    /// Kind of the current node.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.token.node_type
    }

    /// Decoded value of the current `PrimitiveValue` or `Property` node.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.token.value.as_ref()
    }

    /// Verbatim source text of the current token.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.token.raw
    }

    /// The current token.
    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Number of arrays and objects currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.container_depth()
    }

    /// Whether the end of input has been reached.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.end_of_input
    }

    /// 1-based line and column of the next unread character.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        self.buffer.position()
    }

    /// Options the reader was created with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Returns the source. Characters already pulled into the window are lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    pub(crate) fn error_here(&self, kind: impl Into<error::ErrorKind>) -> ReaderError {
        ReaderError::new(kind, self.buffer.position())
    }

    fn error_at(&self, kind: impl Into<error::ErrorKind>, offset: usize) -> ReaderError {
        ReaderError::new(kind, self.buffer.position_at(offset))
    }

    fn source_error(&self, err: SourceError) -> ReaderError {
        let available = self.buffer.available();
        self.error_at(err, available)
    }

    /// Buffers `n` characters; `Ok(false)` if the input ends first.
    fn ensure(&mut self, n: usize) -> Result<bool, ReaderError> {
        match self.buffer.ensure_available(&mut self.source, n) {
            Ok(ok) => Ok(ok),
            Err(err) => Err(self.source_error(err)),
        }
    }

    /// Skips JSON whitespace. Returns `false` at end of input.
    fn skip_whitespace(&mut self) -> Result<bool, ReaderError> {
        loop {
            if !self.ensure(1)? {
                return Ok(false);
            }
            match self.buffer.peek(0) {
                Some(' ' | '\t' | '\r' | '\n') => self.buffer.skip(1),
                _ => return Ok(true),
            }
        }
    }

    /// Length of the maximal run of characters matching `pred`.
    fn scan_run(&mut self, pred: impl Fn(char) -> bool) -> Result<usize, ReaderError> {
        let mut len = 0;
        while self.ensure(len + 1)? {
            match self.buffer.peek(len) {
                Some(c) if pred(c) => len += 1,
                _ => break,
            }
        }
        Ok(len)
    }

    fn read_token(&mut self) -> Result<Token, ReaderError> {
        if self.end_of_input {
            return Ok(Token::end_of_input());
        }

        if !self.skip_whitespace()? {
            return self.end_of_input_token();
        }

        let mut comma_found = false;
        let comma_error = self.error_here(SyntaxError::UnexpectedComma);
        if self.buffer.peek(0) == Some(',') {
            self.buffer.skip(1);
            comma_found = true;
            // A document can never end in a comma, whatever the scope.
            if !self.skip_whitespace()? {
                return Err(self.error_here(SyntaxError::UnexpectedEndOfInput));
            }
        }

        let scope = self.scopes.peek();
        match scope.kind {
            ScopeKind::Root => {
                if comma_found {
                    return Err(comma_error);
                }
                if scope.value_count > 0 {
                    return Err(self.error_here(SyntaxError::MultipleTopLevelValues));
                }
                self.scopes.peek_mut().value_count += 1;
                self.parse_value()
            }
            ScopeKind::Array => {
                if comma_found && scope.value_count == 0 {
                    return Err(comma_error);
                }
                if self.buffer.peek(0) == Some(']') {
                    if comma_found {
                        return Err(self.error_here(SyntaxError::TrailingComma));
                    }
                    return Ok(self.end_scope(NodeType::EndArray, ']'));
                }
                if !comma_found && scope.value_count > 0 {
                    return Err(self.error_here(SyntaxError::MissingComma));
                }
                self.scopes.peek_mut().value_count += 1;
                self.parse_value()
            }
            ScopeKind::Object => {
                if comma_found && scope.value_count == 0 {
                    return Err(comma_error);
                }
                if self.buffer.peek(0) == Some('}') {
                    if comma_found {
                        return Err(self.error_here(SyntaxError::TrailingComma));
                    }
                    return Ok(self.end_scope(NodeType::EndObject, '}'));
                }
                if !comma_found && scope.value_count > 0 {
                    return Err(self.error_here(SyntaxError::MissingComma));
                }
                self.scopes.peek_mut().value_count += 1;
                self.parse_property()
            }
            ScopeKind::Property => {
                if comma_found {
                    return Err(comma_error);
                }
                self.scopes.peek_mut().value_count += 1;
                self.parse_value()
            }
        }
    }

    fn end_of_input_token(&mut self) -> Result<Token, ReaderError> {
        if self.scopes.depth() > 0 {
            return Err(self.error_here(SyntaxError::UnexpectedEndOfInputWithOpenScope));
        }
        self.end_of_input = true;
        Ok(Token::end_of_input())
    }

    /// Consumes the closing bracket and pops its scope, and the property scope
    /// the container was the value of, if any.
    fn end_scope(&mut self, node_type: NodeType, bracket: char) -> Token {
        self.buffer.skip(1);
        self.scopes.pop();
        self.try_pop_property_scope();
        Token::structural(node_type, bracket)
    }

    fn try_pop_property_scope(&mut self) {
        if self.scopes.peek().kind == ScopeKind::Property {
            self.scopes.pop();
        }
    }

    /// Parses one value. The next character is known to be non-whitespace.
    fn parse_value(&mut self) -> Result<Token, ReaderError> {
        let Some(first) = self.buffer.peek(0) else {
            unreachable!("skip_whitespace guarantees a character");
        };
        match first {
            '{' => {
                self.buffer.skip(1);
                self.scopes.push(ScopeKind::Object);
                Ok(Token::structural(NodeType::StartObject, '{'))
            }
            '[' => {
                self.buffer.skip(1);
                self.scopes.push(ScopeKind::Array);
                Ok(Token::structural(NodeType::StartArray, '['))
            }
            '"' | '\'' => {
                let leading_backslash = self.ensure(2)? && self.buffer.peek(1) == Some('\\');
                let (text, raw) = self.parse_string()?;
                let value = if self.options.detect_aspnet_dates && leading_backslash {
                    date::parse_aspnet_date(&text).map_or(Value::String(text), Value::DateTime)
                } else {
                    Value::String(text)
                };
                Ok(self.primitive(value, raw))
            }
            'n' | 't' | 'f' => {
                let allow_annotations = self.options.allow_annotations;
                let len = self.scan_run(|c| literal::is_name_char(c, allow_annotations))?;
                let at = self.buffer.position();
                let raw = self.buffer.consume(len);
                let value = literal::keyword_value(&raw).map_err(|e| ReaderError::new(e, at))?;
                Ok(self.primitive(value, raw))
            }
            c if numbers::is_number_start(c) => {
                let len = self.scan_run(numbers::is_number_char)?;
                let at = self.buffer.position();
                let raw = self.buffer.consume(len);
                let value = numbers::parse_number(&raw).map_err(|e| ReaderError::new(e, at))?;
                Ok(self.primitive(value, raw))
            }
            other => Err(self.error_here(SyntaxError::UnrecognizedToken(other))),
        }
    }

    fn primitive(&mut self, value: Value, raw: String) -> Token {
        self.try_pop_property_scope();
        Token {
            node_type: NodeType::PrimitiveValue,
            value: Some(value),
            raw,
        }
    }

    /// Parses `name:` inside an object and opens the property scope.
    fn parse_property(&mut self) -> Result<Token, ReaderError> {
        let allow_annotations = self.options.allow_annotations;
        let at = self.buffer.position();
        let (name, raw) = match self.buffer.peek(0) {
            Some('"' | '\'') => self.parse_string()?,
            Some(c) if literal::is_name_char(c, allow_annotations) => {
                let len = self.scan_run(|c| literal::is_name_char(c, allow_annotations))?;
                let raw = self.buffer.consume(len);
                (raw.clone(), raw)
            }
            _ => return Err(self.error_here(SyntaxError::InvalidPropertyName)),
        };
        if name.is_empty() {
            return Err(ReaderError::new(SyntaxError::InvalidPropertyName, at));
        }

        if !self.skip_whitespace()? || self.buffer.peek(0) != Some(':') {
            return Err(self.error_here(SyntaxError::MissingColon));
        }
        self.buffer.skip(1);
        self.scopes.push(ScopeKind::Property);

        Ok(Token {
            node_type: NodeType::Property,
            value: Some(Value::String(name)),
            raw,
        })
    }

    /// Parses a quoted string starting at the current character and returns
    /// `(decoded, raw)`.
    ///
    /// The literal stays in the window until its closing quote is found. An
    /// escape-free literal is decoded straight from the window; the first
    /// escape switches to building the result in the reused scratch string.
    fn parse_string(&mut self) -> Result<(String, String), ReaderError> {
        let Some(quote) = self.buffer.peek(0) else {
            unreachable!("caller peeked the opening quote");
        };
        let unterminated = self.error_here(SyntaxError::UnterminatedString);
        let mut escaped = false;
        let mut i = 1;
        loop {
            if !self.ensure(i + 1)? {
                return Err(unterminated);
            }
            let Some(c) = self.buffer.peek(i) else {
                unreachable!()
            };

            if c == quote {
                let text = if escaped {
                    String::from(self.scratch.as_str())
                } else {
                    self.buffer.window(i)[1..].iter().collect()
                };
                let raw = self.buffer.consume(i + 1);
                return Ok((text, raw));
            }

            if c != '\\' {
                if escaped {
                    self.scratch.push(c);
                }
                i += 1;
                continue;
            }

            if !escaped {
                self.scratch.clear();
                self.scratch.extend(&self.buffer.window(i)[1..]);
                escaped = true;
            }
            if !self.ensure(i + 2)? {
                return Err(unterminated);
            }
            let Some(kind) = self.buffer.peek(i + 1) else {
                unreachable!()
            };
            let decoded = match kind {
                'b' => '\u{8}',
                'f' => '\u{c}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                '\\' | '"' | '\'' | '/' => kind,
                'u' => {
                    let (ch, len) = self.parse_unicode_escape(i, &unterminated)?;
                    self.scratch.push(ch);
                    i += len;
                    continue;
                }
                other => {
                    return Err(self.error_at(
                        SyntaxError::UnrecognizedEscapeSequence(format!("\\{other}")),
                        i,
                    ));
                }
            };
            self.scratch.push(decoded);
            i += 2;
        }
    }

    /// Decodes the `\uXXXX` escape at offset `at`, plus a trailing low
    /// surrogate escape when the first unit is a high surrogate. Returns the
    /// character and the number of source characters used.
    fn parse_unicode_escape(
        &mut self,
        at: usize,
        unterminated: &ReaderError,
    ) -> Result<(char, usize), ReaderError> {
        let high = self.parse_hex_unit(at + 2, unterminated)?;
        if !is_high_surrogate(high) {
            let ch = combine_surrogates(high, None).map_err(|e| self.error_at(e, at))?;
            return Ok((ch, 6));
        }

        let has_pair = self.ensure(at + 8)?
            && self.buffer.peek(at + 6) == Some('\\')
            && self.buffer.peek(at + 7) == Some('u');
        if !has_pair {
            return Err(self.error_at(
                SyntaxError::InvalidUnicodeEscapeSequence(u32::from(high)),
                at,
            ));
        }
        let low = self.parse_hex_unit(at + 8, unterminated)?;
        let ch = combine_surrogates(high, Some(low)).map_err(|e| self.error_at(e, at + 6))?;
        Ok((ch, 12))
    }

    fn parse_hex_unit(
        &mut self,
        at: usize,
        unterminated: &ReaderError,
    ) -> Result<u16, ReaderError> {
        if !self.ensure(at + 4)? {
            return Err(unterminated.clone());
        }
        self.escape.reset();
        for offset in at..at + 4 {
            let Some(c) = self.buffer.peek(offset) else {
                unreachable!()
            };
            match self.escape.feed(c) {
                Ok(Some(unit)) => return Ok(unit),
                Ok(None) => {}
                Err(e) => return Err(self.error_at(e, offset)),
            }
        }
        unreachable!("four hex digits always produce a code unit")
    }
}
