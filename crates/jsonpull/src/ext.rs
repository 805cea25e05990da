//! The [`TokenReader`] seam and the validation helpers built on it.
//!
//! Callers that map token streams onto their own types rarely want raw
//! `read`/`node_type` pairs. [`JsonReaderExt`] provides the usual
//! "expect this node, take its value, move on" steps plus balanced subtree
//! skipping, for any [`TokenReader`] (a [`JsonReader`] or a
//! [`BufferingReader`](crate::BufferingReader) on top of one).

use alloc::string::String;

use crate::{
    reader::{
        JsonReader,
        error::{ContractError, ReaderError, SyntaxError},
        source::TextSource,
    },
    token::{NodeType, Token},
    value::Value,
};

/// Anything that yields one [`Token`] per `read`.
pub trait TokenReader {
    /// Advances to the next token; `Ok(false)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns a [`ReaderError`] when the input is malformed or unreadable.
    fn read(&mut self) -> Result<bool, ReaderError>;

    /// The current token.
    fn token(&self) -> &Token;

    /// 1-based line and column used to locate contract errors.
    fn position(&self) -> (usize, usize);

    /// Kind of the current node.
    fn node_type(&self) -> NodeType {
        self.token().node_type
    }

    /// Decoded value of the current node, if it has one.
    fn value(&self) -> Option<&Value> {
        self.token().value.as_ref()
    }

    /// Verbatim source text of the current token.
    fn raw_value(&self) -> &str {
        &self.token().raw
    }
}

impl<S: TextSource> TokenReader for JsonReader<S> {
    fn read(&mut self) -> Result<bool, ReaderError> {
        JsonReader::read(self)
    }

    fn token(&self) -> &Token {
        JsonReader::token(self)
    }

    fn position(&self) -> (usize, usize) {
        JsonReader::position(self)
    }
}

impl<R: TokenReader + ?Sized> TokenReader for &mut R {
    fn read(&mut self) -> Result<bool, ReaderError> {
        (**self).read()
    }

    fn token(&self) -> &Token {
        (**self).token()
    }

    fn position(&self) -> (usize, usize) {
        (**self).position()
    }
}

/// Validation and skipping helpers for every [`TokenReader`].
///
/// The `read_*` helpers follow one pattern: check that the *current* node is
/// the expected one, capture its value, then advance past it.
///
/// # Examples
///
/// ```rust
/// use jsonpull::{JsonReader, JsonReaderExt, ReaderOptions, Value};
///
/// let text = r#"{"id": 7, "tags": ["a", "b"]}"#;
/// let mut reader = JsonReader::from_text(text, ReaderOptions::default());
/// reader.read()?;
/// reader.read_start_object()?;
/// assert_eq!(reader.read_property_name()?, "id");
/// assert_eq!(reader.read_primitive_value()?, Value::Integer(7));
/// assert_eq!(reader.read_property_name()?, "tags");
/// reader.skip_value()?;
/// reader.read_end_object()?;
/// assert!(reader.is_end_of_input());
/// # Ok::<(), jsonpull::ReaderError>(())
/// ```
pub trait JsonReaderExt: TokenReader {
    /// Fails unless the current node is `expected`.
    ///
    /// # Errors
    ///
    /// [`ContractError::UnexpectedNodeType`] on mismatch.
    fn expect_node(&self, expected: NodeType) -> Result<(), ReaderError> {
        let found = self.node_type();
        if found == expected {
            Ok(())
        } else {
            Err(ReaderError::new(
                ContractError::UnexpectedNodeType { expected, found },
                self.position(),
            ))
        }
    }

    /// Checks that the current node is `expected`, then advances.
    ///
    /// # Errors
    ///
    /// A contract error on mismatch, or whatever `read` returns.
    fn read_next(&mut self, expected: NodeType) -> Result<bool, ReaderError> {
        self.expect_node(expected)?;
        self.read()
    }

    /// Advances, then checks that the new node is `expected`.
    ///
    /// # Errors
    ///
    /// Whatever `read` returns, or a contract error on mismatch.
    fn advance_to(&mut self, expected: NodeType) -> Result<(), ReaderError> {
        self.read()?;
        self.expect_node(expected)
    }

    /// Consumes a `StartObject` node.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::read_next`].
    fn read_start_object(&mut self) -> Result<(), ReaderError> {
        self.read_next(NodeType::StartObject).map(drop)
    }

    /// Consumes an `EndObject` node.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::read_next`].
    fn read_end_object(&mut self) -> Result<(), ReaderError> {
        self.read_next(NodeType::EndObject).map(drop)
    }

    /// Consumes a `StartArray` node.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::read_next`].
    fn read_start_array(&mut self) -> Result<(), ReaderError> {
        self.read_next(NodeType::StartArray).map(drop)
    }

    /// Consumes an `EndArray` node.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::read_next`].
    fn read_end_array(&mut self) -> Result<(), ReaderError> {
        self.read_next(NodeType::EndArray).map(drop)
    }

    /// Consumes a `Property` node and returns its name.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::read_next`]. A property token that does not carry
    /// a string name is a [`ContractError::PrimitiveTypeMismatch`].
    fn read_property_name(&mut self) -> Result<String, ReaderError> {
        self.expect_node(NodeType::Property)?;
        let name = match self.value() {
            Some(Value::String(name)) => name.clone(),
            other => return Err(mismatch(self, "string", other.unwrap_or(&Value::Null))),
        };
        self.read()?;
        Ok(name)
    }

    /// Consumes a `PrimitiveValue` node and returns its value.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::read_next`].
    fn read_primitive_value(&mut self) -> Result<Value, ReaderError> {
        self.expect_node(NodeType::PrimitiveValue)?;
        let value = self.value().cloned().unwrap_or_default();
        self.read()?;
        Ok(value)
    }

    /// Consumes a string or `null` primitive.
    ///
    /// # Errors
    ///
    /// [`ContractError::PrimitiveTypeMismatch`] for any other primitive, plus
    /// the errors of [`JsonReaderExt::read_primitive_value`].
    fn read_string_value(&mut self) -> Result<Option<String>, ReaderError> {
        self.expect_node(NodeType::PrimitiveValue)?;
        match self.value() {
            Some(Value::String(_) | Value::Null) | None => {}
            Some(other) => return Err(mismatch(self, "string", other)),
        }
        match self.read_primitive_value()? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    /// Consumes a number or `null` primitive; integers are widened.
    ///
    /// # Errors
    ///
    /// [`ContractError::PrimitiveTypeMismatch`] for any other primitive, plus
    /// the errors of [`JsonReaderExt::read_primitive_value`].
    fn read_double_value(&mut self) -> Result<Option<f64>, ReaderError> {
        self.expect_node(NodeType::PrimitiveValue)?;
        match self.value() {
            Some(Value::Integer(_) | Value::Double(_) | Value::Null) | None => {}
            Some(other) => return Err(mismatch(self, "number", other)),
        }
        Ok(self.read_primitive_value()?.as_f64())
    }

    /// Skips the value starting at the current node (a primitive or a whole
    /// object/array) and leaves the reader on the node right after it.
    ///
    /// # Errors
    ///
    /// [`ContractError::NotOnValue`] unless positioned on `StartObject`,
    /// `StartArray` or `PrimitiveValue`, plus any error from `read`.
    fn skip_value(&mut self) -> Result<(), ReaderError> {
        skip(self, None)
    }

    /// Like [`JsonReaderExt::skip_value`], appending the skipped value to
    /// `out` as compact text built from the raw lexemes.
    ///
    /// # Errors
    ///
    /// See [`JsonReaderExt::skip_value`].
    fn skip_value_into(&mut self, out: &mut String) -> Result<(), ReaderError> {
        skip(self, Some(out))
    }
}

impl<R: TokenReader + ?Sized> JsonReaderExt for R {}

fn mismatch<R: TokenReader + ?Sized>(
    reader: &R,
    expected: &'static str,
    found: &Value,
) -> ReaderError {
    ReaderError::new(
        ContractError::PrimitiveTypeMismatch {
            expected,
            found: found.kind(),
        },
        reader.position(),
    )
}

fn skip<R: TokenReader + ?Sized>(
    reader: &mut R,
    mut out: Option<&mut String>,
) -> Result<(), ReaderError> {
    let start = reader.node_type();
    if !start.is_value_start() {
        return Err(ReaderError::new(
            ContractError::NotOnValue(start),
            reader.position(),
        ));
    }

    let mut depth = 0usize;
    let mut previous = NodeType::None;
    loop {
        let node = reader.node_type();
        if let Some(out) = out.as_deref_mut() {
            write_lexeme(out, previous, node, reader.raw_value());
        }
        match node {
            NodeType::StartObject | NodeType::StartArray => depth += 1,
            NodeType::EndObject | NodeType::EndArray => depth -= 1,
            NodeType::Property | NodeType::PrimitiveValue => {}
            NodeType::None | NodeType::EndOfInput => {
                return Err(ReaderError::new(
                    SyntaxError::UnexpectedEndOfInputWithOpenScope,
                    reader.position(),
                ));
            }
        }
        previous = node;
        reader.read()?;
        if depth == 0 {
            return Ok(());
        }
    }
}

/// Appends one lexeme, re-inserting the separators the lexemes exclude.
fn write_lexeme(out: &mut String, previous: NodeType, node: NodeType, raw: &str) {
    let value_ended = matches!(
        previous,
        NodeType::PrimitiveValue | NodeType::EndObject | NodeType::EndArray
    );
    if value_ended && !node.is_scope_end() {
        out.push(',');
    }
    out.push_str(raw);
    if node == NodeType::Property {
        out.push(':');
    }
}
