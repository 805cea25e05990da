#![allow(missing_docs)]

use alloc::string::String;

use thiserror::Error;

use crate::token::{NodeType, PrimitiveKind};

/// A fatal error raised by a reader.
///
/// Every error carries the 1-based line and column of the character at which
/// it was detected. Once returned from `read`, the reader is poisoned.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {line}:{column}")]
pub struct ReaderError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure.
    pub column: usize,
}

impl ReaderError {
    pub(crate) fn new(kind: impl Into<ErrorKind>, (line, column): (usize, usize)) -> Self {
        Self {
            kind: kind.into(),
            line,
            column,
        }
    }

    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match &self.kind {
            ErrorKind::Syntax(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the contract error, if this is one.
    #[must_use]
    pub fn as_contract(&self) -> Option<&ContractError> {
        match &self.kind {
            ErrorKind::Contract(e) => Some(e),
            _ => None,
        }
    }
}

/// Classification of a [`ReaderError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The input does not follow the grammar.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// The caller used the reader in a way its current state does not allow.
    #[error("contract violation: {0}")]
    Contract(#[from] ContractError),
    /// The character source failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Structural and lexical grammar violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected comma")]
    UnexpectedComma,
    #[error("missing comma between values")]
    MissingComma,
    #[error("trailing comma before closing bracket")]
    TrailingComma,
    #[error("multiple top-level values")]
    MultipleTopLevelValues,
    #[error("unexpected end of input with open scope")]
    UnexpectedEndOfInputWithOpenScope,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unrecognized escape sequence '{0}'")]
    UnrecognizedEscapeSequence(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    #[error("invalid number format '{0}'")]
    InvalidNumberFormat(String),
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unrecognized token starting with '{0}'")]
    UnrecognizedToken(char),
    #[error("invalid property name")]
    InvalidPropertyName,
    #[error("missing colon after property name")]
    MissingColon,
}

/// Caller misuse of a reader or of the helpers layered on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("expected node {expected:?}, found {found:?}")]
    UnexpectedNodeType { expected: NodeType, found: NodeType },
    #[error("cannot skip: reader is positioned on {0:?}, not on a value")]
    NotOnValue(NodeType),
    #[error("expected a {expected} value, found {found}")]
    PrimitiveTypeMismatch {
        expected: &'static str,
        found: PrimitiveKind,
    },
    #[error("buffering is already active")]
    BufferingAlreadyActive,
    #[error("buffering is not active")]
    BufferingNotActive,
    #[error("reader was used after a fatal error")]
    ReadAfterError,
}

/// Failure reported by a [`TextSource`](crate::TextSource).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("invalid UTF-8 at byte offset {0}")]
    InvalidUtf8(usize),
    #[error("input ended inside a UTF-8 sequence")]
    TruncatedUtf8,
    #[error("{0}")]
    Io(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        use alloc::string::ToString;
        Self::Io(err.to_string())
    }
}
