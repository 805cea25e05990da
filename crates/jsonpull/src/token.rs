//! Token and node types produced by a single `read` call.

use alloc::string::String;
use core::fmt;

use crate::value::Value;

/// The kind of node a reader is positioned on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// No node has been read yet.
    #[default]
    None,
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// A property name inside an object; the value is the decoded name.
    Property,
    /// A string, number, boolean, null or date literal.
    PrimitiveValue,
    /// The single top-level value has been fully read.
    EndOfInput,
}

impl NodeType {
    /// Returns `true` for nodes that start a value: `StartObject`,
    /// `StartArray` and `PrimitiveValue`.
    #[must_use]
    pub fn is_value_start(self) -> bool {
        matches!(
            self,
            Self::StartObject | Self::StartArray | Self::PrimitiveValue
        )
    }

    /// Returns `true` for `EndObject` and `EndArray`.
    #[must_use]
    pub fn is_scope_end(self) -> bool {
        matches!(self, Self::EndObject | Self::EndArray)
    }
}

/// Broad type of a primitive [`Value`], used in error messages.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    DateTime,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::String => "string",
            Self::DateTime => "date-time",
        })
    }
}

/// One unit of reader output.
///
/// A token is overwritten by the next `read` call. `raw` is the verbatim
/// lexeme that produced it; separators (whitespace, `,` and `:`) are never
/// part of it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    /// Node kind.
    pub node_type: NodeType,
    /// Decoded value for `Property` and `PrimitiveValue` nodes.
    pub value: Option<Value>,
    /// Verbatim source text of the lexeme.
    pub raw: String,
}

impl Token {
    pub(crate) fn structural(node_type: NodeType, raw: char) -> Self {
        let mut s = String::with_capacity(1);
        s.push(raw);
        Self {
            node_type,
            value: None,
            raw: s,
        }
    }

    pub(crate) fn end_of_input() -> Self {
        Self {
            node_type: NodeType::EndOfInput,
            value: None,
            raw: String::new(),
        }
    }
}
