//! Primitive values decoded by the literal parsers.
//!
//! [`Value`] only ever holds scalars: containers are reported as
//! `StartObject`/`StartArray` nodes and never materialised by the reader.
//! `Display` re-encodes a value in the literal syntax the reader accepts.

use alloc::string::String;
use core::fmt;

use crate::token::PrimitiveKind;

/// A decoded primitive or property name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any number that parses exactly as a 32-bit signed integer.
    Integer(i32),
    /// Every other valid number.
    Double(f64),
    /// A decoded string literal or property name.
    String(String),
    /// An ASP.NET-style `\/Date(...)\/` string, only produced when date
    /// detection is enabled.
    DateTime(JsonDate),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<JsonDate> for Value {
    fn from(v: JsonDate) -> Self {
        Self::DateTime(v)
    }
}

impl Value {
    /// Returns the broad kind of this value.
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Null => PrimitiveKind::Null,
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Integer(_) => PrimitiveKind::Integer,
            Self::Double(_) => PrimitiveKind::Double,
            Self::String(_) => PrimitiveKind::String,
            Self::DateTime(_) => PrimitiveKind::DateTime,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string payload, if any.
    ///
    /// ```
    /// use jsonpull::Value;
    ///
    /// assert_eq!(Value::from("x").as_str(), Some("x"));
    /// assert_eq!(Value::Null.as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number as `f64`, widening integers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(f64::from(*i)),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// A `/Date(millis[+-hhmm])/` timestamp.
///
/// `millis` counts milliseconds since the Unix epoch. `offset_minutes` is the
/// signed offset in minutes when one was written; the four offset digits are
/// read as a plain decimal minute count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JsonDate {
    /// Milliseconds since 1970-01-01T00:00:00Z.
    pub millis: i64,
    /// Offset from UTC in minutes, if present.
    pub offset_minutes: Option<i16>,
}

impl fmt::Display for JsonDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/Date({}", self.millis)?;
        if let Some(offset) = self.offset_minutes {
            let sign = if offset < 0 { '-' } else { '+' };
            write!(f, "{sign}{:04}", offset.unsigned_abs())?;
        }
        f.write_str(")/")
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters and the Unicode line separators
/// are written as escapes; everything else is copied through.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Pre-2019 parsers choke on raw line separators.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && (c as u32) <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d:?}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            // The leading `\/` is what marks the string as a date candidate.
            Value::DateTime(d) => {
                let text = alloc::format!("{d}");
                write!(f, "\"\\{}\\/\"", &text[..text.len() - 1])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn payload_accessors_match_only_their_kind() {
        assert!(Value::Null.is_null());
        assert!(!Value::from("null").is_null());
        assert_eq!(Value::Boolean(false).as_bool(), Some(false));
        assert_eq!(Value::Integer(1).as_bool(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn display_escapes_strings() {
        let v = Value::from("a\"b\\c\nd\u{1}");
        assert_eq!(v.to_string(), r#""a\"b\\c\nd\u0001""#);
    }

    #[test]
    fn display_keeps_double_marker() {
        assert_eq!(Value::Double(1.0).to_string(), "1.0");
        assert_eq!(Value::Double(-2.5e-8).to_string(), "-2.5e-8");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
    }

    #[test]
    fn display_dates() {
        let utc = JsonDate {
            millis: 1_000,
            offset_minutes: None,
        };
        assert_eq!(utc.to_string(), "/Date(1000)/");
        assert_eq!(Value::DateTime(utc).to_string(), r#""\/Date(1000)\/""#);

        let offset = JsonDate {
            millis: -5,
            offset_minutes: Some(-90),
        };
        assert_eq!(offset.to_string(), "/Date(-5-0090)/");
    }
}
