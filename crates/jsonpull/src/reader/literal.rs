//! Name-token scanning and keyword matching.
//!
//! Unquoted property names and the `true`/`false`/`null` keywords share one
//! scanning rule: a maximal run of name characters. Keywords are compared
//! case-sensitively after the run is scanned, so `nullx` or `True` is an
//! unexpected token rather than a keyword followed by garbage.

use alloc::string::String;

use super::error::SyntaxError;
use crate::value::Value;

/// Fixed literal spellings.
pub(crate) const NULL: &str = "null";
pub(crate) const TRUE: &str = "true";
pub(crate) const FALSE: &str = "false";

/// Whether `c` may appear in an unquoted name. `.` and `@` are only allowed
/// when annotation names are enabled.
pub(crate) fn is_name_char(c: char, allow_annotations: bool) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || (allow_annotations && (c == '.' || c == '@'))
}

/// Maps a scanned keyword run to its value.
pub(crate) fn keyword_value(run: &str) -> Result<Value, SyntaxError> {
    match run {
        NULL => Ok(Value::Null),
        TRUE => Ok(Value::Boolean(true)),
        FALSE => Ok(Value::Boolean(false)),
        other => Err(SyntaxError::UnexpectedToken(String::from(other))),
    }
}
