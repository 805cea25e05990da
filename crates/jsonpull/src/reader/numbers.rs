use alloc::string::ToString;

use super::error::SyntaxError;
use crate::value::Value;

/// Characters that can begin a number literal.
pub(crate) fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.'
}

/// Characters scanned as part of a number run. The run is maximal; its
/// validity is decided by [`parse_number`], not by the scanner.
pub(crate) fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+')
}

/// Narrow-int-then-wide-float: a run that is an exact `i32` stays integral,
/// anything else must be a finite `f64`. Whole numbers beyond `i32` become
/// doubles and may lose precision.
pub(crate) fn parse_number(text: &str) -> Result<Value, SyntaxError> {
    if let Ok(i) = text.parse::<i32>() {
        return Ok(Value::Integer(i));
    }
    match text.parse::<f64>() {
        Ok(d) if d.is_finite() => Ok(Value::Double(d)),
        _ => Err(SyntaxError::InvalidNumberFormat(text.to_string())),
    }
}
