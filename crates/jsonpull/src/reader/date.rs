//! ASP.NET `\/Date(millis[+-hhmm])\/` detection.
//!
//! Only strings whose source text starts with a backslash are candidates; the
//! decoded text must then match `/Date(` `-?[0-9]+` `([+-][0-9]{4})?` `)/`
//! exactly. Anything else stays a plain string.

use crate::value::JsonDate;

pub(crate) fn parse_aspnet_date(text: &str) -> Option<JsonDate> {
    let inner = text.strip_prefix("/Date(")?.strip_suffix(")/")?;

    let digits_start = usize::from(inner.starts_with('-'));
    let digit_count = inner[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digit_count == 0 {
        return None;
    }
    let ticks_end = digits_start + digit_count;
    let millis: i64 = inner[..ticks_end].parse().ok()?;

    let rest = &inner[ticks_end..];
    let offset_minutes = if rest.is_empty() {
        None
    } else {
        let (negative, digits) = match rest.strip_prefix('+') {
            Some(digits) => (false, digits),
            None => (true, rest.strip_prefix('-')?),
        };
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let minutes: i16 = digits.parse().ok()?;
        Some(if negative { -minutes } else { minutes })
    };

    Some(JsonDate {
        millis,
        offset_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_and_offset_forms() {
        assert_eq!(
            parse_aspnet_date("/Date(1234567890)/"),
            Some(JsonDate {
                millis: 1_234_567_890,
                offset_minutes: None
            })
        );
        assert_eq!(
            parse_aspnet_date("/Date(-86400000+0060)/"),
            Some(JsonDate {
                millis: -86_400_000,
                offset_minutes: Some(60)
            })
        );
        assert_eq!(
            parse_aspnet_date("/Date(0-0130)/"),
            Some(JsonDate {
                millis: 0,
                offset_minutes: Some(-130)
            })
        );
    }

    #[test]
    fn near_misses_stay_strings() {
        for text in [
            "/Date()/",
            "/Date(12)",
            "Date(12)/",
            "/Date(1+01)/",
            "/Date(1*0100)/",
            "/Date(99999999999999999999)/",
            "/Date(12)/ ",
            "/Date(1+01é0)/",
        ] {
            assert_eq!(parse_aspnet_date(text), None, "{text}");
        }
    }
}
