use alloc::string::String;

use rstest::rstest;

use super::utils::describe;
use crate::{ReaderOptions, SyntaxError};

#[rstest]
#[case::open_array_at_eof("[1,2,3", SyntaxError::UnexpectedEndOfInputWithOpenScope, (1, 7))]
#[case::open_property_at_eof(r#"{"a":"#, SyntaxError::UnexpectedEndOfInputWithOpenScope, (1, 6))]
#[case::trailing_comma_array("[1,]", SyntaxError::TrailingComma, (1, 4))]
#[case::trailing_comma_object(r#"{"a":1,}"#, SyntaxError::TrailingComma, (1, 8))]
#[case::trailing_comma_next_line("[1\n,\n]", SyntaxError::TrailingComma, (3, 1))]
#[case::leading_comma_array("[,1]", SyntaxError::UnexpectedComma, (1, 2))]
#[case::leading_comma_object("{,}", SyntaxError::UnexpectedComma, (1, 2))]
#[case::comma_at_root(",1", SyntaxError::UnexpectedComma, (1, 1))]
#[case::comma_after_colon(r#"{"a":,1}"#, SyntaxError::UnexpectedComma, (1, 6))]
#[case::comma_then_eof("[1,", SyntaxError::UnexpectedEndOfInput, (1, 4))]
#[case::second_root_value("1 2", SyntaxError::MultipleTopLevelValues, (1, 3))]
#[case::second_root_object("{} {}", SyntaxError::MultipleTopLevelValues, (1, 4))]
#[case::missing_comma_object(r#"{"a":1 "b":2}"#, SyntaxError::MissingComma, (1, 8))]
#[case::missing_comma_array("[1 2]", SyntaxError::MissingComma, (1, 4))]
#[case::mismatched_close(r#"{"a":1]"#, SyntaxError::MissingComma, (1, 7))]
#[case::missing_colon(r#"{"a" 1}"#, SyntaxError::MissingColon, (1, 6))]
#[case::name_at_eof(r#"{"a""#, SyntaxError::MissingColon, (1, 5))]
#[case::empty_quoted_name(r#"{"":1}"#, SyntaxError::InvalidPropertyName, (1, 2))]
#[case::empty_single_quoted_name("{'':1}", SyntaxError::InvalidPropertyName, (1, 2))]
#[case::no_name("{:1}", SyntaxError::InvalidPropertyName, (1, 2))]
#[case::annotation_without_flag("{@a:1}", SyntaxError::InvalidPropertyName, (1, 2))]
#[case::unterminated_string(r#""abc"#, SyntaxError::UnterminatedString, (1, 1))]
#[case::unterminated_escape(r#"["a\"#, SyntaxError::UnterminatedString, (1, 2))]
#[case::unknown_escape(r#""\x""#, SyntaxError::UnrecognizedEscapeSequence(String::from("\\x")), (1, 2))]
#[case::bad_hex_digit(r#""\u12G4""#, SyntaxError::InvalidUnicodeEscapeChar('G'), (1, 6))]
#[case::short_unicode_escape(r#""\u12"#, SyntaxError::UnterminatedString, (1, 1))]
#[case::lone_high_surrogate(r#""\uD800""#, SyntaxError::InvalidUnicodeEscapeSequence(0xD800), (1, 2))]
#[case::high_then_non_low(r#""\uD800\u0041""#, SyntaxError::InvalidUnicodeEscapeSequence(0x41), (1, 8))]
#[case::truncated_keyword("tru", SyntaxError::UnexpectedToken(String::from("tru")), (1, 1))]
#[case::long_keyword("[nulll]", SyntaxError::UnexpectedToken(String::from("nulll")), (1, 2))]
#[case::two_dots("1.2.3", SyntaxError::InvalidNumberFormat(String::from("1.2.3")), (1, 1))]
#[case::infinite("1e999", SyntaxError::InvalidNumberFormat(String::from("1e999")), (1, 1))]
#[case::lone_minus("[-]", SyntaxError::InvalidNumberFormat(String::from("-")), (1, 2))]
#[case::unknown_start("@", SyntaxError::UnrecognizedToken('@'), (1, 1))]
#[case::close_without_open("]", SyntaxError::UnrecognizedToken(']'), (1, 1))]
#[case::wrong_close("[}", SyntaxError::UnrecognizedToken('}'), (1, 2))]
#[case::comment("/* no */ 1", SyntaxError::UnrecognizedToken('/'), (1, 1))]
fn rejects_malformed_input(
    #[case] text: &str,
    #[case] expected: SyntaxError,
    #[case] position: (usize, usize),
) {
    let err = describe(text, ReaderOptions::default()).unwrap_err();
    assert_eq!(err.as_syntax(), Some(&expected), "{err}");
    assert_eq!((err.line, err.column), position, "{err}");
}

#[test]
fn error_message_includes_position() {
    let err = describe("[1 2]", ReaderOptions::default()).unwrap_err();
    assert_eq!(
        alloc::format!("{err}"),
        "syntax error: missing comma between values at 1:4"
    );
}
