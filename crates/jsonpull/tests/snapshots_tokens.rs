#![expect(missing_docs)]

mod common;

use core::fmt::Write;

use insta::assert_snapshot;
use jsonpull::{JsonReader, JsonReaderExt, ReaderOptions};

use crate::common::{DOCUMENT, render_tokens};

#[test]
fn snapshot_document_tokens() {
    let mut reader = JsonReader::from_text(DOCUMENT, ReaderOptions::verbose());
    assert_snapshot!(render_tokens(&mut reader), @r#"
    1 StartObject {
    1 Property "id"
    1 PrimitiveValue 42 => Integer(42)
    1 Property "name"
    1 PrimitiveValue 'widget' => String("widget")
    1 Property tags
    2 StartArray [
    2 PrimitiveValue "a" => String("a")
    2 PrimitiveValue "b\n" => String("b\n")
    1 EndArray ]
    1 Property "price"
    1 PrimitiveValue 12.5 => Double(12.5)
    1 Property "created"
    1 PrimitiveValue "\/Date(1700000000000+0060)\/" => DateTime(JsonDate { millis: 1700000000000, offset_minutes: Some(60) })
    1 Property "meta"
    2 StartObject {
    2 Property "empty"
    3 StartObject {
    2 EndObject }
    2 Property "list"
    3 StartArray [
    4 StartArray [
    3 EndArray ]
    3 PrimitiveValue null => Null
    3 PrimitiveValue true => Boolean(true)
    2 EndArray ]
    1 EndObject }
    0 EndObject }
    0 EndOfInput
    "#);
}

#[test]
fn snapshot_dates_off() {
    let mut reader = JsonReader::from_text(
        r#"["\/Date(0)\/", '\/Date(-1-0130)\/']"#,
        ReaderOptions::default(),
    );
    assert_snapshot!(render_tokens(&mut reader), @r#"
    1 StartArray [
    1 PrimitiveValue "\/Date(0)\/" => String("/Date(0)/")
    1 PrimitiveValue '\/Date(-1-0130)\/' => String("/Date(-1-0130)/")
    0 EndArray ]
    0 EndOfInput
    "#);
}

#[test]
fn snapshot_skipped_document() {
    let mut reader = JsonReader::from_text(DOCUMENT, ReaderOptions::verbose());
    reader.read().unwrap();
    let mut compact = String::new();
    reader.skip_value_into(&mut compact).unwrap();
    assert!(reader.is_end_of_input());
    assert_snapshot!(compact, @r#"{"id":42,"name":'widget',tags:["a","b\n"],"price":12.5,"created":"\/Date(1700000000000+0060)\/","meta":{"empty":{},"list":[[],null,true]}}"#);
}

#[test]
fn snapshot_error_messages() {
    let inputs = [
        "[1,2,3",
        r#"{"a" 1}"#,
        "[1,]",
        "[,1]",
        "'abc",
        r#""\q""#,
        "nul",
        "1 2",
        "{-1:2}",
        "[1.2.3]",
    ];
    let mut out = String::new();
    for input in inputs {
        let mut reader = JsonReader::from_text(input, ReaderOptions::default());
        let err = loop {
            match reader.read() {
                Ok(true) => {}
                Ok(false) => panic!("{input} should not parse"),
                Err(err) => break err,
            }
        };
        writeln!(out, "{input} -> {err}").unwrap();
    }
    assert_snapshot!(out, @r#"
    [1,2,3 -> syntax error: unexpected end of input with open scope at 1:7
    {"a" 1} -> syntax error: missing colon after property name at 1:6
    [1,] -> syntax error: trailing comma before closing bracket at 1:4
    [,1] -> syntax error: unexpected comma at 1:2
    'abc -> syntax error: unterminated string at 1:1
    "\q" -> syntax error: unrecognized escape sequence '\q' at 1:2
    nul -> syntax error: unexpected token 'nul' at 1:1
    1 2 -> syntax error: multiple top-level values at 1:3
    {-1:2} -> syntax error: invalid property name at 1:2
    [1.2.3] -> syntax error: invalid number format '1.2.3' at 1:2
    "#);
}
