#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::Write;

use jsonpull::{JsonReader, NodeType, TextSource};

/// A document exercising every node type, both quote styles, unquoted names
/// and an ASP.NET date.
pub const DOCUMENT: &str = r#"
{
    "id": 42,
    "name": 'widget',
    tags: ["a", "b\n"],
    "price": 12.5,
    "created": "\/Date(1700000000000+0060)\/",
    "meta": {"empty": {}, "list": [[], null, true]}
}
"#;

/// One line per token: depth after the token, node type, raw lexeme and the
/// decoded value of primitives.
pub fn render_tokens<S: TextSource>(reader: &mut JsonReader<S>) -> String {
    let mut out = String::new();
    loop {
        let more = reader.read().expect("reader error");
        write!(out, "{} {:?}", reader.depth(), reader.node_type()).unwrap();
        if !reader.raw_value().is_empty() {
            write!(out, " {}", reader.raw_value()).unwrap();
        }
        if reader.node_type() == NodeType::PrimitiveValue {
            write!(out, " => {:?}", reader.value().unwrap()).unwrap();
        }
        out.push('\n');
        if !more {
            return out;
        }
    }
}
