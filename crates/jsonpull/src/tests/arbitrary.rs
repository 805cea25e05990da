use alloc::{string::String, vec::Vec};
use core::fmt;

use quickcheck::{Arbitrary, Gen};

use crate::{NodeType, Value};

/// A generated document. Rendering is compact, so the rendered text is
/// exactly the concatenation of the lexemes plus separators.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Doc {
    Scalar(Value),
    Array(Vec<Doc>),
    Object(Vec<(String, Doc)>),
}

impl Doc {
    /// Node types and values a reader must produce for this document,
    /// excluding the trailing `EndOfInput`.
    pub(crate) fn expected_nodes(&self, out: &mut Vec<(NodeType, Option<Value>)>) {
        match self {
            Doc::Scalar(v) => out.push((NodeType::PrimitiveValue, Some(v.clone()))),
            Doc::Array(items) => {
                out.push((NodeType::StartArray, None));
                for item in items {
                    item.expected_nodes(out);
                }
                out.push((NodeType::EndArray, None));
            }
            Doc::Object(members) => {
                out.push((NodeType::StartObject, None));
                for (name, item) in members {
                    out.push((NodeType::Property, Some(Value::from(name.as_str()))));
                    item.expected_nodes(out);
                }
                out.push((NodeType::EndObject, None));
            }
        }
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Doc::Scalar(v) => write!(f, "{v}"),
            Doc::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Doc::Object(members) => {
                f.write_str("{")?;
                for (i, (name, item)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{item}", Value::from(name.as_str()))?;
                }
                f.write_str("}")
            }
        }
    }
}

fn scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 5 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Integer(i32::arbitrary(g)),
        3 => {
            let mut value = f64::arbitrary(g);
            while !value.is_finite() {
                value = f64::arbitrary(g);
            }
            Value::Double(value)
        }
        _ => Value::String(String::arbitrary(g)),
    }
}

fn gen_doc(g: &mut Gen, depth: usize) -> Doc {
    let pick = if depth == 0 { 0 } else { usize::arbitrary(g) % 3 };
    match pick {
        1 => {
            let len = usize::arbitrary(g) % 4;
            Doc::Array((0..len).map(|_| gen_doc(g, depth - 1)).collect())
        }
        2 => {
            let len = usize::arbitrary(g) % 4;
            Doc::Object(
                (0..len)
                    .map(|_| {
                        // Empty names are rejected by the reader.
                        let mut name = String::from("k");
                        name.push_str(&String::arbitrary(g));
                        (name, gen_doc(g, depth - 1))
                    })
                    .collect(),
            )
        }
        _ => Doc::Scalar(scalar(g)),
    }
}

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_doc(g, 3)
    }
}
