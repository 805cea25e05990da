#![no_main]

use arbitrary::Arbitrary;
use jsonpull::{
    BufferingReader, JsonReader, JsonReaderExt, NodeType, ReaderOptions, SourceError, TextSource,
    TokenReader,
};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

#[derive(Debug, Arbitrary)]
struct Input {
    flags: u8,
    capacity: u8,
    splits: Vec<u8>,
    text: String,
}

/// Feeds the text in fuzzer-chosen chunk sizes.
struct Chunks<'a> {
    chars: Vec<char>,
    pos: usize,
    splits: &'a [u8],
}

impl TextSource for Chunks<'_> {
    fn read_chars(&mut self, dst: &mut [char]) -> Result<usize, SourceError> {
        let remaining = self.chars.len() - self.pos;
        if remaining == 0 {
            return Ok(0);
        }
        let want = match self.splits.split_first() {
            Some((&s, rest)) => {
                self.splits = rest;
                1 + usize::from(s) % remaining
            }
            None => remaining,
        };
        let n = want.min(dst.len());
        dst[..n].copy_from_slice(&self.chars[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn options(input: &Input) -> ReaderOptions {
    ReaderOptions {
        allow_annotations: input.flags & 1 != 0,
        detect_aspnet_dates: input.flags & 2 != 0,
        initial_buffer_capacity: 1 + usize::from(input.capacity),
        panic_on_error: false,
    }
}

/// Counts the scalars in a document and reports whether it uses an empty
/// property name, which the reader rejects.
fn scalars(value: &Value, empty_name: &mut bool) -> usize {
    match value {
        Value::Array(items) => items.iter().map(|v| scalars(v, empty_name)).sum(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                *empty_name |= k.is_empty();
                scalars(v, empty_name)
            })
            .sum(),
        _ => 1,
    }
}

fuzz_target!(|input: Input| {
    let mut reader = JsonReader::new(
        Chunks {
            chars: input.text.chars().collect(),
            pos: 0,
            splits: &input.splits,
        },
        options(&input),
    );

    let mut primitives = 0;
    let result = loop {
        match reader.read() {
            Ok(true) => {
                if reader.node_type() == NodeType::PrimitiveValue {
                    primitives += 1;
                }
            }
            Ok(false) => break Ok(()),
            Err(err) => break Err(err),
        }
    };
    if result.is_ok() {
        assert_eq!(reader.depth(), 0);
    }

    // Anything strict JSON accepts must be accepted here too. Duplicate keys
    // collapse in serde_json's map, so its scalar count can only be lower.
    if let Ok(value) = serde_json::from_str::<Value>(&input.text) {
        let mut empty_name = false;
        let expected = scalars(&value, &mut empty_name);
        if !empty_name {
            assert!(result.is_ok(), "rejected valid JSON: {result:?}");
            assert!(primitives >= expected);
        }
    }

    // Skipping the root through a rewound lookahead agrees with plain reading.
    let mut buffered = BufferingReader::new(JsonReader::from_text(&input.text, options(&input)));
    let skipped = buffered
        .lookahead(|r| {
            if r.read()? {
                r.skip_value()?;
            }
            Ok(r.node_type())
        })
        .and_then(|end| {
            while buffered.read()? {}
            Ok(end)
        });
    match (&result, skipped) {
        (Ok(()), Ok(end)) => assert_eq!(end, NodeType::EndOfInput),
        (Ok(()), Err(err)) => panic!("skip failed on accepted input: {err}"),
        (Err(_), _) => {}
    }
});
