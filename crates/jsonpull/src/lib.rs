//! A pull-based, streaming JSON tokenizer.
//!
//! [`JsonReader`] turns a character stream into one [`Token`] per `read`
//! call, validating structure as it goes and never holding more than a
//! sliding window of the input. [`JsonReaderExt`] layers "expect node X"
//! and subtree-skipping helpers on top, and [`BufferingReader`] adds
//! rewindable lookahead for sniffing a payload's shape before committing to
//! a parse path.
//!
//! ```rust
//! use jsonpull::{JsonReader, NodeType, ReaderOptions, Value};
//!
//! let mut reader = JsonReader::from_text("{'a': [true, null]}", ReaderOptions::default());
//! reader.read()?;
//! assert_eq!(reader.node_type(), NodeType::StartObject);
//! reader.read()?;
//! assert_eq!(reader.value(), Some(&Value::from("a")));
//! # Ok::<(), jsonpull::ReaderError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffering;
mod ext;
mod reader;
mod token;
mod value;

#[cfg(test)]
mod tests;

pub use buffering::BufferingReader;
pub use ext::{JsonReaderExt, TokenReader};
#[cfg(feature = "std")]
pub use reader::source::IoSource;
pub use reader::{
    JsonReader, ReaderOptions,
    error::{ContractError, ErrorKind, ReaderError, SourceError, SyntaxError},
    source::{StrSource, TextSource, Utf8Source},
};
pub use token::{NodeType, PrimitiveKind, Token};
pub use value::{JsonDate, Value};
