//! Fatal decode errors.
//!
//! Per the format's error-handling policy: syntactic stream errors (a
//! truncated VarInt, an out-of-range dictionary index, a schema entry
//! with an unrecognized argument type) are fatal and abort the whole
//! decode. Semantic unknowns -- unrecognized tag tokens, unrecognized
//! vector opcodes -- are tolerated and simply logged, since the format
//! was reverse-engineered and is known to contain constructs outside the
//! schema. Those are not represented here; see [`crate::parser`].

use std::path::PathBuf;

/// Errors that can abort a Topaz document decode.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read one of the two input files.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// End of file was reached while a VarInt or its required payload
    /// bytes were expected.
    #[error("truncated stream: expected more data")]
    Truncated,

    /// A dictionary index in the stream fell outside `0..size`.
    #[error("dictionary index {index} is out of range (size {size})")]
    DictionaryIndexOutOfRange { index: i64, size: usize },

    /// A schema entry named an argument type this decoder doesn't know
    /// how to format. Indicates a corrupt or hand-edited schema table.
    #[error("unknown argument type in schema entry")]
    UnknownArgType,

    /// A dictionary string wasn't valid UTF-8.
    #[error("dictionary string {index} is not valid UTF-8: {source}")]
    InvalidDictionaryString {
        index: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
