//! Decoder for the Topaz e-book page-stream binary format.
//!
//! A Topaz document is split across a string dictionary file and one or
//! more page streams (page, glyph, stylesheet, or metadata streams).
//! This crate parses those two inputs into a structured XML-like
//! document describing layout, glyphs, text spans, stylesheet rules,
//! and cross-references.
//!
//! The heavy lifting is a table-driven recursive-descent parser
//! ([`parser::PageParser`]) over a compact variable-length integer
//! encoding ([`varint`]), plus a snippet linker that splices reusable
//! subtrees into the final tree by numeric reference. See
//! [`from_data`] and [`get_xml`] for the two top-level entry points.

pub mod dictionary;
pub mod error;
pub mod format;
pub mod parser;
pub mod schema;
pub mod tag;
pub mod varint;

pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use tag::{Arg, ArgType, Document, Tag};

use parser::PageParser;
use std::fs;
use std::path::Path;

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes the page stream at `page_path` against `dict` and renders it
/// as flat XML (one line per tag, `path=value` syntax).
pub fn from_data(dict: &Dictionary, page_path: &Path) -> Result<String> {
    let data = read_file(page_path)?;
    let doc = PageParser::new(&data, dict).process()?;
    Ok(format::format_flat(&doc))
}

/// Decodes the page stream at `page_path` against `dict` and renders it
/// as indented, nested XML with opening and closing tags.
pub fn get_xml(dict: &Dictionary, page_path: &Path) -> Result<String> {
    let data = read_file(page_path)?;
    let doc = PageParser::new(&data, dict).process()?;
    Ok(format::format_nested(&doc))
}

impl Dictionary {
    /// Loads a dictionary from a file path, per the library's `Error::Io`
    /// convention.
    pub fn load_file(path: &Path) -> Result<Dictionary> {
        let data = read_file(path)?;
        Dictionary::load(&data)
    }
}
