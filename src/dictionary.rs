//! The string table shared by a page stream and its dictionary file.
//!
//! Every string the parser emits as text -- tag names aside -- is an
//! index into this table. Strings are XML-escaped once, at load time,
//! since every consumer of a looked-up string wants the escaped form.

use crate::error::{Error, Result};
use crate::varint::{decode_varint, Reader};

/// An immutable, XML-escaped string table loaded from a dictionary file.
pub struct Dictionary {
    strings: Vec<String>,
}

impl Dictionary {
    /// Parses a dictionary file: a VarInt count followed by that many
    /// length-prefixed UTF-8 strings.
    pub fn load(data: &[u8]) -> Result<Dictionary> {
        let mut reader = Reader::new(data);
        let count = decode_varint(&mut reader).ok_or(Error::Truncated)?;
        let mut strings = Vec::with_capacity(count.max(0) as usize);
        for i in 0..count {
            let len = decode_varint(&mut reader).ok_or(Error::Truncated)?;
            let bytes = reader.read_bytes(len as usize).ok_or(Error::Truncated)?;
            let raw = std::str::from_utf8(bytes).map_err(|source| {
                Error::InvalidDictionaryString {
                    index: i as usize,
                    source,
                }
            })?;
            strings.push(escape(raw));
        }
        Ok(Dictionary { strings })
    }

    /// Looks up string `index`. Fatal (per the format's error policy) if
    /// the index is out of range.
    pub fn lookup(&self, index: i64) -> Result<&str> {
        if index >= 0 && (index as usize) < self.strings.len() {
            Ok(&self.strings[index as usize])
        } else {
            Err(Error::DictionaryIndexOutOfRange {
                index,
                size: self.strings.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '=' => out.push_str("&#61;"),
            _ => out.push(c),
        }
    }
    out
}
