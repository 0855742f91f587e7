//! The in-memory tree node types produced by the page parser.

use crate::error::{Error, Result};

/// How a schema entry's argument value should be interpreted.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArgType {
    ScalarNumber,
    ScalarText,
    Number,
    Text,
    Raw,
    Snippets,
}

impl ArgType {
    pub(crate) fn from_str(s: &str) -> Result<ArgType> {
        match s {
            "scalar_number" => Ok(ArgType::ScalarNumber),
            "scalar_text" => Ok(ArgType::ScalarText),
            "number" => Ok(ArgType::Number),
            "text" => Ok(ArgType::Text),
            "raw" => Ok(ArgType::Raw),
            "snippets" => Ok(ArgType::Snippets),
            _ => Err(Error::UnknownArgType),
        }
    }

    pub(crate) fn is_text_like(&self) -> bool {
        matches!(self, ArgType::Text | ArgType::ScalarText)
    }

    pub(crate) fn is_scalar(&self) -> bool {
        matches!(self, ArgType::ScalarNumber | ArgType::ScalarText)
    }
}

/// A single formatted tag argument: either a resolved dictionary string
/// or a raw/numeric value (including an unresolved snippet index, before
/// injection).
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Int(i64),
    Text(String),
}

impl Arg {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(v) => Some(*v),
            Arg::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Int(v) => write!(f, "{}", v),
            Arg::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A parsed tag: its dotted path as of the point it was parsed, its
/// children, and its (possibly empty) argument list.
#[derive(Clone, Debug)]
pub struct Tag {
    pub name: String,
    pub children: Vec<Tag>,
    pub arg_type: ArgType,
    pub args: Vec<Arg>,
}

impl Tag {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// The last dotted segment of `name`, i.e. the short tag name used
    /// when rendering nested XML.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// A fully decoded page stream: the ordered root tags, plus the snippet
/// table used during parsing (empty after injection has consumed it).
pub struct Document {
    pub roots: Vec<Tag>,
}
