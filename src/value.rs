use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// The result of parsing a querystring.
///
/// Keys keep the order in which they were first encountered. The map has no
/// inherited members, so a key like `hasOwnProperty` is ordinary data.
pub type ParsedMapping = IndexMap<String, ParsedValue>;

/// A single value in a [`ParsedMapping`].
///
/// - `Null`: a bare key without `=`, e.g. `flag`
/// - `String`: a key that appeared once with a value, e.g. `key=value`
/// - `Sequence`: a key that appeared more than once, e.g. `a=1&a&a=3`
/// - `Map`: nested data produced by a formatter, e.g. `filter[name]=x`
#[derive(Clone, PartialEq, Eq)]
pub enum ParsedValue {
    Null,
    String(String),
    Sequence(Vec<Option<String>>),
    Map(ParsedMapping),
}

impl ParsedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParsedValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParsedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Option<String>]> {
        match self {
            ParsedValue::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ParsedMapping> {
        match self {
            ParsedValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Adds another occurrence of the same key.
    ///
    /// A scalar becomes a two element sequence, a sequence grows by one.
    pub(crate) fn push(&mut self, value: Option<String>) {
        match self {
            ParsedValue::Sequence(seq) => seq.push(value),
            ParsedValue::Null => *self = ParsedValue::Sequence(vec![None, value]),
            ParsedValue::String(existing) => {
                let existing = std::mem::take(existing);
                *self = ParsedValue::Sequence(vec![Some(existing), value]);
            }
            // maps never come out of aggregation
            ParsedValue::Map(_) => *self = ParsedValue::Sequence(vec![value]),
        }
    }
}

impl From<Option<String>> for ParsedValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => ParsedValue::String(s),
            None => ParsedValue::Null,
        }
    }
}

impl From<&str> for ParsedValue {
    fn from(s: &str) -> Self {
        ParsedValue::String(s.to_owned())
    }
}

impl From<String> for ParsedValue {
    fn from(s: String) -> Self {
        ParsedValue::String(s)
    }
}

impl fmt::Debug for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::Null => write!(f, "Null"),
            ParsedValue::String(s) => write!(f, "String({s:?})"),
            ParsedValue::Sequence(s) => f.debug_list().entries(s.iter()).finish(),
            ParsedValue::Map(m) => f.debug_map().entries(m.iter()).finish(),
        }
    }
}

impl Serialize for ParsedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ParsedValue::Null => serializer.serialize_none(),
            ParsedValue::String(s) => serializer.serialize_str(s),
            ParsedValue::Sequence(seq) => serializer.collect_seq(seq),
            ParsedValue::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}
