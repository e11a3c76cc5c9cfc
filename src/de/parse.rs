use std::borrow::Cow;
use std::fmt;

use crate::error::Result;

mod decode;

pub use decode::decode;

/// A raw `key=value` segment of a querystring.
///
/// `value` is `None` for a bare key with no `=` at all, which is distinct
/// from an empty value (`key=`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct QueryPair<'qs> {
    pub key: &'qs str,
    pub value: Option<&'qs str>,
}

impl<'qs> QueryPair<'qs> {
    /// Splits a segment on the first `=` only, so `a=b=c` has the value `b=c`.
    fn from_segment(segment: &'qs str) -> Self {
        match segment.split_once('=') {
            Some((key, value)) => QueryPair {
                key,
                value: Some(value),
            },
            None => QueryPair {
                key: segment,
                value: None,
            },
        }
    }

    /// Percent-decodes the key and value independently.
    ///
    /// When `enabled` is false both are returned untouched.
    pub fn decode(self, enabled: bool) -> Result<(Cow<'qs, str>, Option<Cow<'qs, str>>)> {
        if !enabled {
            return Ok((Cow::Borrowed(self.key), self.value.map(Cow::Borrowed)));
        }
        let key = decode(self.key)?;
        let value = self.value.map(decode).transpose()?;
        Ok((key, value))
    }
}

impl fmt::Debug for QueryPair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{:?}={:?}", self.key, value),
            None => write!(f, "{:?}", self.key),
        }
    }
}

/// Removes at most one leading `?`, `#` or `&`.
fn strip_leading_delimiter(input: &str) -> &str {
    match input.as_bytes().first() {
        Some(b'?' | b'#' | b'&') => &input[1..],
        _ => input,
    }
}

/// Iterator over the [`QueryPair`]s of a querystring, in input order.
///
/// Empty segments (e.g. `a=1&&b=2`) are skipped.
#[derive(Clone)]
pub struct Pairs<'qs> {
    segments: std::str::Split<'qs, char>,
}

impl<'qs> Iterator for Pairs<'qs> {
    type Item = QueryPair<'qs>;

    fn next(&mut self) -> Option<Self::Item> {
        self.segments
            .by_ref()
            .find(|segment| !segment.is_empty())
            .map(QueryPair::from_segment)
    }
}

/// Tokenizes a querystring.
///
/// Returns `None` when there is nothing to parse: the input is empty or only
/// whitespace once a leading delimiter has been stripped.
pub fn tokenize(input: &str) -> Option<Pairs<'_>> {
    let stripped = strip_leading_delimiter(input);
    if stripped.trim().is_empty() {
        return None;
    }
    Some(Pairs {
        segments: stripped.split('&'),
    })
}
