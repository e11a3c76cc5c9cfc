//! Parsing support for querystrings.
//!
//! ### An overview of the parse pipeline
//!
//! Parsing happens in four stages, each of which lives in its own module:
//!
//! 1. `parse::tokenize` strips a single leading `?`, `#` or `&` and splits
//!    the remaining input into [`QueryPair`]s on `&`, and each segment on its
//!    first `=`.
//! 2. `QueryPair::decode` percent-decodes keys and values with URI component
//!    semantics (so `+` is kept as-is). Malformed escapes fail the whole call.
//! 3. `aggregate` merges pairs sharing a key. A key seen once keeps its
//!    scalar value, a key seen `n` times becomes a sequence of `n` values.
//! 4. The configured [`Formatters`](crate::Formatters) rewrite the aggregated
//!    mapping, e.g. to expand bracket notation.
//!
//! Blank input (or input that is not UTF-8) short-circuits to an empty
//! mapping before any of this happens.

mod aggregate;
mod parse;

pub use parse::{Pairs, QueryPair, tokenize};

use std::borrow::Cow;

use crate::error::Result;
use crate::value::ParsedMapping;

/// Parses a querystring using the default [`Config`](crate::Config).
///
/// Accepts either a `&str` or an `Option<&str>`; `None` yields an empty
/// mapping.
///
/// ```
/// use querify::ParsedValue;
///
/// let parsed = querify::parse("?name=Acme&tag=a&tag=b&flag").unwrap();
/// assert_eq!(parsed["name"].as_str(), Some("Acme"));
/// assert_eq!(
///     parsed["tag"],
///     ParsedValue::Sequence(vec![Some("a".into()), Some("b".into())])
/// );
/// assert!(parsed["flag"].is_null());
///
/// assert!(querify::parse(None::<&str>).unwrap().is_empty());
/// ```
pub fn parse<'a>(input: impl Into<Option<&'a str>>) -> Result<ParsedMapping> {
    match input.into() {
        Some(input) => crate::Config::default().parse_str(input),
        None => Ok(ParsedMapping::default()),
    }
}

/// Parses a querystring from raw bytes using the default
/// [`Config`](crate::Config).
///
/// Input that is not valid UTF-8 is not a querystring and yields an empty
/// mapping.
pub fn from_bytes(input: &[u8]) -> Result<ParsedMapping> {
    crate::Config::default().parse_bytes(input)
}

pub(crate) fn parse_with(input: &str, config: &crate::Config) -> Result<ParsedMapping> {
    let Some(pairs) = tokenize(input) else {
        tracing::trace!("blank querystring, nothing to parse");
        return Ok(ParsedMapping::default());
    };

    let decoded = pairs
        .map(|pair| -> Result<(String, Option<String>)> {
            let (key, value) = pair.decode(config.decode)?;
            Ok((key.into_owned(), value.map(Cow::into_owned)))
        })
        .collect::<Result<Vec<_>>>()?;
    let mapping = aggregate::aggregate(decoded);
    tracing::trace!(keys = mapping.len(), "aggregated querystring");

    Ok(config.formatters.apply(mapping))
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::value::{ParsedMapping, ParsedValue};
    use crate::{Config, Error};

    use pretty_assertions::assert_eq;

    fn map(entries: &[(&str, ParsedValue)]) -> ParsedMapping {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn parse_empty() {
        for input in ["", " ", "#", "?", "&"] {
            assert_eq!(parse(input).unwrap(), ParsedMapping::default());
        }
        assert_eq!(parse(None::<&str>).unwrap(), ParsedMapping::default());
    }

    #[test]
    fn parse_map() {
        assert_eq!(
            parse("foo=bar&baz=qux").unwrap(),
            map(&[("foo", "bar".into()), ("baz", "qux".into())])
        );
    }

    #[test]
    fn parse_no_value() {
        assert_eq!(
            parse("foo&bar=baz").unwrap(),
            map(&[("foo", ParsedValue::Null), ("bar", "baz".into())])
        );
        assert_eq!(
            parse("foo&foo").unwrap(),
            map(&[("foo", ParsedValue::Sequence(vec![None, None]))])
        );
    }

    #[test]
    fn parse_empty_value_is_not_null() {
        assert_eq!(parse("foo=").unwrap(), map(&[("foo", "".into())]));
    }

    #[test]
    fn parse_malformed_escape_fails() {
        // the offset is relative to the value being decoded
        let err = parse("ok=1&bad=%E0%A4%A").unwrap_err();
        match err {
            Error::MalformedEscape { sequence, position } => {
                assert_eq!(sequence, "%A");
                assert_eq!(position, 6);
            }
            err => panic!("unexpected error: {err}"),
        }
        let err = parse("ok=1&%zzbad=1").unwrap_err();
        assert!(matches!(err, Error::MalformedEscape { position: 0, .. }), "{err}");
        assert!(matches!(parse("%C3=x"), Err(Error::InvalidUtf8(_))));
    }

    #[test]
    fn parse_without_decoding_accepts_malformed_escapes() {
        let parsed = Config::new().decode(false).parse_str("a=%zz").unwrap();
        assert_eq!(parsed, map(&[("a", "%zz".into())]));
    }
}
