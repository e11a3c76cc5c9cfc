use std::io::Write;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::format::{Formatter, Formatters};
use crate::ser::QsSerializer;
use crate::value::ParsedMapping;

/// Configuration for parsing and serialization behavior.
///
/// A `Config` is built once and passed to every call; there are no global
/// defaults to mutate.
///
/// ## Decoding and encoding
///
/// By default keys and values are percent-decoded when parsing and
/// percent-encoded when serializing. Either step can be switched off:
///
/// ```
/// use querify::Config;
///
/// let parsed = Config::new().decode(false).parse_str("a%20b=c%2Cd").unwrap();
/// assert_eq!(parsed["a%20b"].as_str(), Some("c%2Cd"));
///
/// let query = [("a b", "c,d")];
/// let map: std::collections::BTreeMap<_, _> = query.into_iter().collect();
/// assert_eq!(Config::new().encode(false).stringify(&map).unwrap(), "a b=c,d");
/// ```
///
/// ## Formatters
///
/// Formatters post-process the parsed mapping, in the order they were added.
/// Serialization does not use them.
///
/// ```
/// use querify::{BracketFormatter, Config};
///
/// let config = Config::new().formatter(BracketFormatter);
/// let parsed = config.parse_str("page[size]=10").unwrap();
/// assert!(parsed["page"].as_map().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) decode: bool,
    pub(crate) encode: bool,
    pub(crate) formatters: Formatters,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            decode: true,
            encode: true,
            formatters: Formatters::new(),
        }
    }

    /// Whether keys and values are percent-decoded while parsing.
    /// Default is `true`.
    pub fn decode(mut self, decode: bool) -> Self {
        self.decode = decode;
        self
    }

    /// Whether keys and values are percent-encoded while serializing.
    /// Default is `true`.
    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    /// Appends a formatter to the chain.
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatters = self.formatters.with(formatter);
        self
    }

    /// Appends a slot that may be empty. Empty slots are skipped.
    pub fn formatter_slot(mut self, slot: Option<Arc<dyn Formatter>>) -> Self {
        self.formatters = self.formatters.with_slot(slot);
        self
    }

    /// Replaces the whole formatter chain.
    pub fn formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    /// Parses a querystring from a `&str` using this `Config`.
    pub fn parse_str(&self, input: &str) -> Result<ParsedMapping> {
        crate::de::parse_with(input, self)
    }

    /// Parses a querystring from a `&[u8]` using this `Config`.
    ///
    /// Bytes that are not UTF-8 are not a querystring, and yield an empty
    /// mapping.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<ParsedMapping> {
        match std::str::from_utf8(input) {
            Ok(input) => self.parse_str(input),
            Err(err) => {
                tracing::debug!(error = %err, "input is not UTF-8, nothing to parse");
                Ok(ParsedMapping::default())
            }
        }
    }

    /// Serializes an object to a querystring using this `Config`.
    pub fn stringify<T: ?Sized + Serialize>(&self, input: &T) -> Result<String> {
        // initialize the buffer with 128 bytes
        // this is a guess based on what `serde_json` does
        let mut buffer = Vec::with_capacity(128);
        self.stringify_to_writer(input, &mut buffer)?;
        String::from_utf8(buffer).map_err(crate::Error::from)
    }

    /// Serializes an object into a writer using this `Config`.
    pub fn stringify_to_writer<T: ?Sized + Serialize, W: Write>(
        &self,
        input: &T,
        writer: &mut W,
    ) -> Result<()> {
        let mut serializer = QsSerializer::new(writer, self.encode);
        input.serialize(&mut serializer)
    }
}
