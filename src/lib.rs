//! Querystring parsing with pluggable formatters
//!
//! `querify` turns querystrings into ordered key/value mappings and back.
//!
//! Parsing is deliberately flat: `a=1&a=2&b` becomes
//! `{ a: ["1", "2"], b: null }`, keys keep the order in which they first
//! appeared, and a key seen once is never wrapped in a sequence. Any further
//! structure is added by [`Formatter`]s, small transforms that run over the
//! parsed result in the order they were configured. [`BracketFormatter`]
//! expands [JSON:API](https://jsonapi.org/format/#query-parameters) style
//! `name[subkey]=a,b` keys into nested maps.
//!
//! Serialization goes the other way for any [`serde::Serialize`] value,
//! keeping only non-empty string and sequence values. Numbers, booleans
//! and nested maps are dropped.
//!
//! ## Usage
//!
//! ```
//! use querify::{BracketFormatter, Config, ParsedValue};
//!
//! let config = Config::new().formatter(BracketFormatter);
//! let parsed = config
//!     .parse_str("?include=author&filter[tag]=rust,serde&sort=-created")
//!     .unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&parsed).unwrap(),
//!     serde_json::json!({
//!         "include": "author",
//!         "filter": { "tag": ["rust", "serde"] },
//!         "sort": "-created",
//!     })
//! );
//!
//! let flat = querify::parse("foo=bar&empty=&flag").unwrap();
//! assert_eq!(flat["empty"], ParsedValue::String(String::new()));
//! assert_eq!(querify::stringify(&flat).unwrap(), "foo=bar");
//! ```

mod config;
mod de;
mod error;
mod format;
mod ser;
mod value;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use de::{Pairs, QueryPair, from_bytes, parse, tokenize};
pub use error::{Error, Result};
#[doc(inline)]
pub use format::{BracketFormatter, DefaultFormatter, Formatter, Formatters};
#[doc(inline)]
pub use ser::{QsSerializer, stringify, to_writer};
pub use value::{ParsedMapping, ParsedValue};
