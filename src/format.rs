//! Post-processing of parsed querystrings.
//!
//! After a querystring has been tokenized, decoded and aggregated, the result
//! is handed to a chain of [`Formatter`]s. The chain runs once per top-level
//! key of the aggregated mapping: for every key, each formatter is applied in
//! order, and its output is the input of the next one.
//!
//! ```
//! use querify::{BracketFormatter, Config, ParsedValue};
//!
//! let config = Config::new().formatter(BracketFormatter);
//! let parsed = config.parse_str("filter[tags]=rust,web&page=2").unwrap();
//!
//! let filter = parsed["filter"].as_map().unwrap();
//! assert_eq!(
//!     filter["tags"],
//!     ParsedValue::Sequence(vec![Some("rust".into()), Some("web".into())])
//! );
//! assert_eq!(parsed["page"].as_str(), Some("2"));
//! ```
//!
//! Any `Fn(ParsedMapping, &str) -> ParsedMapping` closure is a formatter:
//!
//! ```
//! use querify::{Config, ParsedMapping};
//!
//! let lowercase = |mut map: ParsedMapping, key: &str| {
//!     if let Some(value) = map.shift_remove(key) {
//!         map.insert(key.to_lowercase(), value);
//!     }
//!     map
//! };
//! let parsed = Config::new().formatter(lowercase).parse_str("Page=2").unwrap();
//! assert_eq!(parsed["page"].as_str(), Some("2"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::value::ParsedMapping;

mod bracket;

pub use bracket::BracketFormatter;

/// A transform applied to the parsed mapping for one top-level key.
///
/// Implementations receive the whole mapping and return a full replacement.
/// The key may already have been removed by an earlier formatter, in which
/// case the mapping should be returned unchanged.
pub trait Formatter: Send + Sync {
    fn format(&self, mapping: ParsedMapping, key: &str) -> ParsedMapping;

    /// Name used when logging and debugging.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> Formatter for F
where
    F: Fn(ParsedMapping, &str) -> ParsedMapping + Send + Sync,
{
    fn format(&self, mapping: ParsedMapping, key: &str) -> ParsedMapping {
        self(mapping, key)
    }
}

/// Leaves the mapping untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format(&self, mapping: ParsedMapping, _key: &str) -> ParsedMapping {
        mapping
    }
}

/// An ordered list of formatter slots.
///
/// A slot may be empty. Empty slots are skipped when the chain runs; they
/// never produce an error.
#[derive(Clone, Default)]
pub struct Formatters {
    slots: Vec<Option<Arc<dyn Formatter>>>,
}

impl Formatters {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Appends a formatter to the end of the chain.
    pub fn with<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.slots.push(Some(Arc::new(formatter)));
        self
    }

    /// Appends a slot that may or may not hold a formatter.
    pub fn with_slot(mut self, slot: Option<Arc<dyn Formatter>>) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Runs the chain over `mapping`.
    ///
    /// Keys are taken from `mapping` before any formatter runs, in order.
    /// For each key the slots are folded left to right.
    pub fn apply(&self, mapping: ParsedMapping) -> ParsedMapping {
        if self.slots.is_empty() {
            return mapping;
        }
        let keys: Vec<String> = mapping.keys().cloned().collect();
        keys.iter().fold(mapping, |acc, key| {
            self.slots.iter().enumerate().fold(acc, |acc, (idx, slot)| match slot {
                Some(formatter) => {
                    tracing::trace!(key = %key, formatter = formatter.name(), "applying formatter");
                    formatter.format(acc, key)
                }
                None => {
                    tracing::trace!(key = %key, slot = idx, "skipping empty formatter slot");
                    acc
                }
            })
        })
    }
}

impl FromIterator<Option<Arc<dyn Formatter>>> for Formatters {
    fn from_iter<T: IntoIterator<Item = Option<Arc<dyn Formatter>>>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|slot| slot.as_ref().map(|formatter| formatter.name())),
            )
            .finish()
    }
}
