use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// The set of characters escaped in a URI component.
///
/// Only the ASCII alphanumerics and U+002D (-), U+002E (.), U+005F (_) and
/// U+007E (~) are left alone. Unlike plain URI component encoding, the sub-delims
/// `!`, `'`, `(`, `)` and `*` are escaped too, so the output is safe to embed
/// anywhere in a URL.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a key or value, using uppercase hex digits.
///
/// Borrows the input when nothing needs encoding.
pub fn encode(input: &str) -> Cow<'_, str> {
    percent_encoding::utf8_percent_encode(input, URI_COMPONENT_SET).into()
}
