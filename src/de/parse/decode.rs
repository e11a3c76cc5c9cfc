use std::borrow::Cow;

use crate::error::{Error, Result};

#[inline(always)]
fn is_hex_digit(c: Option<&u8>) -> bool {
    c.is_some_and(u8::is_ascii_hexdigit)
}

/// Decodes a single key or value as a URI component:
/// - Decodes percent-encoded characters
/// - Leaves `+` untouched (it is *not* a space here)
/// - Converts the result to a UTF-8 string
///
/// A `%` that is not followed by two hex digits is an error, as is any
/// escape sequence that decodes to invalid UTF-8.
///
/// Avoids allocations when no `%` is present.
pub fn decode(input: &str) -> Result<Cow<'_, str>> {
    let bytes = input.as_bytes();
    let Some(first) = bytes.iter().position(|&b| b == b'%') else {
        return Ok(Cow::Borrowed(input));
    };

    // validate every escape up front so that a malformed sequence is reported
    // instead of being passed through verbatim
    let mut idx = first;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            if !(is_hex_digit(bytes.get(idx + 1)) && is_hex_digit(bytes.get(idx + 2))) {
                return Err(Error::malformed_escape(bytes, idx));
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }

    let decoded: Vec<u8> = percent_encoding::percent_decode(bytes).collect();
    Ok(Cow::Owned(String::from_utf8(decoded)?))
}
