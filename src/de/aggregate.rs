use indexmap::map::Entry;

use crate::value::ParsedMapping;

/// Inserts one decoded pair into the mapping.
///
/// The first occurrence of a key is stored as-is (`Null` or `String`).
/// Any further occurrence turns the entry into a sequence, so a key seen `n`
/// times always ends up with exactly `n` values in encounter order.
pub fn insert(map: &mut ParsedMapping, key: String, value: Option<String>) {
    match map.entry(key) {
        Entry::Vacant(vacant) => {
            vacant.insert(value.into());
        }
        Entry::Occupied(mut occupied) => {
            occupied.get_mut().push(value);
        }
    }
}

/// Collects decoded pairs into a fresh mapping.
pub fn aggregate<I>(pairs: I) -> ParsedMapping
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    let mut map = ParsedMapping::default();
    for (key, value) in pairs {
        insert(&mut map, key, value);
    }
    map
}
