use crate::value::{ParsedMapping, ParsedValue};

use super::Formatter;

/// Expands single-level bracket keys into nested maps, in the style of
/// [JSON:API](https://jsonapi.org/format/#fetching-filtering) query
/// parameters.
///
/// A key of the form `name[subkey]` is removed and its value is stored at
/// `name -> subkey` as a sequence, split on `,`:
///
/// ```
/// use querify::{BracketFormatter, Config};
///
/// let parsed = Config::new()
///     .formatter(BracketFormatter)
///     .parse_str("fields[articles]=title,body&fields[people]=name")
///     .unwrap();
/// assert_eq!(
///     serde_json::to_value(&parsed).unwrap(),
///     serde_json::json!({
///         "fields": { "articles": ["title", "body"], "people": ["name"] }
///     })
/// );
/// ```
///
/// The key must end with `]`. `name` is everything before the first `[` and
/// may be empty; `subkey` is everything between that `[` and the final `]`,
/// taken verbatim even if it contains brackets itself (`a[[b]c]` has the
/// subkey `[b]c`). Any other key is left as it is.
#[derive(Clone, Copy, Debug, Default)]
pub struct BracketFormatter;

/// Splits `name[subkey]` into `(name, subkey)`.
fn split_key(key: &str) -> Option<(&str, &str)> {
    key.strip_suffix(']')?.split_once('[')
}

fn split_commas(value: &str) -> impl Iterator<Item = Option<String>> + '_ {
    value.split(',').map(|part| Some(part.to_owned()))
}

/// Converts a flat value into the nested sequence form.
fn into_sequence(value: ParsedValue) -> Vec<Option<String>> {
    match value {
        ParsedValue::Null => vec![None],
        ParsedValue::String(s) => split_commas(&s).collect(),
        ParsedValue::Sequence(seq) => {
            let mut values = Vec::with_capacity(seq.len());
            for item in seq {
                match item {
                    Some(s) => values.extend(split_commas(&s)),
                    None => values.push(None),
                }
            }
            values
        }
        // checked by the caller
        ParsedValue::Map(_) => Vec::new(),
    }
}

impl Formatter for BracketFormatter {
    fn format(&self, mut mapping: ParsedMapping, key: &str) -> ParsedMapping {
        let Some((name, subkey)) = split_key(key) else {
            return mapping;
        };
        let Some((index, _, value)) = mapping.get_full(key) else {
            return mapping;
        };
        if matches!(value, ParsedValue::Map(_)) {
            tracing::debug!(key, "value is already nested, leaving key untouched");
            return mapping;
        }
        if let Some(existing) = mapping.get(name) {
            if !matches!(existing, ParsedValue::Map(_)) {
                tracing::debug!(key, name, "name holds a flat value, leaving key untouched");
                return mapping;
            }
        }

        let Some((_, value)) = mapping.shift_remove_index(index) else {
            return mapping;
        };
        let value = ParsedValue::Sequence(into_sequence(value));

        match mapping.get_mut(name) {
            Some(ParsedValue::Map(nested)) => {
                nested.insert(subkey.to_owned(), value);
            }
            _ => {
                // the nested entry takes the place of the first flat key
                let nested = ParsedMapping::from_iter([(subkey.to_owned(), value)]);
                mapping.shift_insert(index, name.to_owned(), ParsedValue::Map(nested));
            }
        }
        mapping
    }
}

#[cfg(test)]
mod test {
    use super::{split_key, BracketFormatter};
    use crate::format::Formatter;
    use crate::value::{ParsedMapping, ParsedValue};

    use pretty_assertions::assert_eq;

    fn seq(values: &[&str]) -> ParsedValue {
        ParsedValue::Sequence(values.iter().map(|v| Some(v.to_string())).collect())
    }

    fn nested(entries: &[(&str, ParsedValue)]) -> ParsedValue {
        ParsedValue::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn format_all(mut mapping: ParsedMapping) -> ParsedMapping {
        let keys: Vec<String> = mapping.keys().cloned().collect();
        for key in keys {
            mapping = BracketFormatter.format(mapping, &key);
        }
        mapping
    }

    #[test]
    fn split_key_shapes() {
        assert_eq!(split_key("foo[bar]"), Some(("foo", "bar")));
        assert_eq!(split_key("[foo]"), Some(("", "foo")));
        assert_eq!(split_key("fo[o[bar]"), Some(("fo", "o[bar")));
        assert_eq!(split_key("foo[[ba]r]"), Some(("foo", "[ba]r")));
        assert_eq!(split_key("foo[[ba]]r]"), Some(("foo", "[ba]]r")));
        assert_eq!(split_key("foo[bar"), None);
        assert_eq!(split_key("foobar]"), None);
        assert_eq!(split_key("foo[bar]a"), None);
        assert_eq!(split_key("foo"), None);
    }

    #[test]
    fn nests_and_splits_values() {
        let input = ParsedMapping::from_iter([
            ("foo[bar]".to_string(), ParsedValue::from("qux,quux")),
            ("qux".to_string(), ParsedValue::from("quux")),
        ]);
        let expected = ParsedMapping::from_iter([
            ("foo".to_string(), nested(&[("bar", seq(&["qux", "quux"]))])),
            ("qux".to_string(), ParsedValue::from("quux")),
        ]);
        assert_eq!(format_all(input), expected);
    }

    #[test]
    fn merges_subkeys_at_first_position() {
        let input = ParsedMapping::from_iter([
            ("page".to_string(), ParsedValue::from("1")),
            ("filter[a]".to_string(), ParsedValue::from("x")),
            ("sort".to_string(), ParsedValue::from("-id")),
            ("filter[b]".to_string(), ParsedValue::from("y,z")),
        ]);
        let output = format_all(input);
        assert_eq!(output.keys().collect::<Vec<_>>(), ["page", "filter", "sort"]);
        assert_eq!(
            output["filter"],
            nested(&[("a", seq(&["x"])), ("b", seq(&["y", "z"]))])
        );
    }

    #[test]
    fn null_and_repeated_values() {
        let input = ParsedMapping::from_iter([
            ("a[null]".to_string(), ParsedValue::Null),
            (
                "a[many]".to_string(),
                ParsedValue::Sequence(vec![Some("1,2".into()), None, Some("3".into())]),
            ),
        ]);
        let output = format_all(input);
        assert_eq!(
            output["a"],
            nested(&[
                ("null", ParsedValue::Sequence(vec![None])),
                (
                    "many",
                    ParsedValue::Sequence(vec![
                        Some("1".into()),
                        Some("2".into()),
                        None,
                        Some("3".into())
                    ])
                ),
            ])
        );
    }

    #[test]
    fn leaves_conflicting_names_alone() {
        let input = ParsedMapping::from_iter([
            ("foo".to_string(), ParsedValue::from("flat")),
            ("foo[bar]".to_string(), ParsedValue::from("nested")),
        ]);
        assert_eq!(format_all(input.clone()), input);
    }

    #[test]
    fn missing_key_is_a_no_op() {
        let input = ParsedMapping::from_iter([("a".to_string(), ParsedValue::Null)]);
        assert_eq!(BracketFormatter.format(input.clone(), "gone[x]"), input);
    }
}
