use std::collections::{BTreeMap, HashMap};

use querify::{BracketFormatter, Config};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Query {
    name: String,
    nickname: Option<String>,
    tags: Vec<String>,
    page: u32,
}

#[test]
fn stringify_single_value() {
    let input = HashMap::from([("foo", "bar")]);
    assert_eq!(querify::stringify(&input).unwrap(), "foo=bar");
}

#[test]
fn stringify_multiple_values_in_order() {
    let input = querify::parse("foo=bar&baz=qux").unwrap();
    assert_eq!(querify::stringify(&input).unwrap(), "foo=bar&baz=qux");
}

#[test]
fn stringify_invalid_input() {
    assert_eq!(querify::stringify(&()).unwrap(), "");
    assert_eq!(querify::stringify("").unwrap(), "");
    assert_eq!(querify::stringify(&0).unwrap(), "");
    assert_eq!(querify::stringify(" ").unwrap(), "");
}

#[test]
fn stringify_empty_values() {
    let input = querify::parse("foo&baz=qux").unwrap();
    assert_eq!(querify::stringify(&input).unwrap(), "baz=qux");

    let mut input: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    input.insert("foo", vec![]);
    input.insert("baz", vec!["qux"]);
    assert_eq!(querify::stringify(&input).unwrap(), "baz=qux");
}

#[test]
fn stringify_struct() {
    let query = Query {
        name: "Acme Inc.".to_string(),
        nickname: None,
        tags: vec!["a".to_string(), "b c".to_string()],
        page: 2,
    };
    insta::assert_snapshot!(
        querify::stringify(&query).unwrap(),
        @"name=Acme%20Inc.&tags=a%2Cb%20c"
    );
}

#[test]
fn stringify_escapes_strictly() {
    let input = BTreeMap::from([("q", "it's (a*b)!"), ("ü", "~_-.")]);
    insta::assert_snapshot!(
        querify::stringify(&input).unwrap(),
        @"q=it%27s%20%28a%2Ab%29%21&%C3%BC=~_-."
    );
}

#[test]
fn stringify_without_encoding() {
    let input = BTreeMap::from([("q", "it's (a*b)!")]);
    let config = Config::new().encode(false);
    assert_eq!(config.stringify(&input).unwrap(), "q=it's (a*b)!");
}

#[test]
fn stringify_sequences_use_indices() {
    insta::assert_snapshot!(
        querify::stringify(&["x", "", "z"]).unwrap(),
        @"0=x&2=z"
    );
}

#[test]
fn stringify_drops_numbers_and_booleans() {
    let input = BTreeMap::from([("a", 0), ("b", 5)]);
    assert_eq!(querify::stringify(&input).unwrap(), "");

    let input = BTreeMap::from([("a", 1.5f64), ("b", 0.0)]);
    assert_eq!(querify::stringify(&input).unwrap(), "");

    let input = BTreeMap::from([("t", true), ("f", false)]);
    assert_eq!(querify::stringify(&input).unwrap(), "");

    // written once they are spelled as text
    let input = BTreeMap::from([("a", "0"), ("b", "5")]);
    assert_eq!(querify::stringify(&input).unwrap(), "a=0&b=5");
}

#[test]
fn stringify_coerces_sequence_elements() {
    let input = BTreeMap::from([("ids", vec![0, 5, 10])]);
    assert_eq!(querify::stringify(&input).unwrap(), "ids=0%2C5%2C10");

    let input = BTreeMap::from([("flags", [true, false])]);
    assert_eq!(querify::stringify(&input).unwrap(), "flags=true%2Cfalse");
}

#[test]
fn stringify_enums() {
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Sort {
        Asc,
    }

    #[derive(Serialize)]
    enum Filter {
        Name(String),
    }

    let input = BTreeMap::from([("sort", Sort::Asc)]);
    assert_eq!(querify::stringify(&input).unwrap(), "sort=asc");
    assert_eq!(
        querify::stringify(&Filter::Name("x".to_string())).unwrap(),
        "Name=x"
    );
}

#[test]
fn stringify_drops_nested_maps() {
    let input = BTreeMap::from([
        ("outer", BTreeMap::from([("inner", "x")])),
        ("plain", BTreeMap::new()),
    ]);
    assert_eq!(querify::stringify(&input).unwrap(), "");

    #[derive(Serialize)]
    struct Inner {
        x: String,
    }

    #[derive(Serialize)]
    struct Outer {
        inner: Inner,
        name: &'static str,
    }

    let input = Outer {
        inner: Inner { x: "y".to_string() },
        name: "n",
    };
    assert_eq!(querify::stringify(&input).unwrap(), "name=n");
}

#[test]
fn stringify_bracket_formatted_mapping() {
    let parsed = Config::new()
        .formatter(BracketFormatter)
        .parse_str("foo[bar]=x&baz=qux")
        .unwrap();
    assert_eq!(querify::stringify(&parsed).unwrap(), "baz=qux");
}

#[test]
fn stringify_to_writer() {
    let mut buffer = Vec::new();
    querify::to_writer(&HashMap::from([("foo", "bar")]), &mut buffer).unwrap();
    assert_eq!(buffer, b"foo=bar");
}
