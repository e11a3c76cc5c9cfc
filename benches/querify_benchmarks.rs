use std::collections::HashMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use querify::{BracketFormatter, Config};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct SimpleStruct {
    id: String,
    name: String,
    active: String,
}

const SIMPLE_QUERY: &str = "id=42&name=test_user&active=true";
const ENCODED_QUERY: &str = "name=J%C3%B6rg%20M%C3%BCller&city=K%C3%B6ln&note=a%26b%3Dc";
const REPEATED_QUERY: &str = "tag=a&tag=b&tag=c&tag=d&tag=e&tag=f&tag=g&tag=h";
const JSONAPI_QUERY: &str = "include=author,comments&fields[articles]=title,body,created\
    &fields[people]=name&filter[status]=published&page[number]=3&page[size]=25&sort=-created";

fn parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple", |b| {
        b.iter(|| querify::parse(black_box(SIMPLE_QUERY)).unwrap())
    });
}

fn parse_encoded(c: &mut Criterion) {
    c.bench_function("parse_encoded", |b| {
        b.iter(|| querify::parse(black_box(ENCODED_QUERY)).unwrap())
    });
}

fn parse_repeated(c: &mut Criterion) {
    c.bench_function("parse_repeated", |b| {
        b.iter(|| querify::parse(black_box(REPEATED_QUERY)).unwrap())
    });
}

fn parse_jsonapi(c: &mut Criterion) {
    let config = Config::new().formatter(BracketFormatter);
    c.bench_function("parse_jsonapi", |b| {
        b.iter(|| config.parse_str(black_box(JSONAPI_QUERY)).unwrap())
    });
}

fn stringify_simple_struct(c: &mut Criterion) {
    let data = SimpleStruct {
        id: "42".to_string(),
        name: "test_user".to_string(),
        active: "true".to_string(),
    };

    c.bench_function("stringify_simple_struct", |b| {
        b.iter(|| querify::stringify(black_box(&data)).unwrap())
    });
}

fn stringify_parsed_mapping(c: &mut Criterion) {
    let data = querify::parse(ENCODED_QUERY).unwrap();

    c.bench_function("stringify_parsed_mapping", |b| {
        b.iter(|| querify::stringify(black_box(&data)).unwrap())
    });
}

fn comparison_parse_serde_urlencoded(c: &mut Criterion) {
    c.bench_function("comparison_parse_serde_urlencoded", |b| {
        b.iter(|| {
            serde_urlencoded::from_str::<HashMap<String, String>>(black_box(ENCODED_QUERY))
                .unwrap()
        })
    });
}

fn comparison_stringify_serde_urlencoded(c: &mut Criterion) {
    let data = SimpleStruct {
        id: "42".to_string(),
        name: "test_user".to_string(),
        active: "true".to_string(),
    };

    c.bench_function("comparison_stringify_serde_urlencoded", |b| {
        b.iter(|| serde_urlencoded::to_string(black_box(&data)).unwrap())
    });
}

criterion_group!(parse, parse_simple, parse_encoded, parse_repeated, parse_jsonapi);

criterion_group!(stringify, stringify_simple_struct, stringify_parsed_mapping);

criterion_group!(
    comparison,
    comparison_parse_serde_urlencoded,
    comparison_stringify_serde_urlencoded
);

criterion_main!(parse, stringify, comparison);
