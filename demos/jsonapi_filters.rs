use querify::{BracketFormatter, Config, ParsedMapping, ParsedValue};

/// Drops the `page` parameters, so that a link to the first page can be built.
fn without_paging(mut map: ParsedMapping, key: &str) -> ParsedMapping {
    if key.starts_with("page[") {
        map.shift_remove(key);
    }
    map
}

fn main() {
    let url = "https://api.example.com/articles\
        ?include=author&fields[articles]=title,body&filter[tag]=rust\
        &page[number]=3&sort=-created";
    let query = url.split_once('?').map(|(_, query)| query);

    let config = Config::new().formatter(BracketFormatter);
    let parsed = config.parse_str(query.unwrap_or_default()).unwrap();
    println!("{}", serde_json::to_string_pretty(&parsed).unwrap());

    if let Some(ParsedValue::Map(fields)) = parsed.get("fields") {
        for (resource, columns) in fields {
            println!("{resource}: {columns:?}");
        }
    }

    // nested entries are not written back, so the keys stay flat here
    let first_page = Config::new().formatter(without_paging);
    let first_page_query = first_page.parse_str(query.unwrap_or_default()).unwrap();
    println!("?{}", querify::stringify(&first_page_query).unwrap());
}
