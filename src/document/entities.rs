use scraper::Html;

/// Decode HTML5 character references (`&amp;`, `&#39;`, `&eacute;`, ...).
///
/// Strings pulled out of the JSON-LD block are still entity-encoded. Running
/// them through the HTML tokenizer as a text-only fragment decodes the full
/// HTML5 entity table; `<` is escaped first so the input can never be read as
/// markup.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let escaped = input.replace('<', "&lt;");
    let fragment = Html::parse_fragment(&escaped);
    fragment.root_element().text().collect()
}
