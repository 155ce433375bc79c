use serde::Serialize;
use tracing::info;

use lock_core::rows::RowTable;
use lock_core::settings::settings;
use lock_core::Transformer;

use super::die;
use crate::remote::GeminiConverter;

/// JSON shape of a transformation result.
#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub result: String,
}

/// The row to use: the explicit one, else the configured default.
pub fn resolve_row(row: Option<&str>) -> String {
    row.map(str::to_string)
        .unwrap_or_else(|| settings().transform.default_row.clone())
}

/// Kanji converter from settings, only when conversion was asked for.
pub fn kanji_converter(enabled: bool) -> Option<GeminiConverter> {
    if !enabled {
        return None;
    }
    Some(die!(
        GeminiConverter::from_settings(&settings().kanji),
        "Error configuring kanji conversion: {}"
    ))
}

fn transformer(converter: Option<&GeminiConverter>) -> Transformer<'_> {
    match converter {
        Some(c) => Transformer::new().with_kanji(c),
        None => Transformer::new(),
    }
}

/// Run the pipeline, exiting on collaborator failure.
pub fn run_transform(text: &str, row: &str, kanji: bool) -> String {
    let converter = kanji_converter(kanji);
    die!(
        transformer(converter.as_ref()).transform(text, row, kanji),
        "Error: {}"
    )
}

pub fn render(result: String, json: bool) -> String {
    if json {
        // Serializing a single String field cannot fail.
        serde_json::to_string(&TransformResponse { result }).unwrap_or_default()
    } else {
        result
    }
}

pub fn transform_cmd(text: &str, row: Option<&str>, kanji: bool, json: bool) {
    let row = resolve_row(row);
    let result = run_transform(text, &row, kanji);
    info!(row = row.as_str(), chars = result.chars().count(), "transform");
    println!("{}", render(result, json));
}

pub fn explain_cmd(text: &str, row: Option<&str>, kanji: bool) {
    let row = resolve_row(row);
    let converter = kanji_converter(kanji);
    let trace = die!(
        transformer(converter.as_ref()).explain(text, &row, kanji),
        "Error: {}"
    );
    print!("{}", trace.to_table());
}

pub fn rows_cmd() {
    let default_row = &settings().transform.default_row;
    for (name, row) in RowTable::global().iter() {
        let marker = if name == default_row.as_str() { "*" } else { " " };
        let syllables: Vec<&str> = row.syllables().collect();
        println!("{marker} {name:<3} {}", syllables.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        assert_eq!(render("ぽんぴぴぱ".to_string(), false), "ぽんぴぴぱ");
    }

    #[test]
    fn test_render_json() {
        assert_eq!(
            render("ぽんぴぴぱ".to_string(), true),
            r#"{"result":"ぽんぴぴぱ"}"#
        );
        assert_eq!(render(String::new(), true), r#"{"result":""}"#);
    }

    #[test]
    fn test_resolve_row() {
        assert_eq!(resolve_row(Some("ma")), "ma");
        assert_eq!(resolve_row(None), settings().transform.default_row);
    }

    #[test]
    fn test_run_transform_without_kanji() {
        assert_eq!(run_transform("こんにちは", "pa", false), "ぽんぴぴぱ");
        assert_eq!(run_transform("こんにちは", "xx", false), "");
    }

    #[test]
    fn test_no_converter_unless_requested() {
        assert!(kanji_converter(false).is_none());
    }
}
