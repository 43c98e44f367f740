//! Canonical `wallpapers.json` layout: one entry per line, entries grouped by
//! category in order of first appearance, three blank lines between groups.

use std::fmt::Write as _;

use serde_json::{Map, Value};
use thiserror::Error;

use super::is_truthy;

const GROUP_SEPARATOR_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("entry[{0}] is not an object")]
    NonObjectEntry(usize),
}

pub fn format_entries(entries: &[Value]) -> Result<String, FormatError> {
    let mut groups: Vec<(&Value, Vec<&Map<String, Value>>)> = Vec::new();
    let empty = Value::String(String::new());
    for (index, entry) in entries.iter().enumerate() {
        let object = entry
            .as_object()
            .ok_or(FormatError::NonObjectEntry(index))?;
        let category = object.get("categories").unwrap_or(&empty);
        match groups.iter_mut().find(|(key, _)| *key == category) {
            Some((_, members)) => members.push(object),
            None => groups.push((category, vec![object])),
        }
    }

    let mut lines = vec!["[".to_string()];
    for (group_index, (_, members)) in groups.iter().enumerate() {
        if group_index > 0 {
            lines.extend(std::iter::repeat(String::new()).take(GROUP_SEPARATOR_LINES));
        }
        for object in members {
            lines.push(entry_line(object));
        }
    }
    if let Some(last) = lines.last_mut() {
        if last.ends_with(',') {
            last.pop();
        }
    }
    lines.push("]".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn entry_line(object: &Map<String, Value>) -> String {
    let field = |name: &str| match object.get(name) {
        Some(value) => to_ascii_json(value),
        None => "\"\"".to_string(),
    };
    let premium = object.get("premium").map_or(false, is_truthy);
    format!(
        "  {{ \"name\": {}, \"url\": {}, \"categories\": {}, \"premium\": {} }},",
        field("name"),
        field("url"),
        field("categories"),
        premium
    )
}

/// JSON text with `, ` / `: ` separators and every character outside
/// printable ASCII escaped as `\uXXXX`.
pub fn to_ascii_json(value: &Value) -> String {
    let mut out = String::new();
    write_ascii_json(&mut out, value);
    out
}

fn write_ascii_json(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => {
            let _ = write!(out, "{number}");
        }
        Value::String(text) => write_ascii_string(out, text),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_ascii_json(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (index, (key, item)) in map.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_ascii_string(out, key);
                out.push_str(": ");
                write_ascii_json(out, item);
            }
            out.push('}');
        }
    }
}

fn write_ascii_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn single_group_layout() {
        let entries = vec![
            json!({"name": "a", "url": "https://x/a.jpg", "categories": "nature", "premium": true}),
            json!({"name": "b", "url": "https://x/b.jpg", "categories": "nature", "premium": false}),
        ];
        let expected = concat!(
            "[\n",
            "  { \"name\": \"a\", \"url\": \"https://x/a.jpg\", \"categories\": \"nature\", \"premium\": true },\n",
            "  { \"name\": \"b\", \"url\": \"https://x/b.jpg\", \"categories\": \"nature\", \"premium\": false }\n",
            "]\n",
        );
        assert_eq!(format_entries(&entries).expect("format"), expected);
    }

    #[test]
    fn groups_are_separated_and_ordered_by_first_appearance() {
        let entries = vec![
            json!({"name": "c1", "url": "u", "categories": "city", "premium": true}),
            json!({"name": "n1", "url": "u", "categories": "nature", "premium": true}),
            json!({"name": "c2", "url": "u", "categories": "city", "premium": false}),
        ];
        let expected = concat!(
            "[\n",
            "  { \"name\": \"c1\", \"url\": \"u\", \"categories\": \"city\", \"premium\": true },\n",
            "  { \"name\": \"c2\", \"url\": \"u\", \"categories\": \"city\", \"premium\": false },\n",
            "\n\n\n",
            "  { \"name\": \"n1\", \"url\": \"u\", \"categories\": \"nature\", \"premium\": true }\n",
            "]\n",
        );
        assert_eq!(format_entries(&entries).expect("format"), expected);
    }

    #[test]
    fn empty_list_renders_brackets() {
        assert_eq!(format_entries(&[]).expect("format"), "[\n]\n");
    }

    #[test]
    fn missing_fields_and_truthy_premium() {
        let entries = vec![json!({"premium": 1})];
        assert_eq!(
            format_entries(&entries).expect("format"),
            "[\n  { \"name\": \"\", \"url\": \"\", \"categories\": \"\", \"premium\": true }\n]\n"
        );
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let entries = vec![json!({"name": "a"}), json!(3)];
        assert_eq!(format_entries(&entries), Err(FormatError::NonObjectEntry(1)));
    }

    #[test]
    fn strings_escape_non_ascii() {
        assert_eq!(to_ascii_json(&json!("자연")), "\"\\uc790\\uc5f0\"");
        assert_eq!(to_ascii_json(&json!("🎨")), "\"\\ud83c\\udfa8\"");
        assert_eq!(to_ascii_json(&json!("a\"b\\c\n\u{1}\u{7f}")), "\"a\\\"b\\\\c\\n\\u0001\\u007f\"");
    }

    #[test]
    fn nested_objects_keep_key_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": {"b": 2, "a": 3}}"#)
            .expect("parse");
        assert_eq!(to_ascii_json(&value), "{\"zeta\": 1, \"alpha\": {\"b\": 2, \"a\": 3}}");
    }

    #[test]
    fn nested_values_use_spaced_separators() {
        assert_eq!(to_ascii_json(&json!(["a", 1, null])), "[\"a\", 1, null]");
        assert_eq!(to_ascii_json(&json!({"k": false})), "{\"k\": false}");
    }
}
