use std::fmt;

use serde_json::{Map, Value};

use super::{CATEGORY_REQUIRED_KEYS, WALLPAPER_REQUIRED_KEYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Category,
    Wallpaper,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Wallpaper => "wallpaper",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaRule {
    NotAnObject,
    MissingKeys(Vec<&'static str>),
    InvalidField(&'static str),
}

/// First rule broken by a record; validation stops there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub kind: RecordKind,
    pub index: usize,
    pub rule: SchemaRule,
    /// Compact JSON of the offending record.
    pub record: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            SchemaRule::NotAnObject => {
                write!(f, "Invalid {} structure: Not a dictionary.", self.kind)
            }
            SchemaRule::MissingKeys(keys) => {
                let plural = match self.kind {
                    RecordKind::Category => "categories",
                    RecordKind::Wallpaper => "wallpaper",
                };
                write!(
                    f,
                    "Missing required keys in {plural}: {} (missing: {})",
                    self.record,
                    keys.join(", ")
                )
            }
            SchemaRule::InvalidField(field) => write!(
                f,
                "Invalid '{field}' field in {}: {}",
                self.kind, self.record
            ),
        }
    }
}

impl std::error::Error for SchemaViolation {}

pub fn validate_categories(payload: &Value) -> Result<(), SchemaViolation> {
    validate_records(payload, RecordKind::Category, check_category)
}

pub fn validate_wallpapers(payload: &Value) -> Result<(), SchemaViolation> {
    validate_records(payload, RecordKind::Wallpaper, check_wallpaper)
}

fn validate_records(
    payload: &Value,
    kind: RecordKind,
    check: fn(&Map<String, Value>) -> Result<(), SchemaRule>,
) -> Result<(), SchemaViolation> {
    // A non-list top level has no records to check and passes. Iterating an
    // object's keys or a string's characters and rejecting them as non-objects
    // would instead mirror such files.
    let Some(entries) = payload.as_array() else {
        tracing::warn!("{kind} payload is not a list; no records checked");
        return Ok(());
    };

    for (index, entry) in entries.iter().enumerate() {
        let outcome = match entry.as_object() {
            Some(object) => check(object),
            None => Err(SchemaRule::NotAnObject),
        };
        if let Err(rule) = outcome {
            let violation = SchemaViolation {
                kind,
                index,
                rule,
                record: entry.to_string(),
            };
            tracing::info!("{violation}");
            return Err(violation);
        }
    }
    Ok(())
}

fn missing_keys(object: &Map<String, Value>, required: &[&'static str]) -> Result<(), SchemaRule> {
    let missing: Vec<&'static str> = required
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaRule::MissingKeys(missing))
    }
}

fn check_category(object: &Map<String, Value>) -> Result<(), SchemaRule> {
    missing_keys(object, CATEGORY_REQUIRED_KEYS)
}

fn check_wallpaper(object: &Map<String, Value>) -> Result<(), SchemaRule> {
    missing_keys(object, WALLPAPER_REQUIRED_KEYS)?;
    if !object["premium"].is_boolean() {
        return Err(SchemaRule::InvalidField("premium"));
    }
    if !object["url"].is_string() {
        return Err(SchemaRule::InvalidField("url"));
    }
    if !object["categories"].is_string() {
        return Err(SchemaRule::InvalidField("categories"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn wallpaper(name: &str) -> Value {
        json!({"name": name, "url": "https://cdn.example/a.jpg", "categories": "nature", "premium": false})
    }

    #[test]
    fn categories_pass_with_extra_keys() {
        let payload = json!([
            {"name": "nature", "name_kor": "자연", "preview1": "a", "preview2": "b", "preview3": "c", "order": 3}
        ]);
        assert_eq!(validate_categories(&payload), Ok(()));
    }

    #[test]
    fn categories_fail_on_missing_key() {
        let payload = json!([
            {"name": "nature", "name_kor": "자연", "preview1": "a", "preview2": "b", "preview3": "c"},
            {"name": "city", "name_kor": "도시", "preview1": "a", "preview2": "b"}
        ]);
        let violation = validate_categories(&payload).unwrap_err();
        assert_eq!(violation.index, 1);
        assert_eq!(violation.rule, SchemaRule::MissingKeys(vec!["preview3"]));
        assert!(violation.to_string().starts_with("Missing required keys in categories:"));
    }

    #[test]
    fn categories_fail_on_non_object_element() {
        let violation = validate_categories(&json!(["nature"])).unwrap_err();
        assert_eq!(violation.rule, SchemaRule::NotAnObject);
        assert_eq!(
            violation.to_string(),
            "Invalid category structure: Not a dictionary."
        );
    }

    #[test]
    fn non_list_payload_has_no_records_to_check() {
        assert_eq!(validate_categories(&json!({"name": "x"})), Ok(()));
        assert_eq!(validate_wallpapers(&json!("text")), Ok(()));
    }

    #[test]
    fn wallpapers_accept_empty_values() {
        let payload = json!([{"name": "", "url": "", "categories": "", "premium": true}]);
        assert_eq!(validate_wallpapers(&payload), Ok(()));
    }

    #[test]
    fn wallpapers_check_rules_in_order() {
        let cases = [
            (json!({"name": "a", "url": 1, "categories": 2}), SchemaRule::MissingKeys(vec!["premium"])),
            (json!({"name": "a", "url": 1, "categories": 2, "premium": "yes"}), SchemaRule::InvalidField("premium")),
            (json!({"name": "a", "url": 1, "categories": 2, "premium": true}), SchemaRule::InvalidField("url")),
            (json!({"name": "a", "url": "u", "categories": ["x"], "premium": true}), SchemaRule::InvalidField("categories")),
        ];
        for (record, expected) in cases {
            let violation = validate_wallpapers(&json!([record])).unwrap_err();
            assert_eq!(violation.rule, expected);
        }
    }

    #[test]
    fn first_failing_wallpaper_stops_the_scan() {
        let payload = json!([wallpaper("one"), 42, {"name": "three"}]);
        let violation = validate_wallpapers(&payload).unwrap_err();
        assert_eq!(violation.index, 1);
        assert_eq!(violation.kind, RecordKind::Wallpaper);
        assert_eq!(violation.record, "42");
    }

    #[test]
    fn premium_must_be_boolean_not_number() {
        let payload = json!([{"name": "a", "url": "u", "categories": "c", "premium": 1}]);
        let violation = validate_wallpapers(&payload).unwrap_err();
        assert!(violation.to_string().starts_with("Invalid 'premium' field in wallpaper:"));
    }
}
