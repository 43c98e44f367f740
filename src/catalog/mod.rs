//! Wallpaper catalog files: schema checks, error mirroring and premium rebalancing.
//! A catalog is a folder tree where any folder may hold `categories.json` and/or `wallpapers.json`.

pub mod check;
pub mod format;
pub mod mirror;
pub mod rebalance;
pub mod schema;
pub mod truefalse;

use serde_json::Value;

pub const CATEGORIES_FILE: &str = "categories.json";
pub const WALLPAPERS_FILE: &str = "wallpapers.json";
pub const ERROR_FOLDER_NAME: &str = "@@error";

pub const CATEGORY_REQUIRED_KEYS: &[&str] = &["name", "name_kor", "preview1", "preview2", "preview3"];
pub const WALLPAPER_REQUIRED_KEYS: &[&str] = &["name", "url", "categories", "premium"];

/// Loose truthiness used for grouping keys and premium rendering:
/// null, false, 0, "", [] and {} are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
