//! Field resolution: declares, per view-model field, which store columns feed
//! it and in which order.
//!
//! The store schema has changed over time (`Category` became `Categories`,
//! `startYear` sits next to `startDate`, ...). Each `Field` lists its candidate
//! columns once; the normalizers never read `fields` directly.

use serde_json::Value;

use crate::store::Fields;

/// Ordered list of source columns for one view-model field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub candidates: &'static [&'static str],
}

impl Field {
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    /// First candidate whose value is truthy (non-null, non-empty, non-zero).
    pub fn resolve<'a>(&self, fields: &'a Fields) -> Option<&'a Value> {
        self.candidates
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|value| is_truthy(value))
    }

    /// First candidate that is present at all, even when empty.
    pub fn first_present<'a>(&self, fields: &'a Fields) -> Option<&'a Value> {
        self.candidates
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn text(&self, fields: &Fields) -> Option<String> {
        self.resolve(fields).and_then(value_to_text)
    }

    pub fn text_or(&self, fields: &Fields, default: &str) -> String {
        self.text(fields).unwrap_or_else(|| default.to_string())
    }

    pub fn int(&self, fields: &Fields) -> Option<i64> {
        self.resolve(fields).and_then(coerce_int)
    }

    /// Tag list; a scalar value counts as a one-element list.
    pub fn list(&self, fields: &Fields) -> Vec<String> {
        self.resolve(fields).map(value_to_list).unwrap_or_default()
    }

    /// `url` of the first attachment of the first candidate carrying one.
    pub fn attachment_url(&self, fields: &Fields) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(first_attachment_url)
    }
}

/// Truthiness as the store's consumers have always read it: `null`, `false`,
/// `0`, `""`, `[]` and `{}` are all "not set".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Strings as-is, numbers in their shortest integral form when they have one.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            let integral = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
            Some(integral.map_or_else(|| n.to_string(), |i| i.to_string()))
        }
        _ => None,
    }
}

/// Integers pass through, finite floats truncate toward zero, strings must
/// hold an integer.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Keeps the truthy, text-representable entries of a list value.
pub fn value_to_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| is_truthy(item))
            .filter_map(value_to_text)
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn first_attachment_url(value: &Value) -> Option<String> {
    value
        .as_array()?
        .first()?
        .get("url")?
        .as_str()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) fn fields_from(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const START: Field = Field::new(&["startYear", "startDate"]);

    #[test]
    fn test_resolve_skips_empty_candidates() {
        let fields = fields_from(json!({"startYear": "", "startDate": "2019-04-01"}));
        assert_eq!(START.text(&fields).as_deref(), Some("2019-04-01"));
    }

    #[test]
    fn test_resolve_prefers_first_candidate() {
        let fields = fields_from(json!({"startYear": 2018, "startDate": "2019-04-01"}));
        assert_eq!(START.text(&fields).as_deref(), Some("2018"));
    }

    #[test]
    fn test_first_present_keeps_empty_list() {
        let cats = Field::new(&["Categories", "Category"]);
        let fields = fields_from(json!({"Categories": [], "Category": "Backend"}));
        assert_eq!(cats.first_present(&fields), Some(&json!([])));
    }

    #[test]
    fn test_first_present_skips_null() {
        let cats = Field::new(&["Categories", "Category"]);
        let fields = fields_from(json!({"Categories": null, "Category": "Backend"}));
        assert_eq!(cats.first_present(&fields), Some(&json!("Backend")));
    }

    #[test]
    fn test_coerce_int_variants() {
        assert_eq!(coerce_int(&json!(4)), Some(4));
        assert_eq!(coerce_int(&json!(4.0)), Some(4));
        assert_eq!(coerce_int(&json!(" 3 ")), Some(3));
        assert_eq!(coerce_int(&json!(4.7)), Some(4));
        assert_eq!(coerce_int(&json!(-2.5)), Some(-2));
        assert_eq!(coerce_int(&json!("four")), None);
        assert_eq!(coerce_int(&json!(true)), None);
    }

    #[test]
    fn test_value_to_text_integral_float() {
        assert_eq!(value_to_text(&json!(2015.0)).as_deref(), Some("2015"));
        assert_eq!(value_to_text(&json!(2015.5)).as_deref(), Some("2015.5"));
    }

    #[test]
    fn test_list_drops_falsy_entries() {
        let techs = Field::new(&["Technologies"]);
        let fields = fields_from(json!({"Technologies": ["Rust", "", null, "SQL"]}));
        assert_eq!(techs.list(&fields), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_attachment_url_first_attachment() {
        let picture = Field::new(&["picture"]);
        let fields = fields_from(json!({
            "picture": [{"url": "https://cdn/a.png"}, {"url": "https://cdn/b.png"}]
        }));
        assert_eq!(
            picture.attachment_url(&fields).as_deref(),
            Some("https://cdn/a.png")
        );
    }

    #[test]
    fn test_attachment_url_missing_or_empty() {
        let picture = Field::new(&["picture"]);
        assert!(picture.attachment_url(&fields_from(json!({}))).is_none());
        assert!(picture
            .attachment_url(&fields_from(json!({"picture": []})))
            .is_none());
    }
}
