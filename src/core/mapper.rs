use crate::domain::model::{CountryRecord, RawDocument};
use crate::utils::error::MappingError;
use serde_json::{Map, Value};

/// Map the whole fetched document. Only the top-level shape can fail;
/// individual records never are rejected for missing data.
pub fn map_document(document: &RawDocument) -> Result<Vec<CountryRecord>, MappingError> {
    let items = document.as_array().ok_or(MappingError::NotAList {
        found: json_type(document),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object()
                .map(map_record)
                .ok_or(MappingError::NotAnObject {
                    index,
                    found: json_type(item),
                })
        })
        .collect()
}

pub fn map_record(node: &Map<String, Value>) -> CountryRecord {
    CountryRecord {
        code: text_at(node, &["cca2"]),
        name: text_at(node, &["name", "common"]),
        native_name: native_name(node),
        region: text_at(node, &["region"]),
        subregion: text_at(node, &["subregion"]),
        capital: capital(node),
        population: population(node),
        area: area(node),
        phone_prefixes: phone_prefixes(node),
        currencies: object_keys(node, "currencies"),
        languages: object_keys(node, "languages"),
    }
}

/// Walk `path` through nested objects and return the string at its end.
fn text_at(node: &Map<String, Value>, path: &[&str]) -> Option<String> {
    let (first, rest) = path.split_first()?;
    let mut current = node.get(*first)?;
    for key in rest {
        current = current.get(*key)?;
    }
    current.as_str().map(str::to_string)
}

/// `name.nativeName.<first language>.common`. The "first" language is the
/// first key of `languages` in document order; the upstream object carries
/// no ordering guarantee, so this is only as stable as the payload.
fn native_name(node: &Map<String, Value>) -> Option<String> {
    let language = node.get("languages")?.as_object()?.keys().next()?;
    text_at(node, &["name", "nativeName", language.as_str(), "common"])
}

fn capital(node: &Map<String, Value>) -> Option<String> {
    node.get("capital")?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_string)
}

fn population(node: &Map<String, Value>) -> i64 {
    match node.get("population") {
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .or_else(|| value.as_f64().filter(|n| n.is_finite()).map(|n| n as i64))
            .filter(|n| *n >= 0)
            .unwrap_or(0),
        None => 0,
    }
}

fn area(node: &Map<String, Value>) -> f64 {
    node.get("area")
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0)
}

/// `idd.root` joined with each non-empty suffix. The bare root is emitted
/// only when every suffix is empty, e.g. `{"root": "+1", "suffixes": [""]}`.
/// Nothing is emitted without a non-empty root. Duplicates are kept.
fn phone_prefixes(node: &Map<String, Value>) -> Vec<String> {
    let Some(idd) = node.get("idd").and_then(Value::as_object) else {
        return Vec::new();
    };
    let root = match idd.get("root").and_then(Value::as_str) {
        Some(root) if !root.is_empty() => root,
        _ => return Vec::new(),
    };
    let Some(suffixes) = idd.get("suffixes").and_then(Value::as_array) else {
        return Vec::new();
    };

    let suffixes: Vec<&str> = suffixes.iter().filter_map(Value::as_str).collect();
    if !suffixes.is_empty() && suffixes.iter().all(|suffix| suffix.is_empty()) {
        return vec![root.to_string()];
    }

    suffixes
        .into_iter()
        .filter(|suffix| !suffix.is_empty())
        .map(|suffix| format!("{root}{suffix}"))
        .collect()
}

fn object_keys(node: &Map<String, Value>, field: &str) -> Vec<String> {
    node.get(field)
        .and_then(Value::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map_one(value: Value) -> CountryRecord {
        map_record(value.as_object().unwrap())
    }

    #[test]
    fn test_map_us_example() {
        let document = json!([{
            "cca2": "US",
            "name": {"common": "United States"},
            "population": 331000000,
            "area": 9833517.0,
            "idd": {"root": "+1", "suffixes": [""]},
            "currencies": {"USD": {}},
            "languages": {"eng": "English"}
        }]);

        let records = map_document(&document).unwrap();

        assert_eq!(records.len(), 1);
        let us = &records[0];
        assert_eq!(us.code.as_deref(), Some("US"));
        assert_eq!(us.name.as_deref(), Some("United States"));
        assert_eq!(us.population, 331_000_000);
        assert_eq!(us.area, 9833517.0);
        assert_eq!(us.phone_prefixes, vec!["+1"]);
        assert_eq!(us.currencies, vec!["USD"]);
        assert_eq!(us.languages, vec!["eng"]);
        assert_eq!(us.native_name, None);
        assert_eq!(us.capital, None);
    }

    #[test]
    fn test_phone_prefixes_join_root_and_suffixes() {
        let record = map_one(json!({
            "cca2": "US",
            "idd": {"root": "+1", "suffixes": ["201", "202"]}
        }));
        assert_eq!(record.phone_prefixes, vec!["+1201", "+1202"]);

        let record = map_one(json!({"cca2": "AQ"}));
        assert!(record.phone_prefixes.is_empty());

        let record = map_one(json!({"cca2": "XX", "idd": {"root": "", "suffixes": ["7"]}}));
        assert!(record.phone_prefixes.is_empty());

        let record = map_one(json!({"cca2": "XX", "idd": {"suffixes": ["7"]}}));
        assert!(record.phone_prefixes.is_empty());

        let record = map_one(json!({"cca2": "XX", "idd": {"root": "+7"}}));
        assert!(record.phone_prefixes.is_empty());
    }

    #[test]
    fn test_phone_prefixes_keep_duplicates() {
        let record = map_one(json!({
            "cca2": "XX",
            "idd": {"root": "+3", "suffixes": ["9", "9", 9]}
        }));
        assert_eq!(record.phone_prefixes, vec!["+39", "+39"]);
    }

    #[test]
    fn test_empty_suffix_dropped_next_to_real_ones() {
        let record = map_one(json!({
            "cca2": "XX",
            "idd": {"root": "+1", "suffixes": ["", "201"]}
        }));
        assert_eq!(record.phone_prefixes, vec!["+1201"]);

        let record = map_one(json!({
            "cca2": "XX",
            "idd": {"root": "+1", "suffixes": ["", ""]}
        }));
        assert_eq!(record.phone_prefixes, vec!["+1"]);

        let record = map_one(json!({"cca2": "XX", "idd": {"root": "+1", "suffixes": []}}));
        assert!(record.phone_prefixes.is_empty());
    }

    #[test]
    fn test_native_name_uses_first_language() {
        let record = map_one(json!({
            "cca2": "FR",
            "name": {"common": "France", "nativeName": {"fra": {"common": "France"}}},
            "languages": {"fra": "French"}
        }));
        assert_eq!(record.native_name.as_deref(), Some("France"));

        let record = map_one(json!({
            "cca2": "BE",
            "name": {"common": "Belgium", "nativeName": {
                "deu": {"common": "Belgien"},
                "fra": {"common": "Belgique"},
                "nld": {"common": "België"}
            }},
            "languages": {"nld": "Dutch", "fra": "French", "deu": "German"}
        }));
        assert_eq!(record.native_name.as_deref(), Some("België"));
        assert_eq!(record.languages, vec!["nld", "fra", "deu"]);
    }

    #[test]
    fn test_native_name_absent_without_languages() {
        let record = map_one(json!({
            "cca2": "FR",
            "name": {"common": "France", "nativeName": {"fra": {"common": "France"}}}
        }));
        assert_eq!(record.native_name, None);

        let record = map_one(json!({
            "cca2": "FR",
            "name": {"common": "France", "nativeName": {"fra": {"common": "France"}}},
            "languages": {}
        }));
        assert_eq!(record.native_name, None);

        let record = map_one(json!({
            "cca2": "FR",
            "name": {"common": "France"},
            "languages": {"fra": "French"}
        }));
        assert_eq!(record.native_name, None);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record = map_one(json!({"cca2": "BV", "name": {"common": "Bouvet Island"}}));

        assert_eq!(record.code.as_deref(), Some("BV"));
        assert_eq!(record.capital, None);
        assert_eq!(record.region, None);
        assert_eq!(record.subregion, None);
        assert_eq!(record.population, 0);
        assert_eq!(record.area, 0.0);
        assert!(record.phone_prefixes.is_empty());
        assert!(record.currencies.is_empty());
        assert!(record.languages.is_empty());
    }

    #[test]
    fn test_capital_and_passthrough_fields() {
        let record = map_one(json!({
            "cca2": "ZA",
            "region": "Africa",
            "subregion": "Southern Africa",
            "capital": ["Pretoria", "Bloemfontein", "Cape Town"]
        }));
        assert_eq!(record.capital.as_deref(), Some("Pretoria"));
        assert_eq!(record.region.as_deref(), Some("Africa"));
        assert_eq!(record.subregion.as_deref(), Some("Southern Africa"));

        let record = map_one(json!({"cca2": "XX", "capital": []}));
        assert_eq!(record.capital, None);
    }

    #[test]
    fn test_non_numeric_population_and_area_default() {
        let record = map_one(json!({"cca2": "XX", "population": "many", "area": null}));
        assert_eq!(record.population, 0);
        assert_eq!(record.area, 0.0);

        let record = map_one(json!({"cca2": "XX", "population": -5, "area": -1.5}));
        assert_eq!(record.population, 0);
        assert_eq!(record.area, 0.0);

        let record = map_one(json!({"cca2": "XX", "population": 1234.9, "area": 12}));
        assert_eq!(record.population, 1234);
        assert_eq!(record.area, 12.0);
    }

    #[test]
    fn test_wrongly_typed_fields_are_absent() {
        let record = map_one(json!({
            "cca2": 42,
            "name": "not an object",
            "capital": "Paris",
            "idd": [],
            "currencies": ["EUR"],
            "languages": "fra"
        }));
        assert_eq!(record.code, None);
        assert_eq!(record.name, None);
        assert_eq!(record.capital, None);
        assert!(record.phone_prefixes.is_empty());
        assert!(record.currencies.is_empty());
        assert!(record.languages.is_empty());
    }

    #[test]
    fn test_top_level_must_be_a_list_of_objects() {
        let err = map_document(&json!({"status": 404})).unwrap_err();
        assert_eq!(err, MappingError::NotAList { found: "object" });

        let err = map_document(&json!([{"cca2": "US"}, "FR"])).unwrap_err();
        assert_eq!(
            err,
            MappingError::NotAnObject {
                index: 1,
                found: "string"
            }
        );

        assert!(map_document(&json!([])).unwrap().is_empty());
    }
}
