//! Normalization of raw widget JSON.
//!
//! The REST service returns semi-structured trees with two recurring
//! idioms: an entity reference (`{id, label, class|taxonomy, ...}`) and a
//! value wrapper (`{data: ..., description?: ...}`). Both are collapsed
//! into flat, terminal shapes so the transform is idempotent:
//! `simplify_value(simplify_value(v)) == simplify_value(v)`.

use serde_json::{Map, Value};

/// Flatten one widget payload.
///
/// Unwraps a single `{"fields": {...}}` envelope when present, drops null
/// fields, and simplifies every remaining value. Non-object payloads
/// flatten to an empty map.
pub fn clean_widget_data(data: &Value) -> Map<String, Value> {
    let fields = match data.get("fields") {
        Some(Value::Object(fields)) => fields,
        _ => match data {
            Value::Object(obj) => obj,
            _ => return Map::new(),
        },
    };

    let mut cleaned = Map::new();
    for (key, value) in fields {
        let simplified = simplify_value(value);
        if simplified.is_null() {
            continue;
        }
        cleaned.insert(key.clone(), simplified);
    }
    cleaned
}

/// Recursively simplify an arbitrary JSON value.
pub fn simplify_value(value: &Value) -> Value {
    match value {
        Value::Object(obj) => simplify_object(obj),
        Value::Array(items) => Value::Array(items.iter().map(simplify_value).collect()),
        scalar => scalar.clone(),
    }
}

fn simplify_object(obj: &Map<String, Value>) -> Value {
    // Entity reference: collapse to {id, label, class}, extra keys dropped.
    // Checked before the wrapper shape so a reference carrying a stray
    // `data` key still collapses as a reference.
    if obj.contains_key("id") && obj.contains_key("label") {
        let mut reference = Map::new();
        reference.insert("id".into(), obj["id"].clone());
        reference.insert("label".into(), obj["label"].clone());
        if let Some(class) = non_null(obj.get("class")).or_else(|| non_null(obj.get("taxonomy"))) {
            reference.insert("class".into(), class.clone());
        }
        return Value::Object(reference);
    }

    // Value wrapper: {data, <at most one sibling>} collapses to its data.
    // Null siblings are not counted; they would be dropped below anyway,
    // and counting them would break idempotence.
    if let Some(data) = non_null(obj.get("data")) {
        if obj.values().filter(|v| !v.is_null()).count() <= 2 {
            return simplify_value(data);
        }
    }

    let mut simplified = Map::new();
    for (key, value) in obj {
        let value = simplify_value(value);
        if value.is_null() {
            continue;
        }
        simplified.insert(key.clone(), value);
    }
    Value::Object(simplified)
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_fields_envelope() {
        let raw = json!({
            "fields": {
                "name": { "data": { "id": "WBGene00006763", "label": "unc-13", "class": "gene" } },
                "status": { "data": "live" }
            }
        });
        let cleaned = clean_widget_data(&raw);
        assert_eq!(cleaned["status"], json!("live"));
        assert_eq!(
            cleaned["name"],
            json!({ "id": "WBGene00006763", "label": "unc-13", "class": "gene" })
        );
    }

    #[test]
    fn missing_envelope_uses_payload_as_is() {
        let raw = json!({ "status": "live", "gone": null });
        let cleaned = clean_widget_data(&raw);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned["status"], json!("live"));
    }

    #[test]
    fn non_object_payload_flattens_to_empty() {
        assert!(clean_widget_data(&json!(null)).is_empty());
        assert!(clean_widget_data(&json!("text")).is_empty());
        assert!(clean_widget_data(&json!([1, 2])).is_empty());
    }

    #[test]
    fn reference_collapse_drops_extra_keys() {
        let v = json!({ "id": "X", "label": "Y", "class": "gene", "extra": 1 });
        assert_eq!(
            simplify_value(&v),
            json!({ "id": "X", "label": "Y", "class": "gene" })
        );
    }

    #[test]
    fn reference_class_falls_back_to_taxonomy() {
        let v = json!({ "id": "X", "label": "Y", "taxonomy": "c_elegans" });
        assert_eq!(
            simplify_value(&v),
            json!({ "id": "X", "label": "Y", "class": "c_elegans" })
        );

        // No class at all: the key stays absent, it is not emitted as null.
        let v = json!({ "id": "X", "label": "Y" });
        assert_eq!(simplify_value(&v), json!({ "id": "X", "label": "Y" }));
    }

    #[test]
    fn wrapper_collapses_to_its_data() {
        let v = json!({ "data": { "data": "deep" }, "description": "ignored" });
        assert_eq!(simplify_value(&v), json!("deep"));

        // Three keys is no longer the wrapper idiom.
        let v = json!({ "data": "d", "a": 1, "b": 2 });
        assert_eq!(simplify_value(&v), json!({ "data": "d", "a": 1, "b": 2 }));

        // Null siblings do not count against the wrapper shape.
        let v = json!({ "data": "d", "a": null, "b": null });
        assert_eq!(simplify_value(&v), json!("d"));

        // A null data value is no wrapper at all.
        let v = json!({ "data": null, "note": "n" });
        assert_eq!(simplify_value(&v), json!({ "note": "n" }));
    }

    #[test]
    fn arrays_keep_order() {
        let v = json!([
            { "data": "first" },
            { "id": "A", "label": "a", "class": "gene", "noise": true },
            "third"
        ]);
        assert_eq!(
            simplify_value(&v),
            json!(["first", { "id": "A", "label": "a", "class": "gene" }, "third"])
        );
    }

    #[test]
    fn nested_objects_drop_nulls() {
        let v = json!({ "outer": { "keep": 1, "drop": null } });
        assert_eq!(simplify_value(&v), json!({ "outer": { "keep": 1 } }));
    }

    #[test]
    fn simplify_is_idempotent() {
        let samples = vec![
            json!(null),
            json!(42),
            json!("scalar"),
            json!({ "id": "X", "label": "Y", "class": "gene", "extra": 1 }),
            json!({ "id": "X", "label": "Y", "taxonomy": "c_elegans", "data": "stray" }),
            json!({ "data": { "data": [1, null, { "id": "A", "label": "a" }] } }),
            json!({ "fields": "not-an-envelope", "other": { "data": "d", "evidence": {} } }),
            json!([{ "data": "x" }, { "nested": { "drop": null, "keep": [] } }]),
            json!({ "data": "d", "a": null, "b": null }),
            json!({ "wrapped": { "data": null, "note": null } }),
        ];
        for v in samples {
            let once = simplify_value(&v);
            let twice = simplify_value(&once);
            assert_eq!(once, twice, "not idempotent for {v}");
        }
    }
}
