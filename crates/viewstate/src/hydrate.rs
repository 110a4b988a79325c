//! Merging decoded link state over dataset defaults.

use serde_json::Value;

/// Overlay `state` onto `defaults`.
///
/// Objects merge key by key, recursively; any other value in `state`
/// replaces the default outright.
pub fn merge_over(defaults: &Value, state: &Value) -> Value {
    match (defaults, state) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                let next = match merged.get(key) {
                    Some(existing) => merge_over(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_merge() {
        let defaults = json!({
            "heatmap": {"zoom": 8, "rowMode": "Text"},
            "cellMD": {"searchVal": ""}
        });
        let state = json!({"heatmap": {"zoom": 13}});
        assert_eq!(
            merge_over(&defaults, &state),
            json!({
                "heatmap": {"zoom": 13, "rowMode": "Text"},
                "cellMD": {"searchVal": ""}
            })
        );
    }

    #[test]
    fn arrays_replace() {
        let defaults = json!({"order": [1, 2, 3]});
        let state = json!({"order": [9]});
        assert_eq!(merge_over(&defaults, &state), json!({"order": [9]}));
    }

    #[test]
    fn new_keys_are_added() {
        assert_eq!(
            merge_over(&json!({}), &json!({"geneMD": {"searchVal": "x"}})),
            json!({"geneMD": {"searchVal": "x"}})
        );
    }
}
