//! Placeholder request bodies synthesized from model facts.

use crate::extractor::ModelFact;
use serde_json::{Map, Value};

const INTEGER_TYPES: &[&str] = &[
    "int", "Integer", "long", "Long", "short", "Short", "byte", "Byte",
];
const FLOAT_TYPES: &[&str] = &["float", "Float", "double", "Double"];
const BOOLEAN_TYPES: &[&str] = &["boolean", "Boolean"];

/// Builds a JSON object with one placeholder per field, in field order.
///
/// A model without fields yields an empty object.
pub fn body_template(model: &ModelFact) -> Map<String, Value> {
    model
        .fields
        .iter()
        .map(|field| (field.name.clone(), placeholder_for(&field.declared_type)))
        .collect()
}

/// Placeholder value for a declared Java type.
///
/// Rules apply in order: integers, floating point, booleans, `String`, arrays
/// and list/set types, map types, and finally an empty object for anything
/// else.
pub fn placeholder_for(declared_type: &str) -> Value {
    if INTEGER_TYPES.contains(&declared_type) {
        Value::from(0)
    } else if FLOAT_TYPES.contains(&declared_type) {
        Value::from(0.0)
    } else if BOOLEAN_TYPES.contains(&declared_type) {
        Value::Bool(false)
    } else if declared_type == "String" {
        Value::String(String::new())
    } else if declared_type.ends_with("[]")
        || declared_type.contains("List")
        || declared_type.contains("Set")
    {
        Value::Array(Vec::new())
    } else {
        // Map types and nested objects share the empty-object placeholder.
        Value::Object(Map::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FieldFact;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn model(fields: &[(&str, &str)]) -> ModelFact {
        ModelFact {
            name: "Sample".to_string(),
            fields: fields
                .iter()
                .map(|(name, ty)| FieldFact {
                    name: name.to_string(),
                    declared_type: ty.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_placeholders_by_type() {
        assert_eq!(placeholder_for("int"), json!(0));
        assert_eq!(placeholder_for("Long"), json!(0));
        assert_eq!(placeholder_for("double"), json!(0.0));
        assert_eq!(placeholder_for("Boolean"), json!(false));
        assert_eq!(placeholder_for("String"), json!(""));
        assert_eq!(placeholder_for("byte[]"), json!([]));
        assert_eq!(placeholder_for("List<String>"), json!([]));
        assert_eq!(placeholder_for("HashSet<Long>"), json!([]));
        assert_eq!(placeholder_for("Map<String, Integer>"), json!({}));
        assert_eq!(placeholder_for("Address"), json!({}));
        assert_eq!(placeholder_for("LocalDate"), json!({}));
    }

    #[test]
    fn test_template_keeps_field_order() {
        let template = body_template(&model(&[
            ("zeta", "String"),
            ("alpha", "int"),
            ("tags", "List<String>"),
            ("active", "boolean"),
        ]));

        let keys: Vec<&str> = template.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "tags", "active"]);
        assert_eq!(
            serde_json::to_string(&template).unwrap(),
            r#"{"zeta":"","alpha":0,"tags":[],"active":false}"#
        );
    }

    #[test]
    fn test_empty_model_yields_empty_template() {
        assert!(body_template(&model(&[])).is_empty());
    }

    #[test]
    fn test_template_is_deterministic() {
        let fact = model(&[("b", "Float"), ("a", "Map<String, String>")]);
        assert_eq!(body_template(&fact), body_template(&fact));
    }
}
