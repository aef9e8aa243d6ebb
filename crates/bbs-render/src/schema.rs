//! JSON Schema export of the render request payload.
//!
//! schemars emits draft 2020-12. Upstream producers of render requests
//! commonly validate with draft-07 tooling, so the exported schema is
//! rewritten:
//! - `$defs` → `definitions`, with every `$ref` updated
//! - optional fields (`anyOf` with `null`, or a `type` array containing
//!   `"null"`) collapse to their non-null schema
//! - `$schema` names draft-07

use serde_json::{Map, Value};

use bbs_render_core::FrameOptions;

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Draft-07 JSON Schema describing a [`FrameOptions`] request.
pub fn frame_options_schema() -> Value {
    let schema = schemars::schema_for!(FrameOptions).to_value();
    to_draft07(schema)
}

/// Rewrite a draft 2020-12 schema into draft-07 form.
pub fn to_draft07(mut schema: Value) -> Value {
    if let Some(root) = schema.as_object_mut() {
        if let Some(defs) = root.remove("$defs") {
            root.insert("definitions".to_string(), defs);
        }
        root.insert("$schema".to_string(), Value::String(DRAFT_07.to_string()));
    }
    rewrite(&mut schema);
    schema
}

/// Walk every nested schema, fixing references and nullable forms.
fn rewrite(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            rewrite_ref(obj);
            collapse_nullable_any_of(obj);
            collapse_nullable_type(obj);
            for nested in obj.values_mut() {
                rewrite(nested);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(rewrite),
        _ => {}
    }
}

fn rewrite_ref(obj: &mut Map<String, Value>) {
    if let Some(Value::String(target)) = obj.get_mut("$ref") {
        if let Some(name) = target.strip_prefix("#/$defs/") {
            *target = format!("#/definitions/{name}");
        }
    }
}

/// `{"anyOf": [X, {"type": "null"}]}` becomes `X`.
fn collapse_nullable_any_of(obj: &mut Map<String, Value>) {
    let Some(Value::Array(variants)) = obj.get("anyOf") else {
        return;
    };
    if variants.len() != 2 {
        return;
    }

    let kept = match (is_bare_null(&variants[0]), is_bare_null(&variants[1])) {
        (false, true) => variants[0].clone(),
        (true, false) => variants[1].clone(),
        _ => return,
    };

    obj.remove("anyOf");
    if let Value::Object(kept) = kept {
        obj.extend(kept);
    }
}

/// `{"type": ["string", "null"]}` becomes `{"type": "string"}`.
fn collapse_nullable_type(obj: &mut Map<String, Value>) {
    let Some(Value::Array(types)) = obj.get("type") else {
        return;
    };
    let non_null: Vec<Value> = types
        .iter()
        .filter(|t| t.as_str() != Some("null"))
        .cloned()
        .collect();
    if non_null.len() == types.len() {
        return;
    }

    let collapsed = match non_null.len() {
        1 => non_null.into_iter().next().unwrap_or(Value::Null),
        _ => Value::Array(non_null),
    };
    obj.insert("type".to_string(), collapsed);
}

fn is_bare_null(schema: &Value) -> bool {
    schema
        .as_object()
        .is_some_and(|o| o.len() == 1 && o.get("type").and_then(Value::as_str) == Some("null"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defs_become_definitions() {
        let schema = json!({
            "$defs": { "BorderStyle": { "type": "string" } },
            "properties": {
                "border_style": { "$ref": "#/$defs/BorderStyle" },
                "list": { "items": [{ "$ref": "#/$defs/BorderStyle" }] }
            }
        });

        let result = to_draft07(schema);

        assert!(result["$defs"].is_null());
        assert!(result["definitions"]["BorderStyle"].is_object());
        assert_eq!(
            result["properties"]["border_style"]["$ref"],
            "#/definitions/BorderStyle"
        );
        assert_eq!(
            result["properties"]["list"]["items"][0]["$ref"],
            "#/definitions/BorderStyle"
        );
        assert_eq!(result["$schema"], DRAFT_07);
    }

    #[test]
    fn test_nullable_any_of_collapses() {
        let schema = json!({
            "properties": {
                "title": {
                    "description": "Optional title",
                    "anyOf": [{ "type": "string" }, { "type": "null" }]
                },
                "either": { "anyOf": [{ "type": "string" }, { "type": "integer" }] }
            }
        });

        let result = to_draft07(schema);
        let title = &result["properties"]["title"];
        assert!(title["anyOf"].is_null());
        assert_eq!(title["type"], "string");
        assert_eq!(title["description"], "Optional title");
        assert!(result["properties"]["either"]["anyOf"].is_array());
    }

    #[test]
    fn test_nullable_type_array_collapses() {
        let schema = json!({
            "properties": {
                "color_name": { "type": ["string", "null"] },
                "mixed": { "type": ["string", "integer", "null"] }
            }
        });

        let result = to_draft07(schema);
        assert_eq!(result["properties"]["color_name"]["type"], "string");
        assert_eq!(
            result["properties"]["mixed"]["type"],
            json!(["string", "integer"])
        );
    }

    #[test]
    fn test_frame_options_schema() {
        let schema = frame_options_schema();
        assert_eq!(schema["$schema"], DRAFT_07);
        assert_eq!(schema["title"], "FrameOptions");
        assert!(schema["properties"]["width"].is_object());
        assert!(schema["properties"]["content_lines"].is_object());
        assert!(schema["definitions"]["BorderStyle"].is_object());
        assert!(schema.get("$defs").is_none());
    }
}
