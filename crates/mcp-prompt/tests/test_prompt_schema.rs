use mcp_prompt::{
    model::{GetPromptRequest, GetPromptResult, Prompt, PromptMessage},
    schemars::schema_for,
};
use serde_json::Value;

fn collect_strings(value: &Value, key: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(object) => {
            for (k, v) in object {
                if k == key {
                    match v {
                        Value::String(s) => out.push(s.clone()),
                        // older drafts spell a single allowed value as a one-element enum
                        Value::Array(values) => out.extend(
                            values.iter().filter_map(Value::as_str).map(str::to_string),
                        ),
                        _ => {}
                    }
                }
                collect_strings(v, key, out);
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, key, out)),
        _ => {}
    }
}

#[test]
fn test_prompt_message_schema_lists_every_content_tag() {
    let schema = serde_json::to_value(schema_for!(PromptMessage)).unwrap();
    let mut consts = Vec::new();
    collect_strings(&schema, "const", &mut consts);
    collect_strings(&schema, "enum", &mut consts);
    for tag in ["text", "image", "resource"] {
        assert!(consts.iter().any(|c| c == tag), "missing tag {tag} in {consts:?}");
    }
}

#[test]
fn test_get_prompt_request_schema_pins_method() {
    let schema = serde_json::to_value(schema_for!(GetPromptRequest)).unwrap();
    let mut consts = Vec::new();
    collect_strings(&schema, "const", &mut consts);
    collect_strings(&schema, "enum", &mut consts);
    assert!(consts.iter().any(|c| c == "prompts/get"));
}

#[test]
fn test_prompt_and_result_schemas_are_objects() {
    for schema in [
        serde_json::to_value(schema_for!(Prompt)).unwrap(),
        serde_json::to_value(schema_for!(GetPromptResult)).unwrap(),
    ] {
        assert_eq!(schema["type"], "object");
    }
}
