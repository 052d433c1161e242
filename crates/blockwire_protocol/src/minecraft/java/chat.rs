//! Flattening of JSON chat components into plain text for logs and events.

use serde_json::Value;

/// Concatenates the `text` of a chat component and all of its `extra`
/// children. Falls back to the raw input when it is not JSON.
pub fn plain_text(json: &str) -> String {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => component_text(&value),
        Err(_) => json.to_string(),
    }
}

pub fn component_text(value: &Value) -> String {
    let mut out = String::new();
    append_component(value, &mut out);
    out
}

fn append_component(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(parts) => parts.iter().for_each(|p| append_component(p, out)),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            } else if let Some(Value::String(key)) = map.get("translate") {
                out.push_str(key);
                if let Some(Value::Array(with)) = map.get("with") {
                    let args: Vec<String> = with.iter().map(component_text).collect();
                    if !args.is_empty() {
                        out.push_str(" [");
                        out.push_str(&args.join(", "));
                        out.push(']');
                    }
                }
            }
            if let Some(extra) = map.get("extra") {
                append_component(extra, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text(r#""hello""#), "hello");
        assert_eq!(
            plain_text(r#"{"text":"A ","extra":[{"text":"Minecraft"},{"text":" Server"}]}"#),
            "A Minecraft Server"
        );
        assert_eq!(
            plain_text(r#"{"translate":"multiplayer.disconnect.kicked"}"#),
            "multiplayer.disconnect.kicked"
        );
        assert_eq!(
            plain_text(r#"{"translate":"chat.type.text","with":["Steve","hi"]}"#),
            "chat.type.text [Steve, hi]"
        );
        assert_eq!(plain_text("not json"), "not json");
    }
}
