use serde_json::Value;

/// Masks credentials and personal data in JSON payloads for logging.
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sanitized = serde_json::Map::new();
            for (key, val) in map {
                let sanitized_val = if is_sensitive_field(key) {
                    mask_value(key, val)
                } else {
                    sanitize_json(val)
                };
                sanitized.insert(key.clone(), sanitized_val);
            }
            Value::Object(sanitized)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sanitize_json).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_field(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("password")
        || matches!(
            key.as_str(),
            "email" | "token" | "secret" | "authorization" | "api_key"
        )
}

fn mask_value(key: &str, value: &Value) -> Value {
    match value {
        // Keep the domain so logs still show which provider a user came from.
        Value::String(s) if key.eq_ignore_ascii_case("email") => match s.split_once('@') {
            Some((_, domain)) => Value::String(format!("****@{}", domain)),
            None => Value::String("****".to_string()),
        },
        _ => Value::String("****".to_string()),
    }
}
