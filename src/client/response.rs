use crate::client::error::ClientError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status and body of a completed request.
///
/// Fields are addressed with dotted paths. A name applied to an array is
/// projected over its elements, so `data._id` yields the id of every catalog
/// entry and `orders.number` the number of every order; a numeric segment
/// indexes into an array (`orders.0.number`).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Value,
    raw: String,
}

impl ApiResponse {
    /// Keeps a non-JSON body as raw text with a `null` JSON body.
    pub fn from_parts(status: u16, raw: String) -> Self {
        let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
        Self { status, body, raw }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn path(&self, path: &str) -> Option<Value> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        select(&self.body, &segments)
    }

    pub fn str_at(&self, path: &str) -> Option<String> {
        match self.path(path)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.path(path)?.as_bool()
    }

    pub fn i64_at(&self, path: &str) -> Option<i64> {
        self.path(path)?.as_i64()
    }

    /// A projected list of strings; `None` if any element is not a string.
    pub fn strings_at(&self, path: &str) -> Option<Vec<String>> {
        match self.path(path)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<bool> {
        self.bool_at("success")
    }

    pub fn message(&self) -> Option<String> {
        self.str_at("message")
    }

    /// Decodes the whole body into a typed response.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

fn select(value: &Value, segments: &[&str]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    match value {
        Value::Object(map) => select(map.get(*head)?, rest),
        Value::Array(items) => match head.parse::<usize>() {
            Ok(index) => select(items.get(index)?, rest),
            Err(_) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| select(item, segments).unwrap_or(Value::Null))
                    .collect(),
            )),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> ApiResponse {
        ApiResponse::from_parts(200, body.to_string())
    }

    #[test]
    fn test_scalar_lookup() {
        let resp = response(json!({
            "success": true,
            "user": { "email": "a@ya.ru", "name": "Alice" },
            "order": { "number": 42 }
        }));

        assert_eq!(resp.success(), Some(true));
        assert_eq!(resp.str_at("user.email").as_deref(), Some("a@ya.ru"));
        assert_eq!(resp.i64_at("order.number"), Some(42));
        assert_eq!(resp.str_at("user.missing"), None);
        assert_eq!(resp.str_at("order.number"), None);
    }

    #[test]
    fn test_projection_over_array() {
        let resp = response(json!({
            "data": [ { "_id": "a" }, { "_id": "b" }, { "_id": "c" } ]
        }));

        assert_eq!(
            resp.strings_at("data._id"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_nested_projection_keeps_inner_lists() {
        let resp = response(json!({
            "orders": [
                { "ingredients": ["x", "y"], "number": 1 },
                { "ingredients": ["z"], "number": 2 }
            ]
        }));

        assert_eq!(resp.path("orders.ingredients"), Some(json!([["x", "y"], ["z"]])));
        assert_eq!(resp.path("orders.number"), Some(json!([1, 2])));
        assert_eq!(resp.i64_at("orders.1.number"), Some(2));
        assert_eq!(resp.i64_at("orders.5.number"), None);
    }

    #[test]
    fn test_non_json_body_is_kept_raw() {
        let resp = ApiResponse::from_parts(500, "<html>Internal Server Error</html>".to_string());

        assert_eq!(resp.status(), 500);
        assert_eq!(resp.body(), &Value::Null);
        assert!(resp.raw().contains("Internal Server Error"));
        assert_eq!(resp.success(), None);
    }

    #[test]
    fn test_typed_decode() {
        #[derive(serde::Deserialize)]
        struct Envelope {
            success: bool,
            message: String,
        }

        let resp = response(json!({ "success": false, "message": "nope" }));
        let envelope: Envelope = resp.json().unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.message, "nope");
        assert!(resp.json::<Vec<u8>>().is_err());
    }
}
