//! Normalization of the backend's response envelopes.
//!
//! Endpoints answer with `{success, data, message, errorSources}`, with a bare
//! `{data}` or with a raw array/object. All of them are folded into one
//! `ApiResult` here so call sites never inspect envelopes themselves.

use super::error::{ApiError, ApiResult, FieldError};
use serde::de::DeserializeOwned;
use serde_json::Value;

const DEFAULT_FAILURE: &str = "Request failed";

/// Parse a response body. Empty bodies decode to `null`.
pub(crate) fn parse_body(status: u16, text: &str) -> ApiResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str::<Value>(text) {
        Ok(v) => Ok(v),
        // Proxies answer errors with HTML; keep the status visible.
        Err(_) if !is_success(status) => Err(ApiError::Http {
            status,
            message: truncate_chars(text.trim(), 200),
        }),
        Err(e) => Err(ApiError::parse(e)),
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn field_errors(body: &Value) -> Vec<FieldError> {
    body.get("errorSources")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<FieldError>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Fold status + body into the payload or a typed error.
pub(crate) fn decode_value(status: u16, body: Value) -> ApiResult<Value> {
    if status == 401 || status == 403 {
        return Err(ApiError::Unauthorized {
            status,
            message: message_of(&body).unwrap_or_else(|| "Unauthorized".to_string()),
        });
    }

    if body.get("success").and_then(|s| s.as_bool()) == Some(false) {
        return Err(ApiError::Rejected {
            message: message_of(&body).unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            fields: field_errors(&body),
        });
    }

    if !is_success(status) {
        return Err(ApiError::Http {
            status,
            message: message_of(&body).unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
        });
    }

    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

/// Mongoose emits the `id` virtual next to `_id`. Records read `_id` and
/// accept `id` only as a fallback, so the virtual is dropped at every depth.
fn drop_id_virtuals(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("_id") {
                map.remove("id");
            }
            map.values_mut().for_each(drop_id_virtuals);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_id_virtuals),
        _ => {}
    }
}

pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: Value) -> ApiResult<T> {
    let mut payload = decode_value(status, body)?;
    drop_id_virtuals(&mut payload);
    serde_json::from_value(payload).map_err(ApiError::parse)
}

/// Decode a collection payload.
///
/// Accepts a raw array, `null` (empty), or an object wrapping the array under
/// `result`, `items` or a nested `data`. Any item that does not match `T`
/// fails the whole list with `Parse`.
pub(crate) fn decode_list<T: DeserializeOwned>(status: u16, body: Value) -> ApiResult<Vec<T>> {
    let payload = decode_value(status, body)?;
    let items = match payload {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(mut map) => {
            let inner = ["result", "items", "data"]
                .iter()
                .find_map(|k| match map.remove(*k) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                });
            match inner {
                Some(items) => items,
                None => return Err(ApiError::parse("expected a list payload")),
            }
        }
        other => {
            return Err(ApiError::parse(format!(
                "expected a list payload, got {other}"
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, mut item)| {
            drop_id_virtuals(&mut item);
            serde_json::from_value::<T>(item)
                .map_err(|e| ApiError::parse(format!("record {i}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiErrorKind;
    use crate::models::Course;
    use serde_json::json;

    #[test]
    fn test_success_envelope_unwraps_data() {
        let v = decode_value(200, json!({"success": true, "message": "ok", "data": {"id": 1}}))
            .expect("should decode");
        assert_eq!(v, json!({"id": 1}));
    }

    #[test]
    fn test_bare_data_envelope_unwraps() {
        let v = decode_value(200, json!({"data": [1, 2]})).expect("should decode");
        assert_eq!(v, json!([1, 2]));
    }

    #[test]
    fn test_raw_array_passes_through() {
        let v = decode_value(200, json!([{"id": 1}])).expect("should decode");
        assert_eq!(v, json!([{"id": 1}]));
    }

    #[test]
    fn test_success_false_inside_2xx_is_rejected() {
        let err = decode_value(
            200,
            json!({
                "success": false,
                "message": "Validation Error",
                "errorSources": [{"path": "title", "message": "Required"}]
            }),
        )
        .expect_err("should be rejected");
        assert_eq!(
            err,
            ApiError::Rejected {
                message: "Validation Error".to_string(),
                fields: vec![FieldError {
                    path: "title".to_string(),
                    message: "Required".to_string()
                }],
            }
        );
    }

    #[test]
    fn test_unauthorized_statuses() {
        let err = decode_value(401, json!({"success": false, "message": "jwt expired"}))
            .expect_err("should fail");
        assert_eq!(
            err,
            ApiError::Unauthorized {
                status: 401,
                message: "jwt expired".to_string()
            }
        );
        assert!(decode_value(403, Value::Null)
            .expect_err("should fail")
            .is_unauthorized());
    }

    #[test]
    fn test_non_2xx_without_envelope_is_http_error() {
        let err = decode_value(500, json!({"error": "x"})).expect_err("should fail");
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: DEFAULT_FAILURE.to_string()
            }
        );
    }

    #[test]
    fn test_parse_body_handles_empty_and_html() {
        assert_eq!(parse_body(204, "").expect("empty ok"), Value::Null);
        let err = parse_body(502, "<html>Bad Gateway</html>").expect_err("should fail");
        assert_eq!(err.kind(), ApiErrorKind::Http);
        let err = parse_body(200, "not json").expect_err("should fail");
        assert_eq!(err.kind(), ApiErrorKind::Parse);
    }

    #[test]
    fn test_decode_list_accepts_wrappers() {
        let a: Vec<u32> = decode_list(200, json!({"data": {"result": [1, 2], "meta": {}}}))
            .expect("result wrapper");
        assert_eq!(a, vec![1, 2]);

        let b: Vec<u32> = decode_list(200, json!({"success": true, "data": {"items": [3]}}))
            .expect("items wrapper");
        assert_eq!(b, vec![3]);

        let c: Vec<u32> = decode_list(200, json!({"data": null})).expect("null is empty");
        assert!(c.is_empty());
    }

    #[test]
    fn test_decode_list_fails_on_malformed_item() {
        let r: ApiResult<Vec<u32>> = decode_list(200, json!([1, "two", 3]));
        match r {
            Err(ApiError::Parse(message)) => assert!(message.starts_with("record 1:")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_list_keeps_mongoose_documents() {
        let courses: Vec<Course> = decode_list(
            200,
            json!({"success": true, "data": [
                {"_id": "1", "id": "1", "title": "Intro", "price": 10,
                 "category": {"_id": "c1", "id": "c1", "name": "Backend"}},
                {"_id": "2", "title": "Go", "price": null, "rating": null},
                {"_id": "3", "title": "Rust"}
            ]}),
        )
        .expect("all records should decode");
        let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(courses[0].category.as_ref().map(|c| c.label()), Some("Backend"));
        assert_eq!(courses[1].price, 0.0);
    }

    #[test]
    fn test_decode_single_record_drops_id_virtual() {
        let c: Course = decode(200, json!({"data": {"_id": "9", "id": "9", "title": "t"}}))
            .expect("should decode");
        assert_eq!(c.id, "9");
    }

    #[test]
    fn test_decode_list_rejects_scalars() {
        let r: ApiResult<Vec<u32>> = decode_list(200, json!({"data": 5}));
        assert!(matches!(r, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_decode_typed_payload_mismatch_is_parse_error() {
        let r: ApiResult<u32> = decode(200, json!({"data": "nope"}));
        assert!(matches!(r, Err(ApiError::Parse(_))));
    }
}
