// Response envelope shared by every endpoint
//
// All responses, success and failure alike, are wrapped in
// `{"status": bool, "message": string|object, "data": array|object}`.
// The `data` field defaults to an empty array when an endpoint has nothing
// to return.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

/// Uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    /// True on success, false on any failure.
    pub status: bool,
    /// Human- or machine-readable outcome. Failure kinds that clients match
    /// on are objects of the form `{"error": "<kind>"}`.
    pub message: Value,
    /// Payload: an object for single resources, an array for lists.
    pub data: Value,
}

impl Envelope {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: true,
            message: Value::String(message.into()),
            data,
        }
    }

    /// Success with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self::ok(message, json!([]))
    }

    pub fn failure(message: impl Into<Value>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: json!([]),
        }
    }

    /// Failure whose message is a machine-matchable `{"error": kind}` object.
    pub fn failure_kind(kind: &str) -> Self {
        Self::failure(json!({ "error": kind }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let env = Envelope::ok("Done.", json!({"id": 1}));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["status"], json!(true));
        assert_eq!(value["message"], json!("Done."));
        assert_eq!(value["data"]["id"], json!(1));
    }

    #[test]
    fn test_failure_defaults_to_empty_data() {
        let env = Envelope::failure("User does not exist.");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["status"], json!(false));
        assert_eq!(value["data"], json!([]));
    }

    #[test]
    fn test_failure_kind_is_error_object() {
        let env = Envelope::failure_kind("Token_Expired");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["message"], json!({"error": "Token_Expired"}));
    }
}
