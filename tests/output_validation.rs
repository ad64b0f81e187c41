//! Output Validation Tests
//!
//! Validates the JSON envelopes printed by the CLI:
//! - Success envelopes carry exactly `ok`, `command`, `data`, `meta`
//! - Error envelopes carry exactly `ok`, `command`, `error`
//! - Every error variant maps to its stable code
//!
//! Uses `insta` for snapshot testing to detect unintended output changes.

use pretty_assertions::assert_eq;
use serde_json::json;

use resmon::{
    AccountObjectIdentifier, Client, ErrorEnvelope, ErrorInfo, Metadata, RecordingExecutor,
    ResmonError, SuccessEnvelope,
};

fn keys(value: &serde_json::Value) -> Vec<&str> {
    let mut keys: Vec<&str> =
        value.as_object().expect("should be a JSON object").keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

// ============================================================================
// Success Envelope Structure Tests
// ============================================================================

#[test]
fn test_success_envelope_structure() {
    let data = json!({"statements": [r#"DROP RESOURCE MONITOR "X""#]});
    let envelope = SuccessEnvelope::new("drop", data, Metadata::new(3));

    let json_value = serde_json::to_value(&envelope).expect("Should serialize");

    assert_eq!(keys(&json_value), vec!["command", "data", "meta", "ok"]);
    assert_eq!(json_value["ok"], true);
    assert_eq!(json_value["command"], "drop");
    assert_eq!(json_value["data"]["statements"][0], r#"DROP RESOURCE MONITOR "X""#);
    assert_eq!(keys(&json_value["meta"]), vec!["execution_ms"]);
}

#[test]
fn test_success_envelope_snapshot() {
    let envelope = SuccessEnvelope::new(
        "show",
        json!({"statements": ["SHOW RESOURCE MONITORS"], "resource_monitors": []}),
        Metadata::with_rows(0, 0),
    );

    let json_str = serde_json::to_string(&envelope).expect("Should serialize");
    insta::assert_snapshot!(json_str, @r#"{"ok":true,"command":"show","data":{"resource_monitors":[],"statements":["SHOW RESOURCE MONITORS"]},"meta":{"execution_ms":0,"rows_returned":0}}"#);
}

// ============================================================================
// Error Envelope Structure Tests
// ============================================================================

#[test]
fn test_error_envelope_structure() {
    let envelope = ErrorEnvelope::new("create", ErrorInfo::new("TEST_ERROR", "Test error message"));

    let json_value = serde_json::to_value(&envelope).expect("Should serialize");

    assert_eq!(keys(&json_value), vec!["command", "error", "ok"]);
    assert_eq!(json_value["ok"], false);
    assert_eq!(keys(&json_value["error"]), vec!["code", "message"]);
    assert_eq!(json_value["error"]["code"], "TEST_ERROR");
}

#[test]
fn test_error_codes_are_stable() {
    let cases = [
        (ResmonError::validation("v"), "VALIDATION_ERROR"),
        (ResmonError::render("r"), "RENDER_ERROR"),
        (ResmonError::transport("t"), "TRANSPORT_ERROR"),
        (ResmonError::decode("d"), "DECODE_ERROR"),
        (ResmonError::invalid_enum("frequency", "FORTNIGHTLY"), "INVALID_ENUM"),
        (ResmonError::not_found("\"X\""), "NOT_FOUND"),
        (ResmonError::capability_violation("c"), "CAPABILITY_VIOLATION"),
        (ResmonError::config_error("c"), "CONFIG_ERROR"),
    ];

    for (err, code) in cases {
        let envelope = ErrorEnvelope::from_error("any", &err);
        assert_eq!(envelope.error.code, code);
        assert_eq!(envelope.error.message, err.to_string());
    }
}

#[tokio::test]
async fn test_error_envelope_from_failed_operation() {
    let client = Client::new(RecordingExecutor::new());
    let err = client
        .resource_monitors()
        .drop(&AccountObjectIdentifier::new(""))
        .await
        .unwrap_err();

    let envelope = ErrorEnvelope::from_error("drop", &err);
    let json_str = serde_json::to_string(&envelope).expect("Should serialize");

    insta::assert_snapshot!(json_str, @r#"{"ok":false,"command":"drop","error":{"code":"VALIDATION_ERROR","message":"Validation failed: invalid object identifier: \"\""}}"#);
}

#[test]
fn test_envelope_round_trips_through_json() {
    let original = ErrorEnvelope::new("alter", ErrorInfo::new("NOT_FOUND", "missing"));
    let json_str = serde_json::to_string(&original).expect("Should serialize");
    let parsed: ErrorEnvelope = serde_json::from_str(&json_str).expect("Should deserialize");

    assert!(!parsed.ok);
    assert_eq!(parsed.command, "alter");
    assert_eq!(parsed.error.message, "missing");
}
