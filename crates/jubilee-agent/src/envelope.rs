//! Inbound payload unwrapping and outbound envelope shaping.
//!
//! Two inbound shapes are accepted: a JSONRPC-like message envelope and a
//! simplified `{content: text}` object. The outbound shape mirrors the
//! inbound one, decided purely by key presence, never by intent.

use serde_json::{json, Value};

/// Pull the message text from a JSONRPC-shaped payload only
/// (`params.message.parts[0].text`). Only the first part is consulted;
/// additional parts are ignored.
pub fn extract_rpc_text(payload: &Value) -> Option<String> {
    payload["params"]["message"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
}

/// Pull the message text out of an inbound payload.
///
/// Checks the JSONRPC part path first, then a top-level `content` string.
pub fn extract_text(payload: &Value) -> Option<String> {
    extract_rpc_text(payload).or_else(|| payload["content"].as_str().map(|s| s.to_string()))
}

/// Whether the payload carries both a `jsonrpc` field and an `id` field.
///
/// A structural check only; the values are echoed back untouched.
pub fn is_rpc_shaped(payload: &Value) -> bool {
    payload.get("jsonrpc").is_some() && payload.get("id").is_some()
}

/// Wrap a reply in the envelope matching the inbound shape.
pub fn wrap_reply(payload: &Value, message: &str) -> Value {
    if is_rpc_shaped(payload) {
        json!({
            "jsonrpc": payload["jsonrpc"],
            "id": payload["id"],
            "result": {
                "message": {
                    "kind": "message",
                    "role": "assistant",
                    "parts": [{ "kind": "text", "text": message }]
                }
            }
        })
    } else {
        json!({ "status": "success", "response": message })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_payload(text: &str) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "message/send",
            "params": { "message": { "parts": [{ "text": text }] } }
        })
    }

    #[test]
    fn test_extract_text_from_rpc_shape() {
        let payload = rpc_payload("remember my birthday 2005-01-01");
        assert_eq!(
            extract_text(&payload).unwrap(),
            "remember my birthday 2005-01-01"
        );
    }

    #[test]
    fn test_extract_text_from_content_shape() {
        let payload = json!({ "content": "hello" });
        assert_eq!(extract_text(&payload).unwrap(), "hello");
    }

    #[test]
    fn test_extract_text_only_first_part() {
        let payload = json!({
            "params": { "message": { "parts": [{ "text": "first" }, { "text": "second" }] } }
        });
        assert_eq!(extract_text(&payload).unwrap(), "first");
    }

    #[test]
    fn test_extract_text_absent() {
        assert!(extract_text(&json!({})).is_none());
        assert!(extract_text(&json!({ "params": { "message": { "parts": [] } } })).is_none());
        assert!(extract_text(&json!({ "content": 42 })).is_none());
    }

    #[test]
    fn test_rpc_shape_needs_both_keys() {
        assert!(is_rpc_shaped(&json!({ "jsonrpc": "2.0", "id": 1 })));
        assert!(!is_rpc_shaped(&json!({ "jsonrpc": "2.0" })));
        assert!(!is_rpc_shaped(&json!({ "id": 1 })));
        assert!(!is_rpc_shaped(&json!({ "content": "x" })));
    }

    #[test]
    fn test_wrap_reply_rpc_echoes_version_and_id() {
        let payload = rpc_payload("hi");
        let reply = wrap_reply(&payload, "hello back");

        assert_eq!(reply["jsonrpc"], "2.0");
        assert_eq!(reply["id"], 7);
        let message = &reply["result"]["message"];
        assert_eq!(message["kind"], "message");
        assert_eq!(message["role"], "assistant");
        assert_eq!(message["parts"][0]["kind"], "text");
        assert_eq!(message["parts"][0]["text"], "hello back");
    }

    #[test]
    fn test_wrap_reply_plain_shape() {
        let reply = wrap_reply(&json!({ "content": "hi" }), "hello back");
        assert_eq!(reply, json!({ "status": "success", "response": "hello back" }));
    }

    #[test]
    fn test_envelope_choice_is_structural_not_intent() {
        // Same message text, different inbound shapes, different envelopes.
        let rpc = wrap_reply(&rpc_payload("list"), "msg");
        let plain = wrap_reply(&json!({ "content": "list" }), "msg");
        assert!(rpc.get("result").is_some());
        assert!(plain.get("status").is_some());
    }

    #[test]
    fn test_wrap_reply_preserves_string_id() {
        let payload = json!({ "jsonrpc": "2.0", "id": "abc-1", "content": "x" });
        let reply = wrap_reply(&payload, "m");
        assert_eq!(reply["id"], "abc-1");
    }
}
