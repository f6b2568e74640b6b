use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// Follow-up action attached to a rule, run after its response is
/// delivered.
///
/// Handlers are data-only command descriptors rather than captured
/// closures, so they can be persisted as text and reconstructed without
/// deserializing executable code. The core stores and returns them; it
/// never invokes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Handler {
    /// Send a plain text message.
    SendText { text: String },

    /// Send a structured payload (attachment, quick replies, ...).
    SendPayload { payload: serde_json::Value },

    /// Pause before the next action.
    Wait { seconds: u64 },

    /// Notify an out-of-band channel.
    Notify { channel: String, message: String },
}

/// Encodes handler descriptors to storable text and back.
pub trait HandlerCodec: Send + Sync {
    fn encode(&self, handler: &Handler) -> Result<String>;
    fn decode(&self, text: &str) -> Result<Handler>;
}

/// Default codec, JSON text via serde.
#[derive(Debug, Clone, Default)]
pub struct JsonHandlerCodec;

impl HandlerCodec for JsonHandlerCodec {
    fn encode(&self, handler: &Handler) -> Result<String> {
        serde_json::to_string(handler)
            .map_err(|e| RuleError::Codec(e.to_string()))
    }

    fn decode(&self, text: &str) -> Result<Handler> {
        serde_json::from_str(text)
            .map_err(|e| RuleError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handler_tagged_encoding() {
        let codec = JsonHandlerCodec;
        let text = codec
            .encode(&Handler::SendText { text: "thanks!".to_string() })
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "send_text");
        assert_eq!(value["text"], "thanks!");
    }

    #[test]
    fn test_codec_round_trip() {
        let codec = JsonHandlerCodec;
        let handler = Handler::Notify {
            channel: "ops".to_string(),
            message: "new order".to_string(),
        };

        let text = codec.encode(&handler).unwrap();
        assert_eq!(codec.decode(&text).unwrap(), handler);
    }

    #[test]
    fn test_decode_rejects_unknown_kind() {
        let codec = JsonHandlerCodec;
        let err = codec
            .decode(&json!({"type": "exec", "cmd": "rm"}).to_string())
            .unwrap_err();
        assert!(matches!(err, RuleError::Codec(_)));
    }
}
