//! Adaptive card models
//!
//! Cards are opaque to [`Response`](super::Response): all it needs is the
//! dictionary form produced by [`CardPayload::to_dict`]. [`AdaptiveCard`] is a
//! small builder for the common case; raw card JSON (for example designer
//! output loaded from disk) can be passed as a `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ResponseError;

/// MIME identifier Webex uses for adaptive card attachments.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

const CARD_TYPE: &str = "AdaptiveCard";
const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const DEFAULT_VERSION: &str = "1.1";

/// Anything that can export itself as an adaptive card dictionary.
pub trait CardPayload {
    fn to_dict(&self) -> Value;
}

impl CardPayload for Value {
    fn to_dict(&self) -> Value {
        self.clone()
    }
}

impl<T: CardPayload + ?Sized> CardPayload for &T {
    fn to_dict(&self) -> Value {
        (**self).to_dict()
    }
}

fn default_card_type() -> String {
    CARD_TYPE.to_string()
}

fn default_schema() -> String {
    CARD_SCHEMA.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Adaptive card with a free-form body and action list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveCard {
    #[serde(rename = "type", default = "default_card_type")]
    pub card_type: String,
    #[serde(rename = "$schema", default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub body: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Value>,
    /// Shown by clients that cannot render this card version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_text: Option<String>,
}

impl Default for AdaptiveCard {
    fn default() -> Self {
        Self {
            card_type: default_card_type(),
            schema: default_schema(),
            version: default_version(),
            body: Vec::new(),
            actions: Vec::new(),
            fallback_text: None,
        }
    }
}

impl AdaptiveCard {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_body_element(mut self, element: Value) -> Self {
        self.body.push(element);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Value) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn with_fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = Some(text.into());
        self
    }
}

impl CardPayload for AdaptiveCard {
    fn to_dict(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("type".into(), Value::String(self.card_type.clone()));
        dict.insert("$schema".into(), Value::String(self.schema.clone()));
        dict.insert("version".into(), Value::String(self.version.clone()));
        dict.insert("body".into(), Value::Array(self.body.clone()));
        if !self.actions.is_empty() {
            dict.insert("actions".into(), Value::Array(self.actions.clone()));
        }
        if let Some(ref text) = self.fallback_text {
            dict.insert("fallbackText".into(), Value::String(text.clone()));
        }
        Value::Object(dict)
    }
}

/// Parse raw card JSON without imposing the [`AdaptiveCard`] shape on it.
pub fn parse_card(json: &str) -> Result<Value, ResponseError> {
    serde_json::from_str(json).map_err(ResponseError::InvalidCard)
}

/// Attachment descriptor carried in a response's `attachments` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: Value,
}

impl Attachment {
    /// Wrap a card in the adaptive card attachment envelope.
    pub fn adaptive_card(card: &impl CardPayload) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content: card.to_dict(),
        }
    }
}

impl From<Attachment> for Value {
    fn from(attachment: Attachment) -> Self {
        let mut dict = Map::new();
        dict.insert("contentType".into(), Value::String(attachment.content_type));
        dict.insert("content".into(), attachment.content);
        Value::Object(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_card_dict() {
        let dict = AdaptiveCard::new().to_dict();
        assert_eq!(dict["type"], "AdaptiveCard");
        assert_eq!(dict["version"], "1.1");
        assert_eq!(dict["$schema"], CARD_SCHEMA);
        assert_eq!(dict["body"], json!([]));
        assert!(dict.get("actions").is_none());
        assert!(dict.get("fallbackText").is_none());
    }

    #[test]
    fn test_builder_populates_dict() {
        let card = AdaptiveCard::new()
            .with_version("1.3")
            .with_body_element(json!({"type": "TextBlock", "text": "Deploy finished"}))
            .with_action(json!({"type": "Action.Submit", "title": "Ack"}))
            .with_fallback_text("Deploy finished");

        let dict = card.to_dict();
        assert_eq!(dict["version"], "1.3");
        assert_eq!(dict["body"][0]["text"], "Deploy finished");
        assert_eq!(dict["actions"][0]["title"], "Ack");
        assert_eq!(dict["fallbackText"], "Deploy finished");
    }

    #[test]
    fn test_to_dict_matches_serde_form() {
        let card = AdaptiveCard::new()
            .with_body_element(json!({"type": "TextBlock", "text": "hi"}))
            .with_fallback_text("hi");
        assert_eq!(card.to_dict(), serde_json::to_value(&card).unwrap());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let card: AdaptiveCard =
            serde_json::from_str(r#"{"body": [{"type": "TextBlock", "text": "x"}]}"#).unwrap();
        assert_eq!(card.card_type, "AdaptiveCard");
        assert_eq!(card.version, "1.1");
        assert_eq!(card.body.len(), 1);
    }

    #[test]
    fn test_parse_card_rejects_garbage() {
        let err = parse_card("not json").unwrap_err();
        assert!(matches!(err, ResponseError::InvalidCard(_)));
    }

    #[test]
    fn test_value_card_is_passed_through() {
        let raw = parse_card(r#"{"type": "AdaptiveCard", "custom": 7}"#).unwrap();
        assert_eq!(raw.to_dict(), json!({"type": "AdaptiveCard", "custom": 7}));
    }

    #[test]
    fn test_attachment_envelope() {
        let card = json!({"type": "AdaptiveCard"});
        let value: Value = Attachment::adaptive_card(&card).into();
        assert_eq!(
            value,
            json!({
                "contentType": "application/vnd.microsoft.card.adaptive",
                "content": {"type": "AdaptiveCard"}
            })
        );
    }
}
