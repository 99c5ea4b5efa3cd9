//! Convenience constructors for common response shapes

use serde_json::Value;

use super::card::{Attachment, CardPayload};
use super::response::Response;

/// Text shown by clients that cannot render adaptive cards.
pub const CARD_FALLBACK_TEXT: &str = "This bot requires a client which can render cards.";

/// Build a response carrying a single adaptive card attachment.
///
/// `text` and `markdown` are set to [`CARD_FALLBACK_TEXT`].
pub fn response_from_adaptive_card(card: &impl CardPayload) -> Response {
    let mut response = Response::new();
    response.set_text(CARD_FALLBACK_TEXT);
    response.set_markdown(CARD_FALLBACK_TEXT);
    response.add_attachment(Attachment::adaptive_card(card));

    tracing::debug!("Built adaptive card response");
    response
}

/// Build a response from explicit text and markdown bodies.
///
/// A non-empty `files` or `attachments` list is appended as one element, so
/// the resulting field holds a nested list (`[["a.png", "b.png"]]`).
pub fn response_custom_format(
    text: impl Into<String>,
    markdown: impl Into<String>,
    files: Option<Vec<String>>,
    attachments: Option<Vec<Value>>,
) -> Response {
    let mut response = Response::new();
    response.set_text(text);
    response.set_markdown(markdown);

    if let Some(files) = files.filter(|f| !f.is_empty()) {
        tracing::debug!(count = files.len(), "Appending files");
        response.add_file(files);
    }
    if let Some(attachments) = attachments.filter(|a| !a.is_empty()) {
        tracing::debug!(count = attachments.len(), "Appending attachments");
        response.add_attachment(attachments);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdaptiveCard;
    use serde_json::json;

    #[test]
    fn test_from_adaptive_card() {
        let card = AdaptiveCard::new().with_body_element(json!({"type": "TextBlock", "text": "hi"}));
        let response = response_from_adaptive_card(&card);

        assert_eq!(response.text(), Some(CARD_FALLBACK_TEXT));
        assert_eq!(response.markdown(), Some(CARD_FALLBACK_TEXT));
        assert_eq!(
            response.attachments(),
            &[json!({
                "contentType": "application/vnd.microsoft.card.adaptive",
                "content": card.to_dict()
            })]
        );
        assert!(response.files().is_empty());
    }

    #[test]
    fn test_from_raw_card_json() {
        let card = json!({"type": "AdaptiveCard", "version": "1.2", "body": []});
        let response = response_from_adaptive_card(&card);
        assert_eq!(response.as_dict()["attachments"][0]["content"], card);
    }

    #[test]
    fn test_custom_format_nests_files() {
        let response = response_custom_format("hi", "**hi**", Some(vec!["f1.png".to_string()]), None);
        let dict = response.as_dict();
        assert_eq!(dict["files"], json!([["f1.png"]]));
        assert_eq!(dict["text"], "hi");
        assert_eq!(dict["markdown"], "**hi**");
        assert!(!dict.contains_key("attachments"));
        assert_eq!(response.text(), Some("hi"));
    }

    #[test]
    fn test_custom_format_nests_attachments() {
        let attachments = vec![json!({"contentType": "a", "content": {}}), json!({"contentType": "b", "content": {}})];
        let response = response_custom_format("t", "m", None, Some(attachments.clone()));
        assert_eq!(response.attachments(), &[Value::Array(attachments)]);
    }

    #[test]
    fn test_custom_format_skips_empty_lists() {
        let response = response_custom_format("t", "m", Some(vec![]), Some(vec![]));
        assert!(response.files().is_empty());
        assert!(response.attachments().is_empty());
    }
}
