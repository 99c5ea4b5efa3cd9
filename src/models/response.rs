//! Outgoing message envelope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ResponseError;

const TEXT: &str = "text";
const ROOM_ID: &str = "roomId";
const PARENT_ID: &str = "parentId";
const MARKDOWN: &str = "markdown";
const HTML: &str = "html";
const FILES: &str = "files";
const ATTACHMENTS: &str = "attachments";

/// Message to be posted by a bot.
///
/// Backed by the attribute map that is sent on the wire. Scalar fields start
/// out null. `files` and `attachments` start empty and only ever grow: each
/// `add_*` call appends its argument as one element.
///
/// Two export views are available. [`Response::as_dict`] is the wire form
/// handed to the messages API and drops every falsy field.
/// [`Response::to_json`] renders the complete record, nulls included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response {
    attributes: Map<String, Value>,
}

/// Truthiness used by the wire view: null, false, zero and empty
/// strings/arrays/objects are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl Default for Response {
    fn default() -> Self {
        let mut attributes = Map::new();
        for key in [TEXT, ROOM_ID, PARENT_ID, MARKDOWN, HTML] {
            attributes.insert(key.into(), Value::Null);
        }
        attributes.insert(FILES.into(), Value::Array(Vec::new()));
        attributes.insert(ATTACHMENTS.into(), Value::Array(Vec::new()));
        Self { attributes }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a response around a pre-assembled attribute map.
    ///
    /// The map is kept as given: keys the accessors do not know about (for
    /// example `toPersonEmail`) and values of any JSON type are exported
    /// unchanged. Nothing is filled in, so the caller supplies every key it
    /// wants serialized. An empty map yields [`Response::new`].
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        if attributes.is_empty() {
            return Self::new();
        }
        tracing::debug!(keys = attributes.len(), "Building response from attributes");
        Self { attributes }
    }

    /// Raw value stored under `key`, whatever its type.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    fn set_field(&mut self, key: &str, value: String) {
        self.attributes.insert(key.into(), Value::String(value));
    }

    fn list_field(&self, key: &str) -> &[Value] {
        match self.attributes.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    fn push_to_list(&mut self, key: &str, value: Value) {
        let slot = self
            .attributes
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            if !slot.is_null() {
                tracing::warn!(field = key, "Replacing non-list value before appending");
            }
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(items) = slot {
            items.push(value);
        }
    }

    /// Plain-text body, if set to a string
    pub fn text(&self) -> Option<&str> {
        self.str_field(TEXT)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.set_field(TEXT, text.into());
    }

    pub fn markdown(&self) -> Option<&str> {
        self.str_field(MARKDOWN)
    }

    /// Set the markdown body. Clients that render markdown show this instead of `text`.
    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.set_field(MARKDOWN, markdown.into());
    }

    pub fn html(&self) -> Option<&str> {
        self.str_field(HTML)
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.set_field(HTML, html.into());
    }

    /// Destination room
    pub fn room_id(&self) -> Option<&str> {
        self.str_field(ROOM_ID)
    }

    pub fn set_room_id(&mut self, room_id: impl Into<String>) {
        self.set_field(ROOM_ID, room_id.into());
    }

    /// Message being replied to, for threaded replies
    pub fn parent_id(&self) -> Option<&str> {
        self.str_field(PARENT_ID)
    }

    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) {
        self.set_field(PARENT_ID, parent_id.into());
    }

    pub fn files(&self) -> &[Value] {
        self.list_field(FILES)
    }

    /// Append `file` as a single element. A list argument is nested, not flattened.
    pub fn add_file(&mut self, file: impl Into<Value>) {
        self.push_to_list(FILES, file.into());
    }

    pub fn attachments(&self) -> &[Value] {
        self.list_field(ATTACHMENTS)
    }

    /// Append `attachment` as a single element. A list argument is nested, not flattened.
    pub fn add_attachment(&mut self, attachment: impl Into<Value>) {
        self.push_to_list(ATTACHMENTS, attachment.into());
    }

    /// Wire form for the messages API: only fields holding a truthy value.
    pub fn as_dict(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Full record as JSON text, including null and empty fields.
    pub fn to_json(&self) -> Result<String, ResponseError> {
        let json = serde_json::to_string(&self.attributes).map_err(ResponseError::Serialize)?;
        tracing::trace!(bytes = json.len(), "Serialized response");
        Ok(json)
    }

    /// Like [`Response::to_json`], indented for logs and terminals.
    pub fn to_json_pretty(&self) -> Result<String, ResponseError> {
        serde_json::to_string_pretty(&self.attributes).map_err(ResponseError::Serialize)
    }
}
