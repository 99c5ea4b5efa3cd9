//! Outgoing message envelope for Webex bots
//!
//! A [`Response`](models::Response) collects the text, markdown, HTML, files and
//! card attachments of a message before it is posted to the messages API.

pub mod config;
pub mod error;
pub mod models;

pub use error::ResponseError;
pub use models::{response_custom_format, response_from_adaptive_card, Response};
