//! # WhatsApp Webhook Schemas
//!
//! This module contains all data structures for WhatsApp Business API
//! webhooks. These schemas define the JSON payload structure sent by WhatsApp
//! when webhook events occur (incoming messages, status updates, etc.).

use serde::{Deserialize, Serialize};

/// Root webhook payload from WhatsApp
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, typically "whatsapp_business_account"
    pub object: String,
    /// Array of entry objects containing the actual data
    pub entry: Vec<Entry>,
}

/// Entry object containing changes and metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct Entry {
    /// Business Account ID
    pub id: String,
    /// Array of changes that occurred
    pub changes: Vec<Change>,
}

/// Change object containing the actual webhook data
#[derive(Debug, Deserialize, Serialize)]
pub struct Change {
    /// The field that changed (e.g., "messages")
    pub field: String,
    /// The value containing the actual data
    pub value: Value,
}

/// Value object containing messages and metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct Value {
    /// Messaging product (e.g., "whatsapp")
    pub messaging_product: String,
    /// Metadata about the phone number
    pub metadata: Metadata,
    /// Array of contacts (senders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    /// Array of messages received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    /// Array of statuses (for sent messages)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<Status>>,
}

/// Metadata about the WhatsApp Business phone number
#[derive(Debug, Deserialize, Serialize)]
pub struct Metadata {
    /// Display name of the business phone number
    pub display_phone_number: String,
    /// Phone number ID
    pub phone_number_id: String,
}

/// Contact information for the message sender
#[derive(Debug, Deserialize, Serialize)]
pub struct Contact {
    /// Profile information
    pub profile: Profile,
    /// WhatsApp ID (phone number)
    pub wa_id: String,
}

/// Profile information
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Display name of the contact
    pub name: String,
}

/// Message object
#[derive(Debug, Deserialize, Serialize)]
pub struct Message {
    /// Sender's WhatsApp ID (phone number)
    pub from: String,
    /// Message ID
    pub id: String,
    /// Timestamp of the message
    pub timestamp: String,
    /// Message type (text, interactive, image, etc.)
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Text message content (if type is "text")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextMessage>,
    /// Interactive reply content (if type is "interactive")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<InteractiveReply>,
    /// Context (if this is a reply to another message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

/// Text message content
#[derive(Debug, Deserialize, Serialize)]
pub struct TextMessage {
    /// The text body of the message
    pub body: String,
}

/// Interactive reply content; exactly one of the reply variants is present,
/// discriminated by `type`
#[derive(Debug, Deserialize, Serialize)]
pub struct InteractiveReply {
    /// Reply sub-type: "button_reply" or "list_reply"
    #[serde(rename = "type")]
    pub reply_type: String,
    /// Tapped reply button (if type is "button_reply")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_reply: Option<ReplyItem>,
    /// Selected list row (if type is "list_reply")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_reply: Option<ReplyItem>,
}

/// The button or row the user selected
#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyItem {
    /// Identifier assigned when the interactive message was sent
    pub id: String,
    /// Title shown to the user
    pub title: String,
    /// Row description (list replies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Context for reply messages
#[derive(Debug, Deserialize, Serialize)]
pub struct Context {
    /// ID of the message being replied to
    pub from: String,
    /// Message ID being referenced
    pub id: String,
}

/// Status update for sent messages
#[derive(Debug, Deserialize, Serialize)]
pub struct Status {
    /// Message ID
    pub id: String,
    /// Status (sent, delivered, read, failed)
    pub status: String,
    /// Timestamp
    pub timestamp: String,
    /// Recipient ID
    pub recipient_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_deserialization() {
        let json = r#"{
            "from": "254700000001",
            "id": "wamid.1",
            "timestamp": "1234567890",
            "type": "text",
            "text": {"body": "buy 100 KES"}
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.msg_type, "text");
        assert_eq!(message.text.unwrap().body, "buy 100 KES");
        assert!(message.interactive.is_none());
    }

    #[test]
    fn test_button_reply_deserialization() {
        let json = r#"{
            "from": "254700000001",
            "id": "wamid.2",
            "timestamp": "1234567890",
            "type": "interactive",
            "interactive": {
                "type": "button_reply",
                "button_reply": {"id": "create-wallet", "title": "Create wallet"}
            }
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        let interactive = message.interactive.unwrap();
        assert_eq!(interactive.reply_type, "button_reply");
        assert_eq!(interactive.button_reply.unwrap().id, "create-wallet");
        assert!(interactive.list_reply.is_none());
    }

    #[test]
    fn test_list_reply_deserialization() {
        let json = r#"{
            "from": "254700000001",
            "id": "wamid.3",
            "timestamp": "1234567890",
            "type": "interactive",
            "interactive": {
                "type": "list_reply",
                "list_reply": {
                    "id": "onramp:KES:100:ch_1",
                    "title": "M-PESA",
                    "description": "mobile money"
                }
            }
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        let interactive = message.interactive.unwrap();
        assert_eq!(interactive.reply_type, "list_reply");

        let row = interactive.list_reply.unwrap();
        assert_eq!(row.id, "onramp:KES:100:ch_1");
        assert_eq!(row.description.as_deref(), Some("mobile money"));
    }
}
