//! # WhatsApp Outgoing Message Schemas
//!
//! This module contains data structures for sending messages to WhatsApp
//! Business API: plain text, interactive list and interactive reply-button
//! payloads.

use serde::{Deserialize, Serialize};

/// Text message to send to WhatsApp
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingTextMessage {
    /// Messaging product, always "whatsapp"
    pub messaging_product: String,
    /// Recipient's WhatsApp ID (phone number)
    pub to: String,
    /// Message type
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Text content
    pub text: OutgoingTextContent,
}

impl OutgoingTextMessage {
    /// Creates a new text message
    pub fn new(to: String, body: String) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to,
            msg_type: "text".to_string(),
            text: OutgoingTextContent { body },
        }
    }
}

/// Text content for outgoing messages
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingTextContent {
    /// Message body text
    pub body: String,
}

/// Interactive message (list or reply buttons) to send to WhatsApp
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingInteractiveMessage {
    /// Messaging product, always "whatsapp"
    pub messaging_product: String,
    /// Recipient's WhatsApp ID (phone number)
    pub to: String,
    /// Message type, "interactive"
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Interactive content
    pub interactive: InteractiveContent,
}

impl OutgoingInteractiveMessage {
    /// Creates a new interactive list message
    pub fn new_list(
        to: String,
        header: String,
        body: String,
        button_text: String,
        rows: Vec<InteractiveRow>,
    ) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to,
            msg_type: "interactive".to_string(),
            interactive: InteractiveContent {
                interactive_type: "list".to_string(),
                header: Some(InteractiveHeader {
                    header_type: "text".to_string(),
                    text: header,
                }),
                body: InteractiveBody { text: body },
                action: InteractiveAction {
                    button: Some(button_text),
                    sections: Some(vec![InteractiveSection { title: None, rows }]),
                    buttons: None,
                },
            },
        }
    }

    /// Creates a new reply-button message (at most three buttons)
    pub fn new_buttons(to: String, body: String, buttons: Vec<InteractiveButton>) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to,
            msg_type: "interactive".to_string(),
            interactive: InteractiveContent {
                interactive_type: "button".to_string(),
                header: None,
                body: InteractiveBody { text: body },
                action: InteractiveAction {
                    button: None,
                    sections: None,
                    buttons: Some(buttons),
                },
            },
        }
    }
}

/// Interactive content structure
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveContent {
    /// Type of interactive message ("list" or "button")
    #[serde(rename = "type")]
    pub interactive_type: String,
    /// Optional header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<InteractiveHeader>,
    /// Body text
    pub body: InteractiveBody,
    /// Action (list button + sections, or reply buttons)
    pub action: InteractiveAction,
}

/// Interactive message header
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveHeader {
    /// Header type (e.g., "text")
    #[serde(rename = "type")]
    pub header_type: String,
    /// Header text
    pub text: String,
}

/// Interactive message body
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveBody {
    /// Body text
    pub text: String,
}

/// Interactive action; list messages use `button` + `sections`, reply-button
/// messages use `buttons`
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveAction {
    /// List-opener button text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    /// List sections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<InteractiveSection>>,
    /// Reply buttons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<InteractiveButton>>,
}

/// Interactive section containing rows
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveSection {
    /// Optional section title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// List of rows in the section
    pub rows: Vec<InteractiveRow>,
}

/// Interactive row (list item)
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveRow {
    /// Unique row ID
    pub id: String,
    /// Row title (displayed to user)
    pub title: String,
    /// Optional row description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InteractiveRow {
    /// Creates a new interactive row
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            description: None,
        }
    }

    /// Creates a new interactive row with description
    pub fn new_with_description(id: String, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description: Some(description),
        }
    }
}

/// A single reply button
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveButton {
    /// Button type, always "reply"
    #[serde(rename = "type")]
    pub button_type: String,
    /// Reply payload
    pub reply: InteractiveButtonReply,
}

impl InteractiveButton {
    /// Creates a new reply button
    pub fn new(id: String, title: String) -> Self {
        Self {
            button_type: "reply".to_string(),
            reply: InteractiveButtonReply { id, title },
        }
    }
}

/// Reply button payload
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractiveButtonReply {
    /// Button ID returned in the button_reply webhook
    pub id: String,
    /// Button label (displayed to user)
    pub title: String,
}

/// Response from WhatsApp API when sending a message
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppMessageResponse {
    /// Messaging product
    pub messaging_product: String,
    /// Array of contacts (recipients)
    pub contacts: Vec<WhatsAppContact>,
    /// Array of messages sent
    pub messages: Vec<WhatsAppMessageStatus>,
}

/// Contact information in response
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppContact {
    /// WhatsApp ID of the contact
    pub wa_id: String,
    /// Input phone number
    pub input: String,
}

/// Message status in response
#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppMessageStatus {
    /// Message ID
    pub id: String,
}
