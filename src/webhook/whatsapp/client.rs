//! # WhatsApp API Client
//!
//! This module provides a client for sending messages to WhatsApp Business
//! API. It handles authentication and message sending for text and
//! interactive (list / reply-button) messages.

use super::outgoing_schemas::{
    InteractiveButton, InteractiveRow, OutgoingInteractiveMessage, OutgoingTextMessage,
    WhatsAppMessageResponse,
};
use crate::{config, utils};
use anyhow::{Context, Result};

/// WhatsApp API client for sending messages
#[derive(Clone)]
pub struct WhatsAppClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// WhatsApp Business API endpoint for sending messages
    endpoint: String,
    /// Authentication token
    auth_token: String,
}

impl WhatsAppClient {
    /// Creates a new WhatsApp client
    pub fn new() -> Result<Self> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;

        Ok(Self {
            client: utils::REQUEST_CLIENT.clone(),
            endpoint: app_config.whatsapp_send_msg_endpoint(),
            auth_token: app_config.whatsapp_business_auth.clone(),
        })
    }

    /// Sends a text message
    ///
    /// # Arguments
    /// * `to` - Recipient's WhatsApp ID (phone number with country code)
    /// * `body` - Message text
    pub async fn send_text_message(
        &self,
        to: String,
        body: String,
    ) -> Result<WhatsAppMessageResponse> {
        let message = OutgoingTextMessage::new(to, body);
        self.send_message(&message).await
    }

    /// Sends an interactive list message
    pub async fn send_list_message(
        &self,
        to: String,
        header: String,
        body: String,
        button_text: String,
        rows: Vec<InteractiveRow>,
    ) -> Result<WhatsAppMessageResponse> {
        let message = OutgoingInteractiveMessage::new_list(to, header, body, button_text, rows);
        self.send_message(&message).await
    }

    /// Sends a reply-button message (at most three buttons)
    pub async fn send_button_message(
        &self,
        to: String,
        body: String,
        buttons: Vec<InteractiveButton>,
    ) -> Result<WhatsAppMessageResponse> {
        let message = OutgoingInteractiveMessage::new_buttons(to, body, buttons);
        self.send_message(&message).await
    }

    /// Internal method to send any message type to WhatsApp API
    async fn send_message<T: serde::Serialize>(
        &self,
        message: &T,
    ) -> Result<WhatsAppMessageResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Content-Type", "application/json")
            .json(message)
            .send()
            .await
            .context("Failed to send request to WhatsApp API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("WhatsApp API returned error status {}: {}", status, body);
        }

        let whatsapp_response: WhatsAppMessageResponse = response
            .json()
            .await
            .context("Failed to parse WhatsApp API response")?;

        Ok(whatsapp_response)
    }
}
