//! WhatsApp webhook endpoint handlers
//!
//! This module handles incoming webhook requests from WhatsApp Business API.
//! It implements both the verification endpoint (GET) and the webhook
//! receiver (POST).
//!
//! # Security
//!
//! The POST endpoint verifies webhook authenticity through the
//! `X-Hub-Signature-256` header: Meta signs the raw body with HMAC-SHA256
//! using the app secret. Requests failing verification are rejected before
//! any parsing.

use super::{handler, schemas, security};
use crate::{config, errors, webhook::AppState};
use ntex::{util::Bytes, web};
use serde::Deserialize;

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: String,
    /// The verification token from WhatsApp
    #[serde(rename = "hub.verify_token")]
    pub verify_token: String,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: String,
}

/// Webhook verification endpoint (GET)
///
/// WhatsApp sends a GET request to verify the webhook URL.
/// This endpoint validates the verify token and returns the challenge.
///
/// # Query Parameters
/// - `hub.mode` - Should be "subscribe"
/// - `hub.verify_token` - Token configured in the WhatsApp dashboard
/// - `hub.challenge` - Challenge string to echo back
#[web::get("")]
pub async fn verify(
    query: web::types::Query<VerifyQuery>,
) -> Result<impl web::Responder, web::Error> {
    if query.mode != "subscribe" {
        return Err(errors::UserError::Unauthorized.into());
    }

    let app_config = config::APP_CONFIG
        .get()
        .expect("APP_CONFIG should be initialized before starting web server");

    if query.verify_token != app_config.whatsapp_verify_token {
        return Err(errors::UserError::Unauthorized.into());
    }

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(query.challenge.clone()))
}

/// Webhook receiver endpoint (POST)
///
/// Receives webhook events from WhatsApp Business API.
///
/// # Processing
///
/// After signature verification the payload is parsed and acknowledged with
/// 200 immediately; the actual message handling runs on a spawned background
/// task, so slow vendor calls never push the response past WhatsApp's
/// delivery timeout.
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let app_config = config::APP_CONFIG
        .get()
        .expect("APP_CONFIG should be initialized before starting web server");

    let signature = req
        .headers()
        .get("X-Hub-Signature-256")
        .and_then(|header_value| header_value.to_str().ok())
        .unwrap_or_default();

    if !security::verify_signature(signature, &body, &app_config.whatsapp_app_secret) {
        logfire::warn!("Rejected webhook with missing or invalid signature");
        return Err(errors::UserError::Unauthorized.into());
    }

    // Parse the JSON payload after signature verification
    let payload: schemas::WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            logfire::error!(
                "Failed to parse webhook payload: {error}",
                error = e.to_string()
            );
            return Err(errors::UserError::InvalidPayload(e.to_string()).into());
        }
    };

    // Acknowledge now, process in the background
    let state = app_state.clone();
    ntex::rt::spawn(async move {
        if let Err(e) = handler::process_webhook(
            payload,
            &state.whatsapp_client,
            &state.wallet_service,
            &state.ramp_service,
        )
        .await
        {
            logfire::error!("Failed to process webhook: {error}", error = e.to_string());
        }
    });

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "received"
    })))
}
