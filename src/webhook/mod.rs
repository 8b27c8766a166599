//! Webhook handlers for external integrations
//!
//! This module contains webhook endpoint handlers for the external services
//! that integrate with the bot.
//!
//! ## Modules
//!
//! - [`whatsapp`] - WhatsApp Business API webhook handlers

pub mod routes;
pub mod whatsapp;

use crate::services;

/// Shared state handed to the webhook route handlers
pub struct AppState {
    pub whatsapp_client: whatsapp::client::WhatsAppClient,
    pub wallet_service: services::ImplWalletService,
    pub ramp_service: services::ImplRampService,
}
