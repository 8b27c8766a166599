//! WhatsApp webhook integration module
//!
//! This module provides webhook handling for WhatsApp Business API
//! integration: the HTTP route handlers plus the business logic for
//! processing incoming messages and status updates.
//!
//! ## Submodules
//!
//! - [`handler`] - Dispatcher and chat flows for webhook events
//! - [`routes`] - HTTP endpoint handlers (verification + signed receiver)
//! - [`schemas`] - Incoming webhook payload structures
//! - [`outgoing_schemas`] - Outgoing message payload structures
//! - [`client`] - WhatsApp API client for sending messages
//! - [`security`] - X-Hub-Signature-256 verification

pub mod client;
pub mod handler;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;
pub mod security;

// Re-export commonly used items for convenience
pub use routes::{receive, verify};
