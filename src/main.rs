//! # Ramp Bot
//!
//! Main entry point for the WhatsApp wallet/fiat-ramp bot. Configures
//! telemetry, the vendor API clients and the webhook web server.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod errors;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod webhook;

use anyhow::Context;
use ntex::web;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    config::init_config().await?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;

    logger::setup_simple_logger()?;

    // Initialize tracing export
    let shutdown_handler = logfire::configure()
        .install_panic_handler()
        .send_to_logfire(logfire::config::SendToLogfire::IfTokenPresent)
        .with_token(&app_config.logfire_token)
        .finish()?;

    // Vendor API clients; cheap to clone, one set per server worker
    let whatsapp_client = webhook::whatsapp::client::WhatsAppClient::new()?;
    let wallet_client = services::wallet::WalletApiClient::new()?;
    let ramp_client = services::ramp::RampApiClient::new()?;

    configure_and_run_server(whatsapp_client, wallet_client, ramp_client).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state from the provided vendor clients
fn create_app_state(
    whatsapp_client: webhook::whatsapp::client::WhatsAppClient,
    wallet_client: services::wallet::WalletApiClient,
    ramp_client: services::ramp::RampApiClient,
) -> webhook::AppState {
    webhook::AppState {
        whatsapp_client,
        wallet_service: Box::new(wallet_client),
        ramp_service: Box::new(ramp_client),
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    whatsapp_client: webhook::whatsapp::client::WhatsAppClient,
    wallet_client: services::wallet::WalletApiClient,
    ramp_client: services::ramp::RampApiClient,
) -> anyhow::Result<()> {
    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;
    let server_addr = (
        app_config.web_server_host.as_str(),
        u16::try_from(app_config.web_server_port).unwrap_or(8080),
    );

    let server = web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                whatsapp_client.clone(),
                wallet_client.clone(),
                ramp_client.clone(),
            ))
            .configure(webhook::routes::whatsapp)
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    tracing::info!(
        "listening on {}:{} (env: {})",
        app_config.web_server_host,
        app_config.web_server_port,
        app_config.env
    );

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
