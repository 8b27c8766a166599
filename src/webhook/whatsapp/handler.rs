//! # WhatsApp Webhook Handler
//!
//! This module handles incoming webhook events from WhatsApp Business API:
//! envelope extraction, message-type dispatch and the wallet/ramp chat flows.
//!
//! Every message is handled statelessly from the current payload. Multi-step
//! flows encode their context (currency, amount, channel or beneficiary id)
//! in the interactive row id the user taps.

use super::{
    client::WhatsAppClient,
    outgoing_schemas::{InteractiveButton, InteractiveRow},
    schemas::{Message, Status, WebhookPayload},
};
use crate::{api, consts, models, services, utils};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

const USAGE_BUY: &str = "To buy crypto, send: buy <amount> <currency>\nExample: buy 1000 KES";
const USAGE_SELL: &str = "To sell crypto, send: sell <amount> <currency>\nExample: sell 1000 KES";
const USAGE_FEES: &str = "To see fees, send: fees <currency>\nExample: fees KES";
const USAGE_ADD_BENEFICIARY: &str =
    "To save a payout account, send: add beneficiary <currency> <network> <account> <name>\nExample: add beneficiary KES mpesa 0712345678 Jane Doe";

/// A decoded interactive list-row id.
///
/// Row ids are colon-separated: the action tag first, then the context the
/// continuation needs.
#[derive(Debug, PartialEq, Eq)]
enum RowAction {
    Onramp {
        currency: String,
        amount: Decimal,
        channel_id: String,
    },
    Offramp {
        currency: String,
        amount: Decimal,
        beneficiary_id: String,
    },
    DeleteBeneficiary {
        beneficiary_id: String,
    },
}

fn parse_row_id(row_id: &str) -> Option<RowAction> {
    let parts: Vec<&str> = row_id.split(':').collect();

    match parts.as_slice() {
        [action, currency, amount, channel_id] if *action == consts::ACTION_ONRAMP => {
            Some(RowAction::Onramp {
                currency: currency.to_string(),
                amount: Decimal::from_str(amount).ok()?,
                channel_id: channel_id.to_string(),
            })
        }
        [action, currency, amount, beneficiary_id] if *action == consts::ACTION_OFFRAMP => {
            Some(RowAction::Offramp {
                currency: currency.to_string(),
                amount: Decimal::from_str(amount).ok()?,
                beneficiary_id: beneficiary_id.to_string(),
            })
        }
        [action, beneficiary_id] if *action == consts::ACTION_DELETE_BENEFICIARY => {
            Some(RowAction::DeleteBeneficiary {
                beneficiary_id: beneficiary_id.to_string(),
            })
        }
        _ => None,
    }
}

/// Extracts all messages from the webhook payload.
///
/// Messages are filtered to "messages" field changes; a malformed or empty
/// envelope yields an empty result.
pub fn process_webhook_messages(payload: &WebhookPayload) -> Vec<&Message> {
    payload
        .entry
        .iter()
        .flat_map(|entry| &entry.changes)
        .filter(|change| change.field == "messages")
        .filter_map(|change| change.value.messages.as_ref())
        .flatten()
        .collect::<Vec<_>>()
}

/// Extracts all delivery-status updates from the webhook payload
pub fn process_webhook_statuses(payload: &WebhookPayload) -> Vec<&Status> {
    payload
        .entry
        .iter()
        .flat_map(|entry| &entry.changes)
        .filter(|change| change.field == "messages")
        .filter_map(|change| change.value.statuses.as_ref())
        .flatten()
        .collect::<Vec<_>>()
}

/// Sends the main menu, or the welcome prompt when the sender has no wallet
/// yet
async fn send_main_menu(
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    to: &str,
) -> Result<()> {
    let wallet = api::wallet::get_user_wallet(wallet_service, to).await?;

    if wallet.is_none() {
        client
            .send_button_message(
                to.to_string(),
                "Welcome! You don't have a wallet yet. Create one to buy, hold and sell crypto from this chat.".to_string(),
                vec![InteractiveButton::new(
                    consts::BTN_CREATE_WALLET.to_string(),
                    "Create wallet".to_string(),
                )],
            )
            .await?;
        return Ok(());
    }

    let rows = vec![
        InteractiveRow::new(consts::BTN_CHECK_BALANCE.to_string(), "Balances".to_string()),
        InteractiveRow::new(consts::BTN_VIEW_RATES.to_string(), "Rates".to_string()),
        InteractiveRow::new_with_description(
            consts::BTN_BUY_CRYPTO.to_string(),
            "Buy crypto".to_string(),
            "fiat in, crypto to your wallet".to_string(),
        ),
        InteractiveRow::new_with_description(
            consts::BTN_SELL_CRYPTO.to_string(),
            "Sell crypto".to_string(),
            "crypto out, fiat to your account".to_string(),
        ),
        InteractiveRow::new(
            consts::BTN_BENEFICIARIES.to_string(),
            "Payout accounts".to_string(),
        ),
    ];

    client
        .send_list_message(
            to.to_string(),
            "Wallet menu".to_string(),
            "What would you like to do?".to_string(),
            "options".to_string(),
            rows,
        )
        .await?;

    Ok(())
}

fn onramp_rows(
    currency: &str,
    amount: Decimal,
    channels: &[models::ramp::Channel],
    rate: Option<&models::ramp::Rate>,
) -> Vec<InteractiveRow> {
    let rate_text = rate.map(|rate| format!("rate {} per USD", rate.buy));

    channels
        .iter()
        .take(consts::WHATSAPP_LIST_MAX_ROWS)
        .map(|channel| {
            let row_id = format!(
                "{}:{}:{}:{}",
                consts::ACTION_ONRAMP,
                currency,
                amount,
                channel.id
            );
            let title = format!("{} ({})", channel.channel_type, channel.country);
            match &rate_text {
                Some(description) => {
                    InteractiveRow::new_with_description(row_id, title, description.clone())
                }
                None => InteractiveRow::new(row_id, title),
            }
        })
        .collect()
}

/// Starts the onramp flow: the user picks a payment channel from a list whose
/// row ids carry the amount and currency forward
async fn start_onramp_flow(
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
    to: &str,
    amount_raw: &str,
    currency_raw: &str,
) -> Result<()> {
    let (Some(amount), Some(currency)) = (
        utils::parse_fiat_amount(amount_raw),
        utils::parse_currency_code(currency_raw),
    ) else {
        client.send_text_message(to.to_string(), USAGE_BUY.to_string()).await?;
        return Ok(());
    };

    let Some(wallet) = api::wallet::get_user_wallet(wallet_service, to).await? else {
        send_main_menu(client, wallet_service, to).await?;
        return Ok(());
    };

    if !wallet.is_active() {
        client
            .send_text_message(
                to.to_string(),
                format!(
                    "Your wallet is {status}; buying is paused until it is active.",
                    status = wallet.status
                ),
            )
            .await?;
        return Ok(());
    }

    let (channels, rate) = api::ramp::fetch_onramp_options(ramp_service, &currency).await?;

    if channels.is_empty() {
        client
            .send_text_message(
                to.to_string(),
                format!("No payment channels are available for {} right now.", currency),
            )
            .await?;
        return Ok(());
    }

    let rows = onramp_rows(&currency, amount, &channels, rate.as_ref());
    client
        .send_list_message(
            to.to_string(),
            format!("Buy {} {}", amount, currency),
            "Choose how to pay:".to_string(),
            "channels".to_string(),
            rows,
        )
        .await?;

    Ok(())
}

/// Starts the offramp flow: the user picks one of their saved beneficiaries
async fn start_offramp_flow(
    client: &WhatsAppClient,
    ramp_service: &services::ImplRampService,
    to: &str,
    amount_raw: &str,
    currency_raw: &str,
) -> Result<()> {
    let (Some(amount), Some(currency)) = (
        utils::parse_fiat_amount(amount_raw),
        utils::parse_currency_code(currency_raw),
    ) else {
        client.send_text_message(to.to_string(), USAGE_SELL.to_string()).await?;
        return Ok(());
    };

    let beneficiaries = ramp_service.get_beneficiaries(to).await?;

    if beneficiaries.is_empty() {
        client
            .send_text_message(
                to.to_string(),
                format!("You have no saved payout accounts.\n{}", USAGE_ADD_BENEFICIARY),
            )
            .await?;
        return Ok(());
    }

    let rows = beneficiaries
        .iter()
        .take(consts::WHATSAPP_LIST_MAX_ROWS)
        .map(|beneficiary| {
            InteractiveRow::new_with_description(
                format!(
                    "{}:{}:{}:{}",
                    consts::ACTION_OFFRAMP,
                    currency,
                    amount,
                    beneficiary.id
                ),
                beneficiary.name.clone(),
                format!("{} {}", beneficiary.network_code, beneficiary.account_number),
            )
        })
        .collect();

    client
        .send_list_message(
            to.to_string(),
            format!("Sell for {} {}", amount, currency),
            "Choose the payout account:".to_string(),
            "accounts".to_string(),
            rows,
        )
        .await?;

    Ok(())
}

async fn handle_add_beneficiary(
    client: &WhatsAppClient,
    ramp_service: &services::ImplRampService,
    to: &str,
    body: &str,
) -> Result<()> {
    let Some(command) = api::ramp::parse_add_beneficiary(body) else {
        client
            .send_text_message(to.to_string(), USAGE_ADD_BENEFICIARY.to_string())
            .await?;
        return Ok(());
    };

    match api::ramp::add_beneficiary(ramp_service, to, command).await? {
        api::ramp::AddBeneficiaryOutcome::Created(beneficiary) => {
            client
                .send_text_message(
                    to.to_string(),
                    format!(
                        "Saved payout account: {} ({} {}).",
                        beneficiary.name, beneficiary.network_code, beneficiary.account_number
                    ),
                )
                .await?;
        }
        api::ramp::AddBeneficiaryOutcome::UnknownNetwork(networks) => {
            let options = networks
                .iter()
                .map(|network| network.code.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            client
                .send_text_message(
                    to.to_string(),
                    format!("Unknown network. Available networks: {}", options),
                )
                .await?;
        }
    }

    Ok(())
}

/// Routes free-text commands; anything unrecognized shows the menu
async fn handle_text_command(
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
    to: &str,
    body: &str,
) -> Result<()> {
    let tokens: Vec<&str> = body.split_whitespace().collect();

    match tokens.as_slice() {
        [command, amount, currency] if command.eq_ignore_ascii_case("buy") => {
            start_onramp_flow(client, wallet_service, ramp_service, to, amount, currency).await
        }
        [command, amount, currency] if command.eq_ignore_ascii_case("sell") => {
            start_offramp_flow(client, ramp_service, to, amount, currency).await
        }
        [command, transaction_id] if command.eq_ignore_ascii_case("status") => {
            let text = api::ramp::transaction_status_text(ramp_service, transaction_id).await?;
            client.send_text_message(to.to_string(), text).await?;
            Ok(())
        }
        [command, currency] if command.eq_ignore_ascii_case("fees") => {
            let Some(currency) = utils::parse_currency_code(currency) else {
                client
                    .send_text_message(to.to_string(), USAGE_FEES.to_string())
                    .await?;
                return Ok(());
            };

            let text = api::ramp::fees_summary(ramp_service, &currency).await?;
            client.send_text_message(to.to_string(), text).await?;
            Ok(())
        }
        [command, ..] if command.eq_ignore_ascii_case("add") => {
            handle_add_beneficiary(client, ramp_service, to, body).await
        }
        _ => send_main_menu(client, wallet_service, to).await,
    }
}

/// Handles taps on reply buttons; ids outside the recognized set are logged
/// and ignored
async fn handle_button_reply(
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
    to: &str,
    button_id: &str,
) -> Result<()> {
    match button_id {
        consts::BTN_CREATE_WALLET => {
            if let Some(wallet) = api::wallet::get_user_wallet(wallet_service, to).await? {
                client
                    .send_text_message(
                        to.to_string(),
                        format!("You already have a wallet ({}).", wallet.id),
                    )
                    .await?;
                return Ok(());
            }

            let wallet = wallet_service.create_wallet(to).await?;
            client
                .send_text_message(to.to_string(), api::wallet::wallet_created_text(&wallet))
                .await?;
        }
        consts::BTN_CHECK_BALANCE => {
            match api::wallet::get_user_wallet(wallet_service, to).await? {
                Some(wallet) => {
                    let summary = api::wallet::balance_summary(wallet_service, &wallet).await?;
                    client.send_text_message(to.to_string(), summary).await?;
                }
                None => send_main_menu(client, wallet_service, to).await?,
            }
        }
        consts::BTN_VIEW_RATES => {
            let summary = api::ramp::rates_summary(ramp_service).await?;
            client.send_text_message(to.to_string(), summary).await?;
        }
        consts::BTN_BUY_CRYPTO => {
            client
                .send_text_message(to.to_string(), USAGE_BUY.to_string())
                .await?;
        }
        consts::BTN_SELL_CRYPTO => {
            client
                .send_text_message(to.to_string(), USAGE_SELL.to_string())
                .await?;
        }
        consts::BTN_BENEFICIARIES => {
            let beneficiaries = ramp_service.get_beneficiaries(to).await?;

            if beneficiaries.is_empty() {
                client
                    .send_text_message(
                        to.to_string(),
                        format!("No saved payout accounts.\n{}", USAGE_ADD_BENEFICIARY),
                    )
                    .await?;
                return Ok(());
            }

            let rows = beneficiaries
                .iter()
                .take(consts::WHATSAPP_LIST_MAX_ROWS)
                .map(|beneficiary| {
                    InteractiveRow::new_with_description(
                        format!("{}:{}", consts::ACTION_DELETE_BENEFICIARY, beneficiary.id),
                        beneficiary.name.clone(),
                        format!(
                            "{} {} (tap to delete)",
                            beneficiary.network_code, beneficiary.account_number
                        ),
                    )
                })
                .collect();

            client
                .send_list_message(
                    to.to_string(),
                    "Payout accounts".to_string(),
                    "Your saved payout accounts:".to_string(),
                    "accounts".to_string(),
                    rows,
                )
                .await?;
        }
        _ => {
            logfire::warn!(
                "Unknown button id in interactive response: {id}",
                id = button_id.to_string()
            );
        }
    }

    Ok(())
}

/// Handles list-row selections; the row id carries the flow context
async fn handle_list_reply(
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
    to: &str,
    row_id: &str,
) -> Result<()> {
    let Some(action) = parse_row_id(row_id) else {
        logfire::warn!(
            "Invalid interactive response ID format: {id}",
            id = row_id.to_string()
        );
        return Ok(());
    };

    match action {
        RowAction::Onramp {
            currency,
            amount,
            channel_id,
        } => {
            let wallet = api::wallet::get_user_wallet(wallet_service, to)
                .await?
                .context("onramp selected but sender has no wallet")?;
            let wallet_address = wallet
                .asset_address(consts::SETTLEMENT_ASSET)
                .with_context(|| {
                    format!("wallet {} has no {} address", wallet.id, consts::SETTLEMENT_ASSET)
                })?;

            let (quote, tx) =
                api::ramp::execute_onramp(ramp_service, &currency, amount, &channel_id, wallet_address)
                    .await?;

            let mut text = format!(
                "Order {id} created: {amount} {currency} -> {receive} {asset} (fee {fee} {currency}).",
                id = tx.id,
                amount = quote.amount,
                currency = quote.currency,
                receive = quote.receive_amount,
                asset = consts::SETTLEMENT_ASSET,
                fee = quote.fee
            );
            if let Some(instructions) = tx.payment_instructions {
                text.push_str(&format!("\n{}", instructions));
            }
            text.push_str(&format!("\nCheck progress with: status {}", tx.id));

            client.send_text_message(to.to_string(), text).await?;
        }
        RowAction::Offramp {
            currency,
            amount,
            beneficiary_id,
        } => {
            let (quote, tx) =
                api::ramp::execute_offramp(ramp_service, &currency, amount, &beneficiary_id)
                    .await?;

            let text = format!(
                "Payout {id} submitted: {receive} {currency} after fees (fee {fee} {currency}).\nCheck progress with: status {id}",
                id = tx.id,
                receive = quote.receive_amount,
                currency = quote.currency,
                fee = quote.fee
            );

            client.send_text_message(to.to_string(), text).await?;
        }
        RowAction::DeleteBeneficiary { beneficiary_id } => {
            ramp_service.delete_beneficiary(&beneficiary_id).await?;
            client
                .send_text_message(to.to_string(), "Payout account deleted.".to_string())
                .await?;
        }
    }

    Ok(())
}

/// Handles interactive responses, branching on the reply sub-type
async fn handle_interactive_response(
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
    message: &Message,
) -> Result<()> {
    let interactive = message
        .interactive
        .as_ref()
        .context("No interactive data in message")?;

    match interactive.reply_type.as_str() {
        "button_reply" => {
            let button = interactive
                .button_reply
                .as_ref()
                .context("No button reply in interactive message")?;
            handle_button_reply(client, wallet_service, ramp_service, &message.from, &button.id)
                .await
        }
        "list_reply" => {
            let row = interactive
                .list_reply
                .as_ref()
                .context("No list reply in interactive message")?;
            handle_list_reply(client, wallet_service, ramp_service, &message.from, &row.id).await
        }
        other => {
            logfire::warn!(
                "Unsupported interactive reply type: {type}",
                r#type = other.to_string()
            );
            Ok(())
        }
    }
}

/// Handles a single incoming message, dispatching on its type
pub async fn handle_user_message(
    message: &Message,
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
) -> Result<()> {
    match message.msg_type.as_str() {
        "text" => {
            if let Some(text) = &message.text {
                handle_text_command(client, wallet_service, ramp_service, &message.from, &text.body)
                    .await?;
            }
        }
        "interactive" => {
            handle_interactive_response(client, wallet_service, ramp_service, message).await?;
        }
        _ => {
            logfire::warn!(
                "Unsupported message type received: {type}",
                r#type = &message.msg_type
            );
        }
    }

    Ok(())
}

/// Handles delivery-status updates for sent messages
pub async fn handle_message_status(status: &Status) -> Result<()> {
    logfire::info!(
        "Message {id} status: {status}",
        id = &status.id,
        status = &status.status
    );

    Ok(())
}

/// Main webhook processor.
///
/// Handler errors are logged per message and never fail the batch.
pub async fn process_webhook(
    payload: WebhookPayload,
    client: &WhatsAppClient,
    wallet_service: &services::ImplWalletService,
    ramp_service: &services::ImplRampService,
) -> Result<()> {
    let messages = process_webhook_messages(&payload);
    for message in messages {
        if let Err(e) = handle_user_message(message, client, wallet_service, ramp_service).await {
            logfire::error!("Failed to handle message: {error}", error = e.to_string());
        }
    }

    let statuses = process_webhook_statuses(&payload);
    for status in statuses {
        if let Err(e) = handle_message_status(status).await {
            logfire::error!("Failed to handle status: {error}", error = e.to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::services::{MockRampService, MockWalletService};
    use crate::webhook::whatsapp::schemas::*;
    use rust_decimal_macros::dec;

    fn test_whatsapp_client() -> WhatsAppClient {
        let _ = config::APP_CONFIG.set(config::AppConfig {
            env: "local".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            private_key_path: "server.key".to_string(),
            certificate_path: "server.crt".to_string(),
            whatsapp_business_phone_number_id: 1234567890,
            whatsapp_business_auth: "wa-token".to_string(),
            whatsapp_verify_token: "verify-me".to_string(),
            whatsapp_app_secret: "app-secret".to_string(),
            wallet_api_base_url: "http://127.0.0.1:9".to_string(),
            wallet_api_key: "wallet-key".to_string(),
            ramp_api_base_url: "http://127.0.0.1:9".to_string(),
            ramp_api_key: "ramp-key".to_string(),
            logfire_token: String::new(),
        });

        WhatsAppClient::new().unwrap()
    }

    fn frozen_wallet() -> models::wallet::Wallet {
        models::wallet::Wallet {
            id: "wal_1".to_string(),
            owner_id: "254700000001".to_string(),
            label: None,
            status: models::wallet::WalletStatus::Frozen,
            assets: vec![],
            created_at: chrono::Utc::now(),
        }
    }

    fn text_message(body: &str) -> Message {
        Message {
            from: "254700000001".to_string(),
            id: "wamid.1".to_string(),
            timestamp: "1234567890".to_string(),
            msg_type: "text".to_string(),
            text: Some(TextMessage {
                body: body.to_string(),
            }),
            interactive: None,
            context: None,
        }
    }

    fn payload_with(field: &str, messages: Option<Vec<Message>>) -> WebhookPayload {
        WebhookPayload {
            object: "whatsapp_business_account".to_string(),
            entry: vec![Entry {
                id: "123456".to_string(),
                changes: vec![Change {
                    field: field.to_string(),
                    value: Value {
                        messaging_product: "whatsapp".to_string(),
                        metadata: Metadata {
                            display_phone_number: "+1234567890".to_string(),
                            phone_number_id: "phone123".to_string(),
                        },
                        contacts: None,
                        messages,
                        statuses: None,
                    },
                }],
            }],
        }
    }

    #[test]
    fn test_process_webhook_messages() {
        let payload = payload_with("messages", Some(vec![text_message("buy 1000 KES")]));

        let messages = process_webhook_messages(&payload);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "254700000001");
    }

    #[test]
    fn test_process_webhook_messages_ignores_other_fields() {
        let payload = payload_with("account_update", Some(vec![text_message("hi")]));
        assert!(process_webhook_messages(&payload).is_empty());
    }

    #[test]
    fn test_process_webhook_messages_empty_envelope() {
        let payload = WebhookPayload {
            object: "whatsapp_business_account".to_string(),
            entry: vec![],
        };
        assert!(process_webhook_messages(&payload).is_empty());
        assert!(process_webhook_statuses(&payload).is_empty());
    }

    #[ntex::test]
    async fn test_process_webhook_never_fails_the_batch() {
        let client = test_whatsapp_client();
        let wallet_service: services::ImplWalletService = Box::new(MockWalletService::new());
        let ramp_service: services::ImplRampService = Box::new(MockRampService::new());

        // "interactive" without interactive content makes the per-message
        // handler error out
        let mut broken = text_message("ignored");
        broken.msg_type = "interactive".to_string();
        broken.text = None;
        let payload = payload_with("messages", Some(vec![broken]));

        assert!(
            process_webhook(payload, &client, &wallet_service, &ramp_service)
                .await
                .is_ok()
        );
    }

    #[ntex::test]
    async fn test_unknown_shapes_are_ignored() {
        let client = test_whatsapp_client();
        // Zero-expectation mocks panic on any vendor call
        let wallet_service: services::ImplWalletService = Box::new(MockWalletService::new());
        let ramp_service: services::ImplRampService = Box::new(MockRampService::new());

        let mut sticker = text_message("ignored");
        sticker.msg_type = "sticker".to_string();
        sticker.text = None;
        handle_user_message(&sticker, &client, &wallet_service, &ramp_service)
            .await
            .unwrap();

        let mut unknown_reply = text_message("ignored");
        unknown_reply.msg_type = "interactive".to_string();
        unknown_reply.text = None;
        unknown_reply.interactive = Some(InteractiveReply {
            reply_type: "nfm_reply".to_string(),
            button_reply: None,
            list_reply: None,
        });
        handle_user_message(&unknown_reply, &client, &wallet_service, &ramp_service)
            .await
            .unwrap();

        handle_button_reply(
            &client,
            &wallet_service,
            &ramp_service,
            "254700000001",
            "mystery-button",
        )
        .await
        .unwrap();
    }

    #[ntex::test]
    async fn test_onramp_paused_for_inactive_wallet() {
        let client = test_whatsapp_client();

        let mut mock_wallet = MockWalletService::new();
        mock_wallet
            .expect_get_wallets_by_owner()
            .times(1)
            .returning(|_| Ok(vec![frozen_wallet()]));
        let wallet_service: services::ImplWalletService = Box::new(mock_wallet);

        let mut mock_ramp = MockRampService::new();
        mock_ramp.expect_get_channels().times(0);
        let ramp_service: services::ImplRampService = Box::new(mock_ramp);

        // The paused reply itself cannot be delivered in tests; the channel
        // lookup must not happen either way
        let _ = start_onramp_flow(
            &client,
            &wallet_service,
            &ramp_service,
            "254700000001",
            "1000",
            "KES",
        )
        .await;
    }

    #[test]
    fn test_parse_row_id_onramp() {
        let action = parse_row_id("onramp:KES:1000:ch_1").unwrap();
        assert_eq!(
            action,
            RowAction::Onramp {
                currency: "KES".to_string(),
                amount: dec!(1000),
                channel_id: "ch_1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_row_id_offramp() {
        let action = parse_row_id("offramp:NGN:500.50:ben_9").unwrap();
        assert_eq!(
            action,
            RowAction::Offramp {
                currency: "NGN".to_string(),
                amount: dec!(500.50),
                beneficiary_id: "ben_9".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_row_id_delete_beneficiary() {
        let action = parse_row_id("delbene:ben_9").unwrap();
        assert_eq!(
            action,
            RowAction::DeleteBeneficiary {
                beneficiary_id: "ben_9".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_row_id_rejects_bad_shapes() {
        assert!(parse_row_id("onramp:KES:notanumber:ch_1").is_none());
        assert!(parse_row_id("onramp:KES:1000").is_none());
        assert!(parse_row_id("reporte:411d4fa6").is_none());
        assert!(parse_row_id("").is_none());
    }

    #[test]
    fn test_onramp_rows_encode_context_and_cap() {
        let channels: Vec<models::ramp::Channel> = (0..15)
            .map(|i| models::ramp::Channel {
                id: format!("ch_{}", i),
                channel_type: models::ramp::ChannelType::MobileMoney,
                country: "KE".to_string(),
                currency: "KES".to_string(),
                status: "active".to_string(),
            })
            .collect();
        let rate = models::ramp::Rate {
            code: "KES".to_string(),
            buy: dec!(129.50),
            sell: dec!(128.00),
            updated_at: None,
        };

        let rows = onramp_rows("KES", dec!(1000), &channels, Some(&rate));

        assert_eq!(rows.len(), consts::WHATSAPP_LIST_MAX_ROWS);
        assert_eq!(rows[0].id, "onramp:KES:1000:ch_0");
        assert_eq!(
            parse_row_id(&rows[3].id).unwrap(),
            RowAction::Onramp {
                currency: "KES".to_string(),
                amount: dec!(1000),
                channel_id: "ch_3".to_string(),
            }
        );
        assert_eq!(rows[0].description.as_deref(), Some("rate 129.50 per USD"));
    }
}
