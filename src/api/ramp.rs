//! Fiat-ramp flows: market data rendering, quote-then-submit orchestration
//! and beneficiary management.

use crate::{models, services, utils};
use anyhow::{Context, Result};
use futures::try_join;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Parsed `add beneficiary <currency> <network> <account> <name…>` command
#[derive(Debug, PartialEq, Eq)]
pub struct AddBeneficiaryCommand {
    pub currency: String,
    pub network_code: String,
    pub account_number: String,
    pub name: String,
}

/// Outcome of a beneficiary creation attempt
pub enum AddBeneficiaryOutcome {
    Created(models::ramp::Beneficiary),
    /// The network code didn't match any provider for the currency; carries
    /// the valid options so the reply can list them
    UnknownNetwork(Vec<models::ramp::Network>),
}

/// Fetches payment channels and the current rate for one currency, in
/// parallel. Inactive channels are filtered out.
pub async fn fetch_onramp_options(
    ramp_service: &services::ImplRampService,
    currency: &str,
) -> Result<(Vec<models::ramp::Channel>, Option<models::ramp::Rate>)> {
    let (channels, rates) = try_join!(
        ramp_service.get_channels(currency),
        ramp_service.get_rates()
    )?;

    let active_channels = channels
        .into_iter()
        .filter(|channel| channel.is_active())
        .collect();
    let rate = rates.into_iter().find(|rate| rate.code == currency);

    Ok((active_channels, rate))
}

/// Requests a quote and submits the onramp transaction against it.
///
/// The purchased crypto settles to `wallet_address`. No retry on quote
/// expiry: a stale quote surfaces as the vendor's rejection.
pub async fn execute_onramp(
    ramp_service: &services::ImplRampService,
    currency: &str,
    amount: Decimal,
    channel_id: &str,
    wallet_address: &str,
) -> Result<(models::ramp::Quote, models::ramp::RampTransaction)> {
    let quote = ramp_service
        .request_quote(currency, amount, models::ramp::RampDirection::Onramp)
        .await
        .context("Failed to request onramp quote")?;

    let request = models::ramp::OnrampRequest {
        quote_id: quote.id.clone(),
        channel_id: channel_id.to_string(),
        currency: currency.to_string(),
        amount,
        wallet_address: wallet_address.to_string(),
        reference: Uuid::new_v4().to_string(),
    };

    let transaction = ramp_service
        .submit_onramp(&request)
        .await
        .context("Failed to submit onramp transaction")?;

    Ok((quote, transaction))
}

/// Requests a quote and submits the offramp transaction paying out to a saved
/// beneficiary.
pub async fn execute_offramp(
    ramp_service: &services::ImplRampService,
    currency: &str,
    amount: Decimal,
    beneficiary_id: &str,
) -> Result<(models::ramp::Quote, models::ramp::RampTransaction)> {
    let quote = ramp_service
        .request_quote(currency, amount, models::ramp::RampDirection::Offramp)
        .await
        .context("Failed to request offramp quote")?;

    let request = models::ramp::OfframpRequest {
        quote_id: quote.id.clone(),
        beneficiary_id: beneficiary_id.to_string(),
        currency: currency.to_string(),
        amount,
        reference: Uuid::new_v4().to_string(),
    };

    let transaction = ramp_service
        .submit_offramp(&request)
        .await
        .context("Failed to submit offramp transaction")?;

    Ok((quote, transaction))
}

/// Renders the buy/sell rate table for every supported currency.
///
/// Currencies and rates are independent vendor calls, fetched in parallel;
/// the currency list supplies the display names.
pub async fn rates_summary(ramp_service: &services::ImplRampService) -> Result<String> {
    let (currencies, rates) = try_join!(ramp_service.get_currencies(), ramp_service.get_rates())?;

    if rates.is_empty() {
        return Ok("No rates available right now.".to_string());
    }

    let mut lines = vec!["Current rates (per USD):".to_string()];
    for rate in rates {
        let name = currencies
            .iter()
            .find(|currency| currency.code == rate.code)
            .map(|currency| format!(" ({})", currency.name))
            .unwrap_or_default();
        lines.push(format!(
            "- {}{}: buy {} / sell {}",
            rate.code, name, rate.buy, rate.sell
        ));
    }

    Ok(lines.join("\n"))
}

/// Renders the vendor's fee schedule for one currency
pub async fn fees_summary(
    ramp_service: &services::ImplRampService,
    currency: &str,
) -> Result<String> {
    let fees = ramp_service.get_fees(currency).await?;

    Ok(format!(
        "Fees for {}: onramp {}% / offramp {}%.",
        fees.currency, fees.onramp_percent, fees.offramp_percent
    ))
}

/// Fetches a transaction and renders its status line
pub async fn transaction_status_text(
    ramp_service: &services::ImplRampService,
    transaction_id: &str,
) -> Result<String> {
    let tx = ramp_service.get_transaction(transaction_id).await?;

    let mut text = format!(
        "Transaction {id}: {direction} of {amount} {currency} is {status}.",
        id = tx.id,
        direction = tx.direction,
        amount = tx.amount,
        currency = tx.currency,
        status = tx.status
    );

    if let Some(instructions) = tx.payment_instructions {
        text.push_str(&format!("\n{}", instructions));
    }

    Ok(text)
}

/// Parses the free-text beneficiary command.
///
/// Format: `add beneficiary <currency> <network> <account> <name…>`, e.g.
/// `add beneficiary KES mpesa 0712345678 Jane Doe`. Matching is
/// case-insensitive; returns `None` when the shape doesn't fit so the caller
/// can reply with usage instructions.
pub fn parse_add_beneficiary(text: &str) -> Option<AddBeneficiaryCommand> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.len() < 6
        || !tokens[0].eq_ignore_ascii_case("add")
        || !tokens[1].eq_ignore_ascii_case("beneficiary")
    {
        return None;
    }

    let currency = utils::parse_currency_code(tokens[2])?;

    Some(AddBeneficiaryCommand {
        currency,
        network_code: tokens[3].to_ascii_lowercase(),
        account_number: tokens[4].to_string(),
        name: tokens[5..].join(" "),
    })
}

/// Validates the network code against the vendor's provider list for the
/// currency, then creates the beneficiary.
pub async fn add_beneficiary(
    ramp_service: &services::ImplRampService,
    owner_id: &str,
    command: AddBeneficiaryCommand,
) -> Result<AddBeneficiaryOutcome> {
    let networks = ramp_service.get_networks(&command.currency).await?;

    let matched = networks
        .iter()
        .any(|network| network.code.eq_ignore_ascii_case(&command.network_code));
    if !matched {
        return Ok(AddBeneficiaryOutcome::UnknownNetwork(networks));
    }

    let request = models::ramp::CreateBeneficiaryRequest {
        owner_id: owner_id.to_string(),
        name: command.name,
        account_number: command.account_number,
        network_code: command.network_code,
    };

    let beneficiary = ramp_service
        .create_beneficiary(&request)
        .await
        .context("Failed to create beneficiary")?;

    Ok(AddBeneficiaryOutcome::Created(beneficiary))
}
