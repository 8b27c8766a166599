//! Fiat on/off-ramp API data structures.
//!
//! Onramp: fiat in, crypto deposited to the user's wallet.
//! Offramp: crypto in, fiat paid out to a saved beneficiary.

use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum RampDirection {
    #[serde(rename = "onramp")]
    #[display("onramp")]
    Onramp,
    #[serde(rename = "offramp")]
    #[display("offramp")]
    Offramp,
}

/// A fiat currency supported by the ramp vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code (e.g. "KES", "NGN")
    pub code: String,
    pub name: String,
    /// ISO 3166 alpha-2 country code
    pub country: String,
    pub supports_onramp: bool,
    pub supports_offramp: bool,
}

/// Buy/sell exchange rate for one fiat currency against USD
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub code: String,
    pub buy: Decimal,
    pub sell: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fee schedule for one currency, percentages of the transaction amount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    pub currency: String,
    pub onramp_percent: Decimal,
    pub offramp_percent: Decimal,
}

/// Request body for a quote
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub currency: String,
    pub amount: Decimal,
    pub direction: RampDirection,
}

/// A priced quote; submit its id with the transaction before it expires
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub currency: String,
    pub direction: RampDirection,
    /// Fiat units per USD at the time of the quote
    pub rate: Decimal,
    /// Fee charged, in fiat units
    pub fee: Decimal,
    /// Fiat amount the quote was priced for
    pub amount: Decimal,
    /// What the user ends up with: USD-stable crypto for onramp, fiat for
    /// offramp
    pub receive_amount: Decimal,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum ChannelType {
    #[serde(rename = "bank")]
    #[display("bank")]
    Bank,
    #[serde(rename = "momo")]
    #[display("mobile money")]
    MobileMoney,
}

/// A payment method category available in a country/currency
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub channel_type: ChannelType,
    pub country: String,
    pub currency: String,
    /// "active" channels are the only ones offered to users
    pub status: String,
}

impl Channel {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// A mobile-money provider or bank reachable through a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
    /// Short code users reference in chat (e.g. "mpesa", "mtn")
    pub code: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// A saved payout destination for offramp transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: String,
    /// Owner key, the user's phone number
    pub owner_id: String,
    /// Account holder name
    pub name: String,
    pub account_number: String,
    pub network_code: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for beneficiary creation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBeneficiaryRequest {
    pub owner_id: String,
    pub name: String,
    pub account_number: String,
    pub network_code: String,
}

/// Request body for an onramp (fiat -> crypto) transaction
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnrampRequest {
    pub quote_id: String,
    pub channel_id: String,
    pub currency: String,
    pub amount: Decimal,
    /// Deposit address the purchased crypto settles to
    pub wallet_address: String,
    /// Idempotent caller reference
    pub reference: String,
}

/// Request body for an offramp (crypto -> fiat) transaction
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfframpRequest {
    pub quote_id: String,
    pub beneficiary_id: String,
    pub currency: String,
    pub amount: Decimal,
    /// Idempotent caller reference
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum TransactionStatus {
    #[default]
    #[serde(rename = "pending")]
    #[display("pending")]
    Pending,
    #[serde(rename = "processing")]
    #[display("processing")]
    Processing,
    #[serde(rename = "complete")]
    #[display("complete")]
    Complete,
    #[serde(rename = "failed")]
    #[display("failed")]
    Failed,
}

/// A submitted ramp transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampTransaction {
    pub id: String,
    pub direction: RampDirection,
    pub status: TransactionStatus,
    pub currency: String,
    pub amount: Decimal,
    /// Present for onramps: how the user should send the fiat (e.g. a paybill
    /// number and reference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_deserialization() {
        let json = r#"{
            "id": "qt_9",
            "currency": "KES",
            "direction": "onramp",
            "rate": 129.50,
            "fee": 35.00,
            "amount": 1000,
            "receiveAmount": 7.45,
            "expiresAt": "2026-01-15T10:05:00Z"
        }"#;

        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.direction, RampDirection::Onramp);
        assert_eq!(quote.rate, dec!(129.50));
        assert_eq!(quote.receive_amount, dec!(7.45));
    }

    #[test]
    fn test_channel_active_filter() {
        let json = r#"{
            "id": "ch_1",
            "channelType": "momo",
            "country": "KE",
            "currency": "KES",
            "status": "inactive"
        }"#;

        let channel: Channel = serde_json::from_str(json).unwrap();
        assert_eq!(channel.channel_type, ChannelType::MobileMoney);
        assert!(!channel.is_active());
    }

    #[test]
    fn test_transaction_status_roundtrip() {
        let tx_json = r#"{
            "id": "tx_1",
            "direction": "offramp",
            "status": "processing",
            "currency": "NGN",
            "amount": 50000,
            "createdAt": "2026-01-15T10:00:00Z"
        }"#;

        let tx: RampTransaction = serde_json::from_str(tx_json).unwrap();
        assert_eq!(tx.status, TransactionStatus::Processing);
        assert_eq!(tx.status.to_string(), "processing");
        assert!(tx.payment_instructions.is_none());
    }

    #[test]
    fn test_onramp_request_serialization() {
        let request = OnrampRequest {
            quote_id: "qt_9".to_string(),
            channel_id: "ch_1".to_string(),
            currency: "KES".to_string(),
            amount: dec!(1000),
            wallet_address: "0xabc".to_string(),
            reference: "ref-1".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["quoteId"], "qt_9");
        assert_eq!(json["walletAddress"], "0xabc");
    }
}
