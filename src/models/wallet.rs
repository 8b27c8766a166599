//! Wallet-custody API data structures.
//!
//! The custody vendor owns the user record: wallets are keyed by an owner id,
//! which for this bot is the sender's WhatsApp phone number.

use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum WalletStatus {
    #[serde(rename = "active")]
    #[display("active")]
    Active,
    #[serde(rename = "frozen")]
    #[display("frozen")]
    Frozen,
    #[default]
    #[serde(rename = "pending")]
    #[display("pending")]
    Pending,
}

/// A custodial wallet as returned by the vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Vendor-assigned wallet ID
    pub id: String,
    /// Owner key the wallet was created under (the user's phone number)
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub status: WalletStatus,
    /// Assets provisioned on the wallet, with their deposit addresses
    pub assets: Vec<WalletAsset>,
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    pub fn is_active(&self) -> bool {
        self.status == WalletStatus::Active
    }

    /// Deposit address for an asset symbol, if the wallet carries it
    pub fn asset_address(&self, symbol: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
            .map(|asset| asset.address.as_str())
    }
}

/// An asset provisioned on a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAsset {
    /// Asset symbol (e.g. "USDT", "BTC")
    pub symbol: String,
    /// On-chain deposit address
    pub address: String,
}

/// Per-asset detail including the current balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub symbol: String,
    pub address: String,
    pub balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<Decimal>,
}

/// Request body for wallet creation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CreateWalletRequest {
    pub fn new(owner_id: String) -> Self {
        Self {
            owner_id,
            label: None,
        }
    }
}
