pub mod ramp;
pub mod wallet;

use crate::models;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Wallet-custody vendor API surface.
///
/// The vendor holds the user record: wallets are looked up by owner id,
/// which is the sender's phone number.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletService {
    async fn create_wallet(&self, owner_id: &str) -> anyhow::Result<models::wallet::Wallet>;

    async fn get_wallets_by_owner(
        &self,
        owner_id: &str,
    ) -> anyhow::Result<Vec<models::wallet::Wallet>>;

    async fn get_asset_info(
        &self,
        wallet_id: &str,
        symbol: &str,
    ) -> anyhow::Result<models::wallet::AssetInfo>;
}

/// Fiat on/off-ramp vendor API surface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RampService {
    async fn get_currencies(&self) -> anyhow::Result<Vec<models::ramp::Currency>>;

    async fn get_fees(&self, currency: &str) -> anyhow::Result<models::ramp::FeeSchedule>;

    async fn get_rates(&self) -> anyhow::Result<Vec<models::ramp::Rate>>;

    async fn request_quote(
        &self,
        currency: &str,
        amount: Decimal,
        direction: models::ramp::RampDirection,
    ) -> anyhow::Result<models::ramp::Quote>;

    async fn get_channels(&self, currency: &str) -> anyhow::Result<Vec<models::ramp::Channel>>;

    async fn get_networks(&self, currency: &str) -> anyhow::Result<Vec<models::ramp::Network>>;

    async fn create_beneficiary(
        &self,
        request: &models::ramp::CreateBeneficiaryRequest,
    ) -> anyhow::Result<models::ramp::Beneficiary>;

    async fn get_beneficiaries(
        &self,
        owner_id: &str,
    ) -> anyhow::Result<Vec<models::ramp::Beneficiary>>;

    async fn delete_beneficiary(&self, beneficiary_id: &str) -> anyhow::Result<()>;

    async fn submit_onramp(
        &self,
        request: &models::ramp::OnrampRequest,
    ) -> anyhow::Result<models::ramp::RampTransaction>;

    async fn submit_offramp(
        &self,
        request: &models::ramp::OfframpRequest,
    ) -> anyhow::Result<models::ramp::RampTransaction>;

    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> anyhow::Result<models::ramp::RampTransaction>;
}

pub type ImplWalletService = Box<dyn WalletService>;
pub type ImplRampService = Box<dyn RampService>;
