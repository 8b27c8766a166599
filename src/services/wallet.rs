//! # Wallet-Custody API Client
//!
//! Typed wrapper around the wallet-custody vendor's REST API. Authentication
//! is bearer-token passthrough; non-2xx responses surface as errors carrying
//! the vendor's status and body.

use super::WalletService;
use crate::{
    config, consts,
    models::wallet::{AssetInfo, CreateWalletRequest, Wallet},
    utils,
};
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Clone)]
pub struct WalletApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WalletApiClient {
    pub fn new() -> Result<Self> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;

        Ok(Self {
            client: utils::REQUEST_CLIENT.clone(),
            base_url: app_config.wallet_api_base_url.clone(),
            api_key: app_config.wallet_api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.base_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("wallet API returned error status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse wallet API response")
    }
}

#[async_trait]
impl WalletService for WalletApiClient {
    async fn create_wallet(&self, owner_id: &str) -> Result<Wallet> {
        let request = CreateWalletRequest::new(owner_id.to_string());
        let response = self
            .client
            .post(self.endpoint(consts::WALLET_API_WALLETS_PATH))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send create-wallet request")?;

        Self::parse_response(response).await
    }

    async fn get_wallets_by_owner(&self, owner_id: &str) -> Result<Vec<Wallet>> {
        let response = self
            .client
            .get(self.endpoint(consts::WALLET_API_WALLETS_PATH))
            .query(&[("ownerId", owner_id)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to fetch wallets by owner")?;

        Self::parse_response(response).await
    }

    async fn get_asset_info(&self, wallet_id: &str, symbol: &str) -> Result<AssetInfo> {
        let path = format!(
            "{}/{}/assets/{}",
            consts::WALLET_API_WALLETS_PATH,
            wallet_id,
            symbol
        );
        let response = self
            .client
            .get(self.endpoint(&path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to fetch asset info for {}", symbol))?;

        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> WalletApiClient {
        WalletApiClient {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
        }
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = test_client("https://api.wallets.example.com/v1/");
        assert_eq!(
            client.endpoint("wallets"),
            "https://api.wallets.example.com/v1/wallets"
        );
        assert_eq!(
            client.endpoint("/wallets/wal_1/assets/USDT"),
            "https://api.wallets.example.com/v1/wallets/wal_1/assets/USDT"
        );
    }

    #[ntex::test]
    async fn test_parse_response_carries_status_and_body() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(502)
                .body("upstream exploded")
                .unwrap(),
        );

        let err = WalletApiClient::parse_response::<Wallet>(response)
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("502"));
        assert!(text.contains("upstream exploded"));
    }
}
