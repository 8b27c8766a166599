//! # Fiat-Ramp API Client
//!
//! Typed wrapper around the on/off-ramp vendor's REST API: market data
//! (currencies, fees, rates), quoting, payment channels, mobile-money
//! networks, beneficiary CRUD and transaction submission/status.
//!
//! Authentication is bearer-token passthrough. No retry or backoff policy:
//! the vendor call either succeeds or surfaces its status and body as an
//! error.

use super::RampService;
use crate::{
    config, consts,
    models::ramp::{
        Beneficiary, Channel, CreateBeneficiaryRequest, Currency, FeeSchedule, Network,
        OfframpRequest, OnrampRequest, Quote, QuoteRequest, RampDirection, RampTransaction, Rate,
    },
    utils,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[derive(Clone)]
pub struct RampApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RampApiClient {
    pub fn new() -> Result<Self> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;

        Ok(Self {
            client: utils::REQUEST_CLIENT.clone(),
            base_url: app_config.ramp_api_base_url.clone(),
            api_key: app_config.ramp_api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.base_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to call ramp API GET {}", path))?;

        Self::parse_response(response).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to call ramp API POST {}", path))?;

        Self::parse_response(response).await
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

            anyhow::bail!("ramp API returned error status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse ramp API response")
    }
}

#[async_trait]
impl RampService for RampApiClient {
    async fn get_currencies(&self) -> Result<Vec<Currency>> {
        self.get_json(consts::RAMP_API_CURRENCIES_PATH, &[]).await
    }

    async fn get_fees(&self, currency: &str) -> Result<FeeSchedule> {
        self.get_json(consts::RAMP_API_FEES_PATH, &[("currency", currency)])
            .await
    }

    async fn get_rates(&self) -> Result<Vec<Rate>> {
        self.get_json(consts::RAMP_API_RATES_PATH, &[]).await
    }

    async fn request_quote(
        &self,
        currency: &str,
        amount: Decimal,
        direction: RampDirection,
    ) -> Result<Quote> {
        let request = QuoteRequest {
            currency: currency.to_string(),
            amount,
            direction,
        };

        self.post_json(consts::RAMP_API_QUOTES_PATH, &request).await
    }

    async fn get_channels(&self, currency: &str) -> Result<Vec<Channel>> {
        self.get_json(consts::RAMP_API_CHANNELS_PATH, &[("currency", currency)])
            .await
    }

    async fn get_networks(&self, currency: &str) -> Result<Vec<Network>> {
        self.get_json(consts::RAMP_API_NETWORKS_PATH, &[("currency", currency)])
            .await
    }

    async fn create_beneficiary(
        &self,
        request: &CreateBeneficiaryRequest,
    ) -> Result<Beneficiary> {
        self.post_json(consts::RAMP_API_BENEFICIARIES_PATH, request)
            .await
    }

    async fn get_beneficiaries(&self, owner_id: &str) -> Result<Vec<Beneficiary>> {
        self.get_json(
            consts::RAMP_API_BENEFICIARIES_PATH,
            &[("ownerId", owner_id)],
        )
        .await
    }

    async fn delete_beneficiary(&self, beneficiary_id: &str) -> Result<()> {
        let path = format!("{}/{}", consts::RAMP_API_BENEFICIARIES_PATH, beneficiary_id);
        let response = self
            .client
            .delete(self.endpoint(&path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to delete beneficiary")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("ramp API returned error status {}: {}", status, body);
        }

        Ok(())
    }

    async fn submit_onramp(&self, request: &OnrampRequest) -> Result<RampTransaction> {
        self.post_json(consts::RAMP_API_ONRAMP_PATH, request).await
    }

    async fn submit_offramp(&self, request: &OfframpRequest) -> Result<RampTransaction> {
        self.post_json(consts::RAMP_API_OFFRAMP_PATH, request).await
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<RampTransaction> {
        let path = format!("{}/{}", consts::RAMP_API_TRANSACTIONS_PATH, transaction_id);
        self.get_json(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = RampApiClient {
            client: reqwest::Client::new(),
            base_url: "https://api.ramp.example.com/v1".to_string(),
            api_key: "test-key".to_string(),
        };

        assert_eq!(
            client.endpoint("transactions/onramp"),
            "https://api.ramp.example.com/v1/transactions/onramp"
        );
        assert_eq!(
            client.endpoint("/beneficiaries/ben_1"),
            "https://api.ramp.example.com/v1/beneficiaries/ben_1"
        );
    }

    #[ntex::test]
    async fn test_parse_response_carries_status_and_body() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(429)
                .body("rate limited")
                .unwrap(),
        );

        let err = RampApiClient::parse_response::<Quote>(response)
            .await
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("rate limited"));
    }
}
