//! Wallet flows: lookup, creation and the parallel balance fan-out.
//!
//! The custody vendor is the system of record; the only "user lookup" in the
//! bot is fetching wallets by the sender's phone number.

use crate::{models, services};
use anyhow::Result;
use futures::future::try_join_all;

/// Fetches the user's wallet, if one exists.
///
/// The custody API can return several wallets per owner; the bot operates on
/// the first one.
pub async fn get_user_wallet(
    wallet_service: &services::ImplWalletService,
    owner_id: &str,
) -> Result<Option<models::wallet::Wallet>> {
    let mut wallets = wallet_service.get_wallets_by_owner(owner_id).await?;

    if wallets.is_empty() {
        return Ok(None);
    }

    Ok(Some(wallets.swap_remove(0)))
}

/// Renders the confirmation text for a freshly created wallet
pub fn wallet_created_text(wallet: &models::wallet::Wallet) -> String {
    let mut lines = vec![format!(
        "Your wallet is ready (status: {status}). Deposit addresses:",
        status = wallet.status
    )];

    for asset in &wallet.assets {
        lines.push(format!("- {}: {}", asset.symbol, asset.address));
    }

    lines.join("\n")
}

/// Builds a balance summary for every asset on the wallet.
///
/// Per-asset lookups are independent vendor calls, so they are fanned out in
/// parallel; one failing call fails the summary.
pub async fn balance_summary(
    wallet_service: &services::ImplWalletService,
    wallet: &models::wallet::Wallet,
) -> Result<String> {
    if wallet.assets.is_empty() {
        return Ok("Your wallet has no assets provisioned yet.".to_string());
    }

    let infos = try_join_all(
        wallet
            .assets
            .iter()
            .map(|asset| wallet_service.get_asset_info(&wallet.id, &asset.symbol)),
    )
    .await?;

    let mut lines = vec!["Your balances:".to_string()];
    for info in infos {
        let usd = info
            .usd_value
            .map(|value| format!(" (~${})", value.round_dp(2)))
            .unwrap_or_default();
        lines.push(format!("- {}: {}{}", info.symbol, info.balance, usd));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockWalletService;
    use chrono::Utc;
    use mockall::predicate::*;
    use rust_decimal_macros::dec;

    fn test_wallet(assets: Vec<(&str, &str)>) -> models::wallet::Wallet {
        models::wallet::Wallet {
            id: "wal_1".to_string(),
            owner_id: "254700000001".to_string(),
            label: None,
            status: models::wallet::WalletStatus::Active,
            assets: assets
                .into_iter()
                .map(|(symbol, address)| models::wallet::WalletAsset {
                    symbol: symbol.to_string(),
                    address: address.to_string(),
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[ntex::test]
    async fn test_get_user_wallet_none() {
        let mut mock_wallet = MockWalletService::new();
        mock_wallet
            .expect_get_wallets_by_owner()
            .with(eq("254700000001"))
            .times(1)
            .returning(|_| Ok(vec![]));
        let mock_wallet: services::ImplWalletService = Box::new(mock_wallet);

        let result = get_user_wallet(&mock_wallet, "254700000001").await.unwrap();
        assert!(result.is_none());
    }

    #[ntex::test]
    async fn test_get_user_wallet_takes_first() {
        let mut mock_wallet = MockWalletService::new();
        mock_wallet
            .expect_get_wallets_by_owner()
            .times(1)
            .returning(|_| {
                Ok(vec![
                    test_wallet(vec![("USDT", "0xabc")]),
                    test_wallet(vec![("BTC", "bc1q")]),
                ])
            });
        let mock_wallet: services::ImplWalletService = Box::new(mock_wallet);

        let wallet = get_user_wallet(&mock_wallet, "254700000001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(wallet.assets[0].symbol, "USDT");
    }

    #[ntex::test]
    async fn test_balance_summary_fans_out_per_asset() {
        let mut mock_wallet = MockWalletService::new();
        mock_wallet
            .expect_get_asset_info()
            .with(eq("wal_1"), eq("USDT"))
            .times(1)
            .returning(|_, _| {
                Ok(models::wallet::AssetInfo {
                    symbol: "USDT".to_string(),
                    address: "0xabc".to_string(),
                    balance: dec!(125.37),
                    usd_value: Some(dec!(125.37)),
                })
            });
        mock_wallet
            .expect_get_asset_info()
            .with(eq("wal_1"), eq("BTC"))
            .times(1)
            .returning(|_, _| {
                Ok(models::wallet::AssetInfo {
                    symbol: "BTC".to_string(),
                    address: "bc1q".to_string(),
                    balance: dec!(0.002),
                    usd_value: None,
                })
            });
        let mock_wallet: services::ImplWalletService = Box::new(mock_wallet);

        let wallet = test_wallet(vec![("USDT", "0xabc"), ("BTC", "bc1q")]);
        let summary = balance_summary(&mock_wallet, &wallet).await.unwrap();

        assert!(summary.contains("USDT: 125.37 (~$125.37)"));
        assert!(summary.contains("BTC: 0.002"));
    }

    #[test]
    fn test_wallet_created_text_lists_addresses() {
        let wallet = test_wallet(vec![("USDT", "0xabc")]);
        let text = wallet_created_text(&wallet);

        assert!(text.contains("status: active"));
        assert!(text.contains("- USDT: 0xabc"));
    }
}
