//! Helper functions shared across api/, services/ and webhook/

use crate::consts;
use rust_decimal::Decimal;
use std::{str::FromStr, sync::LazyLock};

/// Client to make http requests
pub static REQUEST_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Parses a user-supplied fiat amount.
///
/// Returns `None` for values that are not a number or fall below the minimum
/// transactable amount; the caller replies with usage instructions instead of
/// erroring out.
pub fn parse_fiat_amount(raw: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(raw).ok()?;
    if amount < consts::MIN_FIAT_AMOUNT {
        return None;
    }

    Some(amount.round_dp(2))
}

/// Normalizes a fiat currency code ("kes " -> "KES").
///
/// Returns `None` unless the code is exactly three ASCII letters.
pub fn parse_currency_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some(code.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_fiat_amount_valid() {
        assert_eq!(parse_fiat_amount("100"), Some(dec!(100)));
        assert_eq!(parse_fiat_amount("99.999"), Some(dec!(100.00)));
        assert_eq!(parse_fiat_amount("1.5"), Some(dec!(1.50)));
    }

    #[test]
    fn test_parse_fiat_amount_rejects_garbage_and_dust() {
        assert_eq!(parse_fiat_amount("abc"), None);
        assert_eq!(parse_fiat_amount(""), None);
        assert_eq!(parse_fiat_amount("-5"), None);
        assert_eq!(parse_fiat_amount("0.99"), None);
    }

    #[test]
    fn test_parse_currency_code() {
        assert_eq!(parse_currency_code("kes"), Some("KES".to_string()));
        assert_eq!(parse_currency_code(" NGN "), Some("NGN".to_string()));
        assert_eq!(parse_currency_code("kenya"), None);
        assert_eq!(parse_currency_code("k3s"), None);
    }
}
