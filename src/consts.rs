use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Interactive button identifiers recognized by the dispatcher
pub const BTN_CREATE_WALLET: &str = "create-wallet";
pub const BTN_CHECK_BALANCE: &str = "check-balance";
pub const BTN_VIEW_RATES: &str = "view-rates";
pub const BTN_BUY_CRYPTO: &str = "buy-crypto";
pub const BTN_SELL_CRYPTO: &str = "sell-crypto";
pub const BTN_BENEFICIARIES: &str = "list-beneficiaries";

// List-reply row actions; row ids are "{action}:{arg}:..." (colon separated)
pub const ACTION_ONRAMP: &str = "onramp";
pub const ACTION_OFFRAMP: &str = "offramp";
pub const ACTION_DELETE_BENEFICIARY: &str = "delbene";

// WhatsApp interactive list messages cap out at ten rows
pub const WHATSAPP_LIST_MAX_ROWS: usize = 10;

pub const MIN_FIAT_AMOUNT: Decimal = dec!(1.00);

// Asset purchased crypto settles into on onramp
pub const SETTLEMENT_ASSET: &str = "USDT";

// Wallet-custody API paths, relative to the configured base URL
pub const WALLET_API_WALLETS_PATH: &str = "wallets";

// Fiat-ramp API paths, relative to the configured base URL
pub const RAMP_API_CURRENCIES_PATH: &str = "currencies";
pub const RAMP_API_FEES_PATH: &str = "fees";
pub const RAMP_API_RATES_PATH: &str = "rates";
pub const RAMP_API_QUOTES_PATH: &str = "quotes";
pub const RAMP_API_CHANNELS_PATH: &str = "channels";
pub const RAMP_API_NETWORKS_PATH: &str = "networks";
pub const RAMP_API_BENEFICIARIES_PATH: &str = "beneficiaries";
pub const RAMP_API_ONRAMP_PATH: &str = "transactions/onramp";
pub const RAMP_API_OFFRAMP_PATH: &str = "transactions/offramp";
pub const RAMP_API_TRANSACTIONS_PATH: &str = "transactions";
