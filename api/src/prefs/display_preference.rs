use crate::fiat_currency::FiatCurrency;
use crate::price_providers::PriceProviderKind;
use std::env;
use std::str::FromStr;
use serde::Serialize;
use serde::Deserialize;

/// Represents the user's complete currency display preference.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, strum::EnumIs)]
pub enum DisplayPreference {
    /// Coin-only mode. The app should not fetch or display any fiat info.
    CoinOnly,

    /// Fiat integration is enabled.
    FiatEnabled {
        /// The fiat currency amounts are converted to.
        fiat: FiatCurrency,

        /// `true` to start amount entry in fiat, `false` for the coin.
        display_as_fiat: bool,

        /// The rate provider to query.
        provider: PriceProviderKind,
    },
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|val| val.eq_ignore_ascii_case("true") || val == "1")
}

impl DisplayPreference {
    /// Creates a DisplayPreference instance from environment variables.
    ///
    /// # Environment Variables (case-insensitive for "true" or "false"):
    /// - `COIN_ONLY`: "true" forces coin-only mode. Defaults to false.
    /// - `FIAT_CURRENCY`: any supported ISO code, e.g. "USD" or "EUR".
    /// - `DISPLAY_AS_FIAT`: "true" to start amount entry in fiat.
    /// - `PRICE_PROVIDER`: "tonapi" or "coingecko".
    pub fn from_env() -> Self {
        if env_flag("COIN_ONLY").unwrap_or(false) {
            return Self::CoinOnly;
        }

        let fiat = env::var("FIAT_CURRENCY")
            .ok()
            .and_then(|s| FiatCurrency::from_str(&s).ok())
            .unwrap_or_default();

        let display_as_fiat = env_flag("DISPLAY_AS_FIAT").unwrap_or(false);

        let provider = env::var("PRICE_PROVIDER")
            .ok()
            .and_then(|s| PriceProviderKind::from_str(&s).ok())
            .unwrap_or_default();

        Self::FiatEnabled {
            fiat,
            display_as_fiat,
            provider,
        }
    }

    /// The fiat currency to convert to, if fiat is enabled.
    pub fn fiat(&self) -> Option<FiatCurrency> {
        match self {
            Self::CoinOnly => None,
            Self::FiatEnabled { fiat, .. } => Some(*fiat),
        }
    }
}

impl Default for DisplayPreference {
    fn default() -> Self {
        Self::from_env()
    }
}
