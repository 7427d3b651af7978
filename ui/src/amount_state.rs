//! The dual-unit state behind a transfer amount field.
//!
//! The field shows one logical quantity twice: the value the user types
//! (primary) and its conversion (secondary). Either the coin or the fiat
//! figure can be primary. Every transition here is a pure function from the
//! previous state and the current [`StateOptions`] to a new state.

use api::asset::AssetId;
use api::asset::TON_DECIMALS;
use api::asset::TON_SYMBOL;
use api::decimal_amount::DecimalAmount;
use api::decimal_amount::Rounding;
use api::fiat_currency::FiatCurrency;
use api::jettons::JettonsBalances;
use api::price_map::StockTable;
use thiserror::Error;

use crate::currency::coin_to_fiat;
use crate::currency::fiat_to_coin;

/// Symbol shown for a jetton the wallet has no metadata for.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountStateError {
    /// A fiat figure was entered but no coin amount can be derived from it.
    #[error("Missing coin amount")]
    MissingCoinAmount,
}

/// The coin amount is primary. The fiat estimate is absent when the asset has
/// no quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCoinState {
    pub primary_value: String,
    pub primary_symbol: String,
    pub secondary_value: Option<String>,
    pub secondary_symbol: String,
}

/// The fiat amount is primary. The coin amount is always known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFiatState {
    pub primary_value: String,
    pub primary_symbol: String,
    pub secondary_value: String,
    pub secondary_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountState {
    Coin(AmountCoinState),
    Fiat(AmountFiatState),
}

impl AmountState {
    pub fn in_fiat(&self) -> bool {
        matches!(self, Self::Fiat(_))
    }

    pub fn primary_value(&self) -> &str {
        match self {
            Self::Coin(s) => &s.primary_value,
            Self::Fiat(s) => &s.primary_value,
        }
    }

    pub fn primary_symbol(&self) -> &str {
        match self {
            Self::Coin(s) => &s.primary_symbol,
            Self::Fiat(s) => &s.primary_symbol,
        }
    }

    pub fn secondary_value(&self) -> Option<&str> {
        match self {
            Self::Coin(s) => s.secondary_value.as_deref(),
            Self::Fiat(s) => Some(&s.secondary_value),
        }
    }

    pub fn secondary_symbol(&self) -> &str {
        match self {
            Self::Coin(s) => &s.secondary_symbol,
            Self::Fiat(s) => &s.secondary_symbol,
        }
    }
}

/// The context every transition is evaluated against.
///
/// Callers rebuild this from their latest data on each call; a stale copy
/// converts with stale prices.
#[derive(Debug, Clone, Copy)]
pub struct StateOptions<'a> {
    pub fiat: FiatCurrency,
    pub jettons: &'a JettonsBalances,
    /// The selected asset.
    pub jetton: &'a AssetId,
    pub stock: Option<&'a StockTable>,
}

impl<'a> StateOptions<'a> {
    /// Display symbol of the selected asset.
    pub fn symbol(&self) -> String {
        match self.jetton {
            AssetId::Ton => TON_SYMBOL.to_string(),
            AssetId::Jetton(address) => self
                .jettons
                .find(address)
                .map(|j| j.symbol.clone())
                .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
        }
    }

    pub fn decimals(&self) -> u32 {
        match self.jetton {
            AssetId::Ton => TON_DECIMALS,
            AssetId::Jetton(address) => self
                .jettons
                .find(address)
                .map(|j| j.decimals)
                .unwrap_or(TON_DECIMALS),
        }
    }

    /// Unit price of the selected asset in the selected fiat.
    ///
    /// Jetton quotes attached to the balance win over the stock table.
    /// Non-positive quotes are treated as missing.
    pub fn price(&self) -> Option<&'a DecimalAmount> {
        let from_balance = match self.jetton {
            AssetId::Ton => None,
            AssetId::Jetton(address) => self
                .jettons
                .find(address)
                .and_then(|j| j.price.as_ref())
                .and_then(|p| p.get(self.fiat)),
        };
        from_balance
            .or_else(|| self.stock?.price(self.jetton, self.fiat))
            .filter(|p| p.is_positive())
    }
}

/// A previously entered amount to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountValue {
    pub coin: DecimalAmount,
    /// Set when the amount was entered in fiat.
    pub fiat: Option<DecimalAmount>,
}

/// True for "", "0", "0.00", "." and other spellings of nothing.
fn is_zero_or_empty(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || value == "."
        || value
            .parse::<DecimalAmount>()
            .map(|d| d.is_zero())
            .unwrap_or(false)
}

/// A demoted primary value; an empty field becomes "0".
fn normalize_demoted(value: String) -> String {
    if is_zero_or_empty(&value) {
        "0".to_string()
    } else {
        value
    }
}

/// Fiat equivalent of a coin value. `None` when there is no quote or the
/// value is not a number.
pub fn fiat_value(value: &str, options: StateOptions<'_>) -> Option<String> {
    if is_zero_or_empty(value) {
        return Some("0".to_string());
    }
    let price = options.price()?;
    let amount = value.parse::<DecimalAmount>().ok()?;
    Some(coin_to_fiat(&amount, price, options.fiat).to_string())
}

/// Coin equivalent of a fiat value. `None` when there is no quote or the
/// value is not a number.
pub fn coin_value(value: &str, options: StateOptions<'_>) -> Option<String> {
    if is_zero_or_empty(value) {
        return Some("0".to_string());
    }
    let price = options.price()?;
    let amount = value.parse::<DecimalAmount>().ok()?;
    fiat_to_coin(&amount, price, options.decimals())
        .ok()
        .map(|coin| coin.to_string())
}

fn format_coin(amount: &DecimalAmount, options: &StateOptions<'_>) -> String {
    amount.round(options.decimals(), Rounding::Down).to_string()
}

fn format_fiat(amount: &DecimalAmount, options: &StateOptions<'_>) -> String {
    amount.round(options.fiat.decimals(), Rounding::HalfUp).to_string()
}

/// Builds the state for a freshly shown field, or resumes `data`.
///
/// A fiat-denominated `data` is trusted as consistent and not re-priced.
pub fn init_amount_state(data: Option<&AmountValue>, options: StateOptions<'_>) -> AmountState {
    let Some(data) = data else {
        return AmountState::Coin(AmountCoinState {
            primary_value: "0".to_string(),
            primary_symbol: options.symbol(),
            secondary_value: options.price().map(|_| "0".to_string()),
            secondary_symbol: options.fiat.code().to_string(),
        });
    };

    match &data.fiat {
        Some(fiat) => AmountState::Fiat(AmountFiatState {
            primary_value: format_fiat(fiat, &options),
            primary_symbol: options.fiat.code().to_string(),
            secondary_value: format_coin(&data.coin, &options),
            secondary_symbol: options.symbol(),
        }),
        None => {
            let primary_value = format_coin(&data.coin, &options);
            AmountState::Coin(AmountCoinState {
                secondary_value: fiat_value(&primary_value, options),
                primary_value,
                primary_symbol: options.symbol(),
                secondary_symbol: options.fiat.code().to_string(),
            })
        }
    }
}

/// The coin amount to submit, whichever unit is primary.
pub fn get_coin_amount(state: &AmountState) -> &str {
    match state {
        AmountState::Coin(s) => &s.primary_value,
        AmountState::Fiat(s) => &s.secondary_value,
    }
}

/// Swaps which unit is primary.
///
/// Switching to fiat needs a fiat estimate; without one the state is
/// returned unchanged.
pub fn toggle_amount_state(state: AmountState) -> AmountState {
    match state {
        AmountState::Fiat(s) => AmountState::Coin(AmountCoinState {
            primary_value: s.secondary_value,
            primary_symbol: s.secondary_symbol,
            secondary_value: Some(normalize_demoted(s.primary_value)),
            secondary_symbol: s.primary_symbol,
        }),
        AmountState::Coin(AmountCoinState {
            primary_value,
            primary_symbol,
            secondary_value: Some(secondary_value),
            secondary_symbol,
        }) => AmountState::Fiat(AmountFiatState {
            primary_value: secondary_value,
            primary_symbol: secondary_symbol,
            secondary_value: normalize_demoted(primary_value),
            secondary_symbol: primary_symbol,
        }),
        coin @ AmountState::Coin(AmountCoinState {
            secondary_value: None,
            ..
        }) => coin,
    }
}

/// Applies a typed value to the primary field and recomputes the other one.
///
/// In fiat mode the coin amount must be derivable, otherwise
/// [`AmountStateError::MissingCoinAmount`] is returned.
pub fn set_amount_state_value(
    value: &str,
    state: &AmountState,
    options: StateOptions<'_>,
) -> Result<AmountState, AmountStateError> {
    match state {
        AmountState::Fiat(s) => {
            let coin = coin_value(value, options).ok_or(AmountStateError::MissingCoinAmount)?;
            Ok(AmountState::Fiat(AmountFiatState {
                primary_value: value.to_string(),
                primary_symbol: s.primary_symbol.clone(),
                secondary_value: coin,
                secondary_symbol: s.secondary_symbol.clone(),
            }))
        }
        AmountState::Coin(s) => Ok(AmountState::Coin(AmountCoinState {
            primary_value: value.to_string(),
            primary_symbol: s.primary_symbol.clone(),
            secondary_value: fiat_value(value, options),
            secondary_symbol: s.secondary_symbol.clone(),
        })),
    }
}

/// Fills in the maximum coin amount. The result is always coin-denominated.
pub fn set_amount_state_max(
    value: &str,
    state: &AmountState,
    options: StateOptions<'_>,
) -> AmountState {
    let coin_symbol = match state {
        AmountState::Coin(s) => s.primary_symbol.clone(),
        AmountState::Fiat(s) => s.secondary_symbol.clone(),
    };
    AmountState::Coin(AmountCoinState {
        primary_value: value.to_string(),
        primary_symbol: coin_symbol,
        secondary_value: fiat_value(value, options),
        secondary_symbol: options.fiat.code().to_string(),
    })
}

/// Resets the field for a newly selected asset.
pub fn set_amount_state_jetton(options: StateOptions<'_>) -> AmountState {
    init_amount_state(None, options)
}
