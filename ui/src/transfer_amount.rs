// ui/src/transfer_amount.rs
//! Headless controller for the transfer amount field: keystrokes in, amount
//! state out.

use api::decimal_amount::DecimalAmount;
use api::decimal_amount::Rounding;
use dioxus_logger::tracing;

use crate::amount_state::get_coin_amount;
use crate::amount_state::init_amount_state;
use crate::amount_state::set_amount_state_jetton;
use crate::amount_state::set_amount_state_max;
use crate::amount_state::set_amount_state_value;
use crate::amount_state::toggle_amount_state;
use crate::amount_state::AmountState;
use crate::amount_state::AmountStateError;
use crate::amount_state::AmountValue;
use crate::amount_state::StateOptions;

/// Keypad key that deletes the last character.
pub const BACKSPACE: &str = "BACKSPACE";

const DEFAULT_MAX_INTEGERS: u8 = 12;

/// Keeps digits and the first '.', capped at `max_integers` integer digits
/// and `max_decimals` fraction digits. Everything else is dropped.
pub fn sanitize_amount_input(raw: &str, max_integers: u8, max_decimals: u32) -> String {
    let mut sanitized = String::new();
    let mut has_decimal = false;
    let mut integer_digits = 0;
    let mut decimal_digits = 0;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            if has_decimal {
                if decimal_digits < max_decimals {
                    sanitized.push(ch);
                    decimal_digits += 1;
                }
            } else if integer_digits < max_integers {
                sanitized.push(ch);
                integer_digits += 1;
            }
        } else if ch == '.' && !has_decimal {
            sanitized.push(ch);
            has_decimal = true;
        }
    }
    sanitized
}

fn is_numerically_zero(value: &str) -> bool {
    value
        .trim()
        .parse::<DecimalAmount>()
        .map(|d| d.is_zero())
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferAmountInput {
    state: AmountState,
    max_integers: u8,
}

impl TransferAmountInput {
    pub fn new(options: StateOptions<'_>) -> Self {
        Self::resume(None, options)
    }

    pub fn resume(data: Option<&AmountValue>, options: StateOptions<'_>) -> Self {
        Self {
            state: init_amount_state(data, options),
            max_integers: DEFAULT_MAX_INTEGERS,
        }
    }

    pub fn state(&self) -> &AmountState {
        &self.state
    }

    /// Fraction digits the primary field accepts in the current unit.
    fn max_decimals(&self, options: &StateOptions<'_>) -> u32 {
        if self.state.in_fiat() {
            options.fiat.decimals()
        } else {
            options.decimals()
        }
    }

    /// Applies raw field text. On failure the previous state is kept.
    pub fn on_input(
        &mut self,
        raw: &str,
        options: StateOptions<'_>,
    ) -> Result<&AmountState, AmountStateError> {
        let sanitized = sanitize_amount_input(raw, self.max_integers, self.max_decimals(&options));
        match set_amount_state_value(&sanitized, &self.state, options) {
            Ok(state) => {
                self.state = state;
                Ok(&self.state)
            }
            Err(e) => {
                tracing::warn!("rejected amount input {:?}: {}", sanitized, e);
                Err(e)
            }
        }
    }

    /// Applies one numeric keypad key (`0`-`9`, `.` or [`BACKSPACE`]).
    pub fn on_key(
        &mut self,
        key: &str,
        options: StateOptions<'_>,
    ) -> Result<&AmountState, AmountStateError> {
        let current = self.state.primary_value();
        let new_val = if key == BACKSPACE {
            let mut chars = current.chars();
            chars.next_back();
            chars.as_str().to_string()
        } else {
            format!("{}{}", current, key)
        };
        self.on_input(&new_val, options)
    }

    /// Clears a zero field so typing replaces it instead of appending.
    ///
    /// A fiat figure that rounds to "0" over a non-zero coin amount is left
    /// alone; clearing it would wipe the coin amount.
    pub fn on_focus(&mut self, options: StateOptions<'_>) {
        if is_numerically_zero(self.state.primary_value())
            && is_numerically_zero(get_coin_amount(&self.state))
        {
            // Clearing to "" converts to "0" without a price, so this cannot fail.
            if let Ok(state) = set_amount_state_value("", &self.state, options) {
                self.state = state;
            }
        }
    }

    /// Swaps the primary unit. Returns false when there is no fiat estimate
    /// to switch to.
    pub fn toggle(&mut self) -> bool {
        let before = self.state.in_fiat();
        self.state = toggle_amount_state(self.state.clone());
        let switched = self.state.in_fiat() != before;
        if !switched {
            tracing::debug!("toggle ignored: no fiat estimate for {}", self.state.primary_symbol());
        }
        switched
    }

    /// Fills in the whole `balance` of the selected asset.
    pub fn use_max(&mut self, balance: &DecimalAmount, options: StateOptions<'_>) {
        let value = balance.round(options.decimals(), Rounding::Down).to_string();
        self.state = set_amount_state_max(&value, &self.state, options);
    }

    /// Resets the field after the selected asset changed.
    pub fn select_asset(&mut self, options: StateOptions<'_>) {
        self.state = set_amount_state_jetton(options);
    }

    pub fn coin_amount(&self) -> &str {
        get_coin_amount(&self.state)
    }

    /// One-line rendering, e.g. "2 TON ≈ 10 USD".
    pub fn summary(&self) -> String {
        let primary = display_value(self.state.primary_value());
        match self.state.secondary_value() {
            Some(secondary) => format!(
                "{} {} ≈ {} {}",
                primary,
                self.state.primary_symbol(),
                display_value(secondary),
                self.state.secondary_symbol()
            ),
            None => format!(
                "{} {} (no {} estimate)",
                primary,
                self.state.primary_symbol(),
                self.state.secondary_symbol()
            ),
        }
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "0"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use api::asset::AssetId;
    use api::fiat_currency::FiatCurrency;
    use api::jettons::JettonsBalances;
    use api::price_map::StockTable;

    use super::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    fn stock(price: &str) -> StockTable {
        let mut stock = StockTable::new();
        stock.insert(AssetId::Ton, FiatCurrency::USD, dec(price));
        stock
    }

    fn options<'a>(
        jettons: &'a JettonsBalances,
        jetton: &'a AssetId,
        stock: Option<&'a StockTable>,
    ) -> StateOptions<'a> {
        StateOptions {
            fiat: FiatCurrency::USD,
            jettons,
            jetton,
            stock,
        }
    }

    #[test]
    fn sanitize_keeps_one_point_and_caps_digits() {
        assert_eq!(sanitize_amount_input("1a2.3.4", 12, 9), "12.34");
        assert_eq!(sanitize_amount_input("123456", 3, 2), "123");
        assert_eq!(sanitize_amount_input("1.23456", 3, 2), "1.23");
        assert_eq!(sanitize_amount_input("1.5", 3, 0), "1.");
        assert_eq!(sanitize_amount_input("-1,5", 3, 2), "15");
    }

    #[test]
    fn keypad_builds_and_edits_primary_value() {
        let jettons = JettonsBalances::default();
        let stock = stock("5");
        let opts = options(&jettons, &AssetId::Ton, Some(&stock));
        let mut input = TransferAmountInput::new(opts);

        input.on_focus(opts);
        assert_eq!(input.state().primary_value(), "");
        for key in ["1", ".", "5", "0", BACKSPACE] {
            input.on_key(key, opts).unwrap();
        }
        assert_eq!(input.state().primary_value(), "1.5");
        assert_eq!(input.state().secondary_value(), Some("7.5"));
        assert_eq!(input.summary(), "1.5 TON ≈ 7.5 USD");
    }

    #[test]
    fn focus_keeps_coin_amount_behind_zero_fiat_figure() {
        let jettons = JettonsBalances::default();
        let stock = stock("5");
        let opts = options(&jettons, &AssetId::Ton, Some(&stock));
        let mut input = TransferAmountInput::new(opts);
        input.on_input("0.0001", opts).unwrap();
        assert!(input.toggle());
        assert_eq!(input.state().primary_value(), "0");

        input.on_focus(opts);
        assert_eq!(input.state().primary_value(), "0");
        assert_eq!(input.coin_amount(), "0.0001");
    }

    #[test]
    fn fiat_mode_limits_decimals_to_currency() {
        let jettons = JettonsBalances::default();
        let stock = stock("5");
        let opts = options(&jettons, &AssetId::Ton, Some(&stock));
        let mut input = TransferAmountInput::new(opts);
        assert!(input.toggle());

        input.on_input("12.345", opts).unwrap();
        assert_eq!(input.state().primary_value(), "12.34");
        assert_eq!(input.coin_amount(), "2.468");
    }

    #[test]
    fn failed_fiat_input_keeps_previous_state() {
        let jettons = JettonsBalances::default();
        let stock = stock("5");
        let priced = options(&jettons, &AssetId::Ton, Some(&stock));
        let unpriced = options(&jettons, &AssetId::Ton, None);
        let mut input = TransferAmountInput::new(priced);
        input.toggle();
        input.on_input("10", priced).unwrap();

        let before = input.state().clone();
        assert_eq!(
            input.on_input("20", unpriced),
            Err(AmountStateError::MissingCoinAmount)
        );
        assert_eq!(input.state(), &before);
    }

    #[test]
    fn toggle_reports_missing_estimate() {
        let jettons = JettonsBalances::default();
        let opts = options(&jettons, &AssetId::Ton, None);
        let mut input = TransferAmountInput::new(opts);
        input.on_input("3", opts).unwrap();
        assert!(!input.toggle());
        assert!(!input.state().in_fiat());
        assert_eq!(input.summary(), "3 TON (no USD estimate)");
    }

    #[test]
    fn max_switches_back_to_coin() {
        let jettons = JettonsBalances::default();
        let stock = stock("2");
        let opts = options(&jettons, &AssetId::Ton, Some(&stock));
        let mut input = TransferAmountInput::new(opts);
        input.toggle();
        input.use_max(&dec("3.1234567891"), opts);
        assert!(!input.state().in_fiat());
        assert_eq!(input.coin_amount(), "3.123456789");
        assert_eq!(input.state().secondary_value(), Some("6.25"));
    }

    #[test]
    fn selecting_asset_resets_amount() {
        let jettons = JettonsBalances::default();
        let stock = stock("2");
        let ton = options(&jettons, &AssetId::Ton, Some(&stock));
        let mut input = TransferAmountInput::new(ton);
        input.on_input("4", ton).unwrap();

        let jetton = AssetId::Jetton("0:abc".into());
        input.select_asset(options(&jettons, &jetton, Some(&stock)));
        assert_eq!(input.coin_amount(), "0");
        assert_eq!(input.state().primary_symbol(), "UNKNOWN");
        assert_eq!(input.state().secondary_value(), None);
    }
}
