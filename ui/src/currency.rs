// ui/src/currency.rs
use api::decimal_amount::DecimalAmount;
use api::decimal_amount::Rounding;
use api::fiat_currency::FiatCurrency;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Exchange rate is zero.")]
    ZeroRate,
}

/// Converts a coin amount to fiat using a unit price in that fiat.
/// The result is rounded half-up to the currency's decimals.
pub fn coin_to_fiat(amount: &DecimalAmount, rate: &DecimalAmount, fiat: FiatCurrency) -> DecimalAmount {
    (amount * rate).round(fiat.decimals(), Rounding::HalfUp)
}

/// Converts a fiat amount to a coin amount using a unit price in that fiat.
/// The result is truncated to `decimals`, so the coin side never exceeds
/// what the fiat figure pays for.
pub fn fiat_to_coin(
    fiat_amount: &DecimalAmount,
    rate: &DecimalAmount,
    decimals: u32,
) -> Result<DecimalAmount, ConversionError> {
    if !rate.is_positive() {
        return Err(ConversionError::ZeroRate);
    }
    fiat_amount
        .checked_div(rate, decimals, Rounding::Down)
        .ok_or(ConversionError::ZeroRate)
}
