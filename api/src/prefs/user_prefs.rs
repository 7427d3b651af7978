use super::display_preference::DisplayPreference;
use serde::Serialize;
use serde::Deserialize;

/// Represents all user prefs. Intended for saving to a file, editing in a settings dialog, etc.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct UserPrefs {
    display_preference: DisplayPreference,
}

impl UserPrefs {
    pub fn new(display_preference: DisplayPreference) -> Self {
        Self { display_preference }
    }

    pub fn display_preference(&self) -> &DisplayPreference {
        &self.display_preference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiat_currency::FiatCurrency;
    use crate::price_providers::PriceProviderKind;

    #[test]
    fn serializes_to_json_and_back() {
        let prefs = UserPrefs::new(DisplayPreference::FiatEnabled {
            fiat: FiatCurrency::EUR,
            display_as_fiat: true,
            provider: PriceProviderKind::CoinGecko,
        });
        let json = serde_json::to_string(&prefs).unwrap();
        let back: UserPrefs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
        assert_eq!(back.display_preference().fiat(), Some(FiatCurrency::EUR));
        assert_eq!(DisplayPreference::CoinOnly.fiat(), None);
    }
}
