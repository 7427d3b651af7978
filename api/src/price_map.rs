//! Provides maps for storing asset prices against various fiat currencies.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::asset::AssetId;
use crate::decimal_amount::DecimalAmount;
use crate::fiat_currency::FiatCurrency;

/// The price of one unit of a single asset in various fiat currencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMap(HashMap<FiatCurrency, DecimalAmount>);

impl PriceMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts or updates the price for a given currency, returning the old one.
    pub fn insert(&mut self, currency: FiatCurrency, price: DecimalAmount) -> Option<DecimalAmount> {
        self.0.insert(currency, price)
    }

    pub fn remove(&mut self, currency: FiatCurrency) -> Option<DecimalAmount> {
        self.0.remove(&currency)
    }

    /// Returns `None` if the price for the requested currency is not available.
    pub fn get(&self, currency: FiatCurrency) -> Option<&DecimalAmount> {
        self.0.get(&currency)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FiatCurrency, &DecimalAmount)> {
        self.0.iter().map(|(currency, price)| (*currency, price))
    }
}

/// Prices of every known asset, keyed by asset.
///
/// This is the rate table amount conversions look quotes up in. An asset or
/// currency missing from the table means "no quote", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTable(HashMap<AssetId, PriceMap>);

impl StockTable {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, asset: AssetId, currency: FiatCurrency, price: DecimalAmount) {
        self.0.entry(asset).or_default().insert(currency, price);
    }

    pub fn prices(&self, asset: &AssetId) -> Option<&PriceMap> {
        self.0.get(asset)
    }

    pub fn price(&self, asset: &AssetId, currency: FiatCurrency) -> Option<&DecimalAmount> {
        self.prices(asset)?.get(currency)
    }

    /// Copies every quote of `other` into this table, overwriting on conflict.
    pub fn merge(&mut self, other: StockTable) {
        for (asset, prices) in other.0 {
            let entry = self.0.entry(asset).or_default();
            for (currency, price) in prices.0 {
                entry.insert(currency, price);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(PriceMap::is_empty)
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.0.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    #[test]
    fn looks_up_by_asset_and_currency() {
        let mut stock = StockTable::new();
        stock.insert(AssetId::Ton, FiatCurrency::USD, dec("5.1"));
        assert_eq!(stock.price(&AssetId::Ton, FiatCurrency::USD), Some(&dec("5.1")));
        assert_eq!(stock.price(&AssetId::Ton, FiatCurrency::EUR), None);
        assert_eq!(
            stock.price(&AssetId::Jetton("0:abc".into()), FiatCurrency::USD),
            None
        );
    }

    #[test]
    fn merge_overwrites_and_extends() {
        let mut a = StockTable::new();
        a.insert(AssetId::Ton, FiatCurrency::USD, dec("5"));
        let mut b = StockTable::new();
        b.insert(AssetId::Ton, FiatCurrency::USD, dec("6"));
        b.insert(AssetId::Ton, FiatCurrency::EUR, dec("5.5"));
        a.merge(b);
        assert_eq!(a.price(&AssetId::Ton, FiatCurrency::USD), Some(&dec("6")));
        assert_eq!(a.price(&AssetId::Ton, FiatCurrency::EUR), Some(&dec("5.5")));
    }

    #[test]
    fn empty_price_maps_count_as_empty() {
        let mut stock = StockTable::new();
        assert!(stock.is_empty());
        stock.insert(AssetId::Ton, FiatCurrency::USD, dec("1"));
        assert!(!stock.is_empty());
        let mut prices = PriceMap::new();
        assert_eq!(prices.insert(FiatCurrency::EUR, dec("2")), None);
        assert_eq!(prices.iter().collect::<Vec<_>>(), vec![(FiatCurrency::EUR, &dec("2"))]);
        assert_eq!(prices.remove(FiatCurrency::EUR), Some(dec("2")));
        assert!(prices.is_empty());
    }
}
