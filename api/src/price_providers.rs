//! Defines traits and implementations for external price data providers.

use std::collections::HashMap;
use std::str::FromStr;

use dioxus_logger::tracing;
use serde::Deserialize;
use serde::Serialize;

use crate::asset::AssetId;
use crate::decimal_amount::DecimalAmount;
use crate::fiat_currency::FiatCurrency;
use crate::price_map::StockTable;
use crate::ApiError;

/// A service that quotes fiat prices for wallet assets.
///
/// Quotes the service does not have are left out of the returned table; only
/// transport and decoding failures are errors.
pub trait PriceProvider {
    async fn get_prices(
        &self,
        assets: &[AssetId],
        currencies: &[FiatCurrency],
    ) -> Result<StockTable, ApiError>;
}

/// Selects which provider the wallet queries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PriceProviderKind {
    #[default]
    TonApi,
    CoinGecko,
}

impl PriceProviderKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl PriceProvider for PriceProviderKind {
    async fn get_prices(
        &self,
        assets: &[AssetId],
        currencies: &[FiatCurrency],
    ) -> Result<StockTable, ApiError> {
        match self {
            Self::TonApi => tonapi::TonApi.get_prices(assets, currencies).await,
            Self::CoinGecko => coin_gecko::CoinGecko.get_prices(assets, currencies).await,
        }
    }
}

fn currency_list(currencies: &[FiatCurrency]) -> String {
    currencies
        .iter()
        .map(|c| c.code().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

/// Inserts each quote whose currency code is known and whose value is finite.
fn insert_quotes<'a>(
    stock: &mut StockTable,
    asset: &AssetId,
    quotes: impl IntoIterator<Item = (&'a String, &'a f64)>,
) {
    for (code, value) in quotes {
        let Ok(currency) = FiatCurrency::from_str(code) else {
            continue;
        };
        if let Some(price) = DecimalAmount::from_f64(*value) {
            stock.insert(asset.clone(), currency, price);
        }
    }
}

/// Provides price data from the tonapi.io rates endpoint.
pub mod tonapi {
    use super::*;

    /// The structure of the JSON response from `/v2/rates`.
    #[derive(Deserialize, Debug)]
    pub(crate) struct RatesResponse {
        rates: HashMap<String, TokenRates>,
    }

    #[derive(Deserialize, Debug)]
    struct TokenRates {
        #[serde(default)]
        prices: HashMap<String, f64>,
    }

    /// Supports TON and any jetton.
    pub struct TonApi;

    pub(crate) fn rates_url(assets: &[AssetId], currencies: &[FiatCurrency]) -> String {
        let tokens = assets
            .iter()
            .map(AssetId::query_token)
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "https://tonapi.io/v2/rates?tokens={}&currencies={}",
            tokens,
            currency_list(currencies)
        )
    }

    pub(crate) fn into_stock_table(resp: RatesResponse) -> StockTable {
        let mut stock = StockTable::new();
        for (token, rates) in resp.rates.iter() {
            let Ok(asset) = AssetId::from_str(token) else {
                continue;
            };
            insert_quotes(&mut stock, &asset, rates.prices.iter());
        }
        stock
    }

    impl PriceProvider for TonApi {
        async fn get_prices(
            &self,
            assets: &[AssetId],
            currencies: &[FiatCurrency],
        ) -> Result<StockTable, ApiError> {
            let url = rates_url(assets, currencies);
            tracing::debug!("fetching rates: {}", url);

            let client = reqwest::Client::new();
            let resp = client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<RatesResponse>()
                .await?;

            Ok(into_stock_table(resp))
        }
    }
}

/// Provides price data from the public CoinGecko API.
pub mod coin_gecko {
    use super::*;

    /// The structure of the JSON response from CoinGecko's simple price API.
    #[derive(Deserialize, Debug)]
    pub(crate) struct CoinGeckoResponse {
        #[serde(rename = "the-open-network", default)]
        the_open_network: HashMap<String, f64>,
    }

    /// Quotes TON only; jettons are not listed by id there.
    pub struct CoinGecko;

    pub(crate) fn into_stock_table(resp: CoinGeckoResponse) -> StockTable {
        let mut stock = StockTable::new();
        insert_quotes(&mut stock, &AssetId::Ton, resp.the_open_network.iter());
        stock
    }

    impl PriceProvider for CoinGecko {
        async fn get_prices(
            &self,
            assets: &[AssetId],
            currencies: &[FiatCurrency],
        ) -> Result<StockTable, ApiError> {
            if !assets.iter().any(AssetId::is_ton) {
                return Ok(StockTable::new());
            }
            let skipped = assets.iter().filter(|a| !a.is_ton()).count();
            if skipped > 0 {
                tracing::debug!("coingecko has no jetton quotes, skipping {} assets", skipped);
            }

            let url = format!(
                "https://api.coingecko.com/api/v3/simple/price?ids=the-open-network&vs_currencies={}",
                currency_list(currencies)
            );

            let client = reqwest::Client::new();
            let resp = client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<CoinGeckoResponse>()
                .await?;

            Ok(into_stock_table(resp))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!(PriceProviderKind::from_str("tonapi"), Ok(PriceProviderKind::TonApi));
        assert_eq!(
            PriceProviderKind::from_str("COINGECKO"),
            Ok(PriceProviderKind::CoinGecko)
        );
        assert_eq!(PriceProviderKind::default().name(), "TonApi");
    }

    #[test]
    fn tonapi_url_lists_tokens_and_currencies() {
        let url = tonapi::rates_url(
            &[AssetId::Ton, AssetId::Jetton("0:abc".into())],
            &[FiatCurrency::USD, FiatCurrency::EUR],
        );
        assert_eq!(
            url,
            "https://tonapi.io/v2/rates?tokens=ton,0:abc&currencies=usd,eur"
        );
    }

    #[test]
    fn tonapi_response_maps_to_stock_table() {
        let json = r#"{
            "rates": {
                "TON": {"prices": {"USD": 5.25, "EUR": 4.8, "TON": 1}, "diff_24h": {"USD": "-1.2%"}},
                "0:abc": {"prices": {"USD": 0.9998}},
                "0:def": {}
            }
        }"#;
        let resp: tonapi::RatesResponse = serde_json::from_str(json).unwrap();
        let stock = tonapi::into_stock_table(resp);

        assert_eq!(stock.price(&AssetId::Ton, FiatCurrency::USD), Some(&dec("5.25")));
        assert_eq!(stock.price(&AssetId::Ton, FiatCurrency::EUR), Some(&dec("4.8")));
        assert_eq!(
            stock.price(&AssetId::Jetton("0:abc".into()), FiatCurrency::USD),
            Some(&dec("0.9998"))
        );
        assert_eq!(
            stock.price(&AssetId::Jetton("0:def".into()), FiatCurrency::USD),
            None
        );
    }

    #[test]
    fn coingecko_response_maps_to_ton_prices() {
        let json = r#"{"the-open-network": {"usd": 5.1, "jpy": 780}}"#;
        let resp: coin_gecko::CoinGeckoResponse = serde_json::from_str(json).unwrap();
        let stock = coin_gecko::into_stock_table(resp);
        assert_eq!(stock.price(&AssetId::Ton, FiatCurrency::USD), Some(&dec("5.1")));
        assert_eq!(stock.price(&AssetId::Ton, FiatCurrency::JPY), Some(&dec("780")));
    }

    #[test]
    fn coingecko_empty_response_is_not_an_error() {
        let resp: coin_gecko::CoinGeckoResponse = serde_json::from_str("{}").unwrap();
        assert!(coin_gecko::into_stock_table(resp).is_empty());
    }
}
