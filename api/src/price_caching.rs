//! Handles the caching logic for external price provider data.

use std::time::Duration;

use tokio::sync::OnceCell;

use crate::asset::AssetId;
use crate::fiat_currency::FiatCurrency;
use crate::price_map::StockTable;
use crate::price_providers::PriceProvider;
use crate::price_providers::PriceProviderKind;
use crate::query_cache::QueryCache;
use crate::query_cache::QueryKey;
use crate::query_cache::QueryTag;
use crate::ApiError;

const CACHE_DURATION: Duration = Duration::from_secs(60);

async fn rates_cache() -> &'static QueryCache<StockTable> {
    static CACHE: OnceCell<QueryCache<StockTable>> = OnceCell::const_new();
    CACHE
        .get_or_init(|| async { QueryCache::new(CACHE_DURATION) })
        .await
}

fn rates_key(
    provider: PriceProviderKind,
    assets: &[AssetId],
    currencies: &[FiatCurrency],
) -> QueryKey {
    let mut key = QueryKey::new(QueryTag::Rates).param(provider.name());
    for asset in assets {
        key = key.param(asset);
    }
    for currency in currencies {
        key = key.param(currency.code());
    }
    key
}

/// Retrieves rates for `assets`, using a lazy, time-based cache.
///
/// The provider is only called when no fresh table for the same provider,
/// assets and currencies exists.
pub async fn get_cached_rates(
    provider: PriceProviderKind,
    assets: &[AssetId],
    currencies: &[FiatCurrency],
) -> Result<StockTable, ApiError> {
    let key = rates_key(provider, assets, currencies);
    rates_cache()
        .await
        .get_or_fetch(key, || provider.get_prices(assets, currencies))
        .await
}

/// Forgets every cached rate table. The next request goes to the provider.
pub async fn invalidate_rates() -> usize {
    rates_cache().await.invalidate(QueryTag::Rates).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_separates_providers_and_queries() {
        let a = rates_key(PriceProviderKind::TonApi, &[AssetId::Ton], &[FiatCurrency::USD]);
        let b = rates_key(PriceProviderKind::CoinGecko, &[AssetId::Ton], &[FiatCurrency::USD]);
        let c = rates_key(PriceProviderKind::TonApi, &[AssetId::Ton], &[FiatCurrency::EUR]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.tag, QueryTag::Rates);
        assert_eq!(a.params, vec!["TonApi", "TON", "USD"]);
    }
}
