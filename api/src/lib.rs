//! Shared wallet data types, rate providers and caching.

pub mod asset;
pub mod decimal_amount;
pub mod fiat_currency;
pub mod jettons;
pub mod prefs;
pub mod price_caching;
pub mod price_map;
pub mod price_providers;
pub mod query_cache;

use prefs::user_prefs::UserPrefs;

pub type ApiError = anyhow::Error;

/// Retrieves the user's preferences.
///
/// In the future this may read from a settings file.  For now it just
/// returns the default settings, which read from env vars.
pub fn get_user_prefs() -> UserPrefs {
    UserPrefs::default()
}
