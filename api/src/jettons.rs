//! Jetton balances and metadata as known to the wallet.

use serde::Deserialize;
use serde::Serialize;

use crate::asset::AssetId;
use crate::decimal_amount::DecimalAmount;
use crate::price_map::PriceMap;

/// One jetton held by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonBalance {
    /// Jetton master address.
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Balance in whole jettons.
    #[serde(default)]
    pub balance: DecimalAmount,
    /// Quotes delivered together with the balance, if any.
    #[serde(default)]
    pub price: Option<PriceMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonsBalances {
    pub balances: Vec<JettonBalance>,
}

impl JettonsBalances {
    /// Finds a jetton by master address. Addresses compare case-insensitively.
    pub fn find(&self, address: &str) -> Option<&JettonBalance> {
        self.balances
            .iter()
            .find(|b| b.address.eq_ignore_ascii_case(address))
    }

    /// Known balance of `asset`. TON is not a jetton and has none here.
    pub fn balance_of(&self, asset: &AssetId) -> Option<&DecimalAmount> {
        match asset {
            AssetId::Ton => None,
            AssetId::Jetton(address) => self.find(address).map(|b| &b.balance),
        }
    }
}
