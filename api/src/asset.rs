//! Identifies the asset a transfer amount is denominated in.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Decimals of the native TON coin (1 TON = 10^9 nanotons).
pub const TON_DECIMALS: u32 = 9;

/// Ticker of the native TON coin.
pub const TON_SYMBOL: &str = "TON";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseAssetError {
    #[error("asset identifier is empty")]
    Empty,
}

/// The native coin or a jetton keyed by its master address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AssetId {
    #[default]
    Ton,
    Jetton(String),
}

impl AssetId {
    pub fn is_ton(&self) -> bool {
        matches!(self, Self::Ton)
    }

    /// The identifier rate APIs expect in their `tokens` parameter.
    pub fn query_token(&self) -> &str {
        match self {
            Self::Ton => "ton",
            Self::Jetton(address) => address,
        }
    }
}

impl FromStr for AssetId {
    type Err = ParseAssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(ParseAssetError::Empty)
        } else if s.eq_ignore_ascii_case(TON_SYMBOL) {
            Ok(Self::Ton)
        } else {
            Ok(Self::Jetton(s.to_string()))
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ton => f.write_str(TON_SYMBOL),
            Self::Jetton(address) => f.write_str(address),
        }
    }
}

impl TryFrom<String> for AssetId {
    type Error = ParseAssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetId> for String {
    fn from(value: AssetId) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ton_and_jettons() {
        assert_eq!("ton".parse::<AssetId>(), Ok(AssetId::Ton));
        assert_eq!(
            "EQCxE6mUtQJKFnGfaROTKOt1lZbDiiX1kCixRv7Nw2Id_sDs".parse::<AssetId>(),
            Ok(AssetId::Jetton(
                "EQCxE6mUtQJKFnGfaROTKOt1lZbDiiX1kCixRv7Nw2Id_sDs".to_string()
            ))
        );
        assert_eq!("  ".parse::<AssetId>(), Err(ParseAssetError::Empty));
    }

    #[test]
    fn usable_as_json_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(AssetId::Jetton("0:abc".to_string()), 1);
        map.insert(AssetId::Ton, 2);
        let json = serde_json::to_string(&map).unwrap();
        let back: std::collections::HashMap<AssetId, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
