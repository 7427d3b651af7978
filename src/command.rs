//! Parses the driver's line commands.

use std::str::FromStr;

use api::asset::AssetId;
use api::decimal_amount::DecimalAmount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Raw text for the amount field.
    Input(String),
    Key(String),
    Focus,
    Toggle,
    /// Max with an explicit balance, or the selected asset's known one.
    Max(Option<DecimalAmount>),
    Asset(AssetId),
    Coin,
    Refresh,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument for `{0}`")]
    InvalidArgument(&'static str),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (line, None),
        };

        match name {
            "toggle" => Ok(Self::Toggle),
            "focus" => Ok(Self::Focus),
            "coin" => Ok(Self::Coin),
            "refresh" => Ok(Self::Refresh),
            "quit" | "exit" => Ok(Self::Quit),
            "key" => arg
                .map(|k| Self::Key(k.to_string()))
                .ok_or(ParseCommandError::MissingArgument("key")),
            "max" => match arg {
                None => Ok(Self::Max(None)),
                Some(balance) => balance
                    .parse()
                    .map(|b| Self::Max(Some(b)))
                    .map_err(|_| ParseCommandError::InvalidArgument("max")),
            },
            "asset" => arg
                .ok_or(ParseCommandError::MissingArgument("asset"))?
                .parse()
                .map(Self::Asset)
                .map_err(|_| ParseCommandError::InvalidArgument("asset")),
            _ if line.is_empty() || line.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
                Ok(Self::Input(line.to_string()))
            }
            _ => Err(ParseCommandError::Unknown(name.to_string())),
        }
    }
}
