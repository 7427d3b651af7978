//! Terminal driver for the transfer amount field.
//!
//! Reads one command per line from stdin and prints the field after each one.

mod command;

use std::path::Path;

use anyhow::Context;
use api::asset::AssetId;
use api::fiat_currency::FiatCurrency;
use api::jettons::JettonsBalances;
use api::prefs::display_preference::DisplayPreference;
use api::price_caching;
use api::price_map::StockTable;
use api::price_providers::PriceProviderKind;
use command::Command;
use dioxus_logger::tracing;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use ui::amount_state::StateOptions;
use ui::transfer_amount::TransferAmountInput;

/// Everything the amount field converts against.
struct Session {
    fiat: FiatCurrency,
    provider: Option<PriceProviderKind>,
    jettons: JettonsBalances,
    asset: AssetId,
    stock: StockTable,
}

impl Session {
    fn options(&self) -> StateOptions<'_> {
        StateOptions {
            fiat: self.fiat,
            jettons: &self.jettons,
            jetton: &self.asset,
            stock: Some(&self.stock),
        }
    }

    /// TON, every held jetton, and the selected asset.
    fn assets(&self) -> Vec<AssetId> {
        let mut assets: Vec<AssetId> = std::iter::once(AssetId::Ton)
            .chain(
                self.jettons
                    .balances
                    .iter()
                    .map(|j| AssetId::Jetton(j.address.clone())),
            )
            .collect();
        if !assets.contains(&self.asset) {
            assets.push(self.asset.clone());
        }
        assets
    }

    /// Loads rates, keeping the previous table when the provider fails.
    async fn load_rates(&mut self) {
        let Some(provider) = self.provider else {
            return;
        };
        match price_caching::get_cached_rates(provider, &self.assets(), &[self.fiat]).await {
            Ok(stock) => {
                tracing::info!("loaded rates for {} assets from {}", stock.assets().count(), provider.name());
                self.stock = stock;
            }
            Err(e) => tracing::warn!("rates unavailable from {}: {:#}", provider.name(), e),
        }
    }
}

fn load_jettons(path: &Path) -> anyhow::Result<JettonsBalances> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let jettons = serde_json::from_str(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(jettons)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO)?;

    let prefs = api::get_user_prefs();
    tracing::info!("prefs: {:#?}", prefs);

    let (fiat, display_as_fiat, provider) = match *prefs.display_preference() {
        DisplayPreference::CoinOnly => (FiatCurrency::default(), false, None),
        DisplayPreference::FiatEnabled {
            fiat,
            display_as_fiat,
            provider,
        } => (fiat, display_as_fiat, Some(provider)),
    };

    let jettons = match std::env::var_os("JETTONS_FILE") {
        Some(path) => load_jettons(Path::new(&path))?,
        None => JettonsBalances::default(),
    };

    let mut session = Session {
        fiat,
        provider,
        jettons,
        asset: AssetId::Ton,
        stock: StockTable::new(),
    };
    session.load_rates().await;

    let mut input = TransferAmountInput::new(session.options());
    if display_as_fiat {
        input.toggle();
    }
    println!("{}", input.summary());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Input(raw) => {
                if let Err(e) = input.on_input(&raw, session.options()) {
                    println!("{}", e);
                }
            }
            Command::Key(key) => {
                if let Err(e) = input.on_key(&key, session.options()) {
                    println!("{}", e);
                }
            }
            Command::Focus => input.on_focus(session.options()),
            Command::Toggle => {
                if !input.toggle() {
                    println!("no {} rate available", session.fiat.code());
                }
            }
            Command::Max(balance) => {
                match balance.as_ref().or(session.jettons.balance_of(&session.asset)) {
                    Some(balance) => input.use_max(balance, session.options()),
                    None => println!("no known balance for {}, use `max <balance>`", session.asset),
                }
            }
            Command::Asset(asset) => {
                session.asset = asset;
                if session.stock.prices(&session.asset).is_none() {
                    session.load_rates().await;
                }
                input.select_asset(session.options());
            }
            Command::Coin => println!("coin amount: {}", input.coin_amount()),
            Command::Refresh => {
                price_caching::invalidate_rates().await;
                session.load_rates().await;
            }
            Command::Quit => break,
        }
        println!("{}", input.summary());
    }

    Ok(())
}
