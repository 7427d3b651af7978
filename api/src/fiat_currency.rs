//! Defines the fiat currencies the wallet can show amounts in.

use serde::Deserialize;
use serde::Serialize;

/// A fiat currency, with its code, symbol and formatting rules.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    #[default]
    USD,
    EUR,
    RUB,
    AED,
    UAH,
    KZT,
    UZS,
    GBP,
    CHF,
    CNY,
    KRW,
    IDR,
    INR,
    JPY,
    CAD,
    ARS,
    BYN,
    COP,
    ETB,
    ILS,
    KES,
    NGN,
    UGX,
    VES,
    ZAR,
    TRY,
    THB,
    VND,
    BRL,
    GEL,
    BDT,
}

impl FiatCurrency {
    /// Number of fractional digits shown for the currency.
    pub fn decimals(&self) -> u32 {
        match self {
            Self::JPY | Self::KRW | Self::VND | Self::UGX | Self::IDR => 0,
            _ => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::RUB => "₽",
            Self::AED => "د.إ",
            Self::UAH => "₴",
            Self::KZT => "₸",
            Self::UZS => "sum",
            Self::GBP => "£",
            Self::CHF => "₣",
            Self::CNY => "¥",
            Self::KRW => "₩",
            Self::IDR => "Rp",
            Self::INR => "₹",
            Self::JPY => "¥",
            Self::CAD => "$",
            Self::ARS => "$",
            Self::BYN => "Br",
            Self::COP => "$",
            Self::ETB => "Br",
            Self::ILS => "₪",
            Self::KES => "KSh",
            Self::NGN => "₦",
            Self::UGX => "USh",
            Self::VES => "Bs.",
            Self::ZAR => "R",
            Self::TRY => "₺",
            Self::THB => "฿",
            Self::VND => "₫",
            Self::BRL => "R$",
            Self::GEL => "₾",
            Self::BDT => "৳",
        }
    }

    /// The ISO 4217 code (e.g., "USD"). This is the symbol amount fields
    /// carry when showing fiat values.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::USD => "United States Dollar",
            Self::EUR => "Euro",
            Self::RUB => "Russian Ruble",
            Self::AED => "United Arab Emirates Dirham",
            Self::UAH => "Ukrainian Hryvnia",
            Self::KZT => "Kazakhstani Tenge",
            Self::UZS => "Uzbekistani Som",
            Self::GBP => "Great British Pound",
            Self::CHF => "Swiss Franc",
            Self::CNY => "Chinese Yuan",
            Self::KRW => "South Korean Won",
            Self::IDR => "Indonesian Rupiah",
            Self::INR => "Indian Rupee",
            Self::JPY => "Japanese Yen",
            Self::CAD => "Canadian Dollar",
            Self::ARS => "Argentine Peso",
            Self::BYN => "Belarusian Ruble",
            Self::COP => "Colombian Peso",
            Self::ETB => "Ethiopian Birr",
            Self::ILS => "Israeli New Shekel",
            Self::KES => "Kenyan Shilling",
            Self::NGN => "Nigerian Naira",
            Self::UGX => "Ugandan Shilling",
            Self::VES => "Venezuelan Bolívar",
            Self::ZAR => "South African Rand",
            Self::TRY => "Turkish Lira",
            Self::THB => "Thai Baht",
            Self::VND => "Vietnamese Đồng",
            Self::BRL => "Brazilian Real",
            Self::GEL => "Georgian Lari",
            Self::BDT => "Bangladeshi Taka",
        }
    }
}
