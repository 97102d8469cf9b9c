//! Semantic item kinds and the defaults they suggest.
//!
//! A kind only pre-fills icon, category and color on the add path. Callers can
//! override every suggested field, and category and color stay editable later.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::model::{ItemColor, DEFAULT_CATEGORY, DEFAULT_ICON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    DriverLicense,
    PpsNumber,
    Eircode,
    LockerCode,
    Passport,
    BankAccount,
    CreditCard,
    WifiPassword,
    EmailAccount,
    PhoneNumber,
    Insurance,
    Membership,
    Custom,
}

/// Icon, category and color suggested for a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDefaults {
    pub icon_name: &'static str,
    pub category: &'static str,
    pub color: ItemColor,
}

impl ItemKind {
    pub const ALL: [ItemKind; 13] = [
        ItemKind::DriverLicense,
        ItemKind::PpsNumber,
        ItemKind::Eircode,
        ItemKind::LockerCode,
        ItemKind::Passport,
        ItemKind::BankAccount,
        ItemKind::CreditCard,
        ItemKind::WifiPassword,
        ItemKind::EmailAccount,
        ItemKind::PhoneNumber,
        ItemKind::Insurance,
        ItemKind::Membership,
        ItemKind::Custom,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DriverLicense => "Driver License",
            Self::PpsNumber => "PPS Number",
            Self::Eircode => "Eircode",
            Self::LockerCode => "Locker Code",
            Self::Passport => "Passport",
            Self::BankAccount => "Bank Account",
            Self::CreditCard => "Credit Card",
            Self::WifiPassword => "WiFi Password",
            Self::EmailAccount => "Email Account",
            Self::PhoneNumber => "Phone Number",
            Self::Insurance => "Insurance",
            Self::Membership => "Membership",
            Self::Custom => "Custom",
        }
    }

    pub fn defaults(&self) -> KindDefaults {
        use ItemColor::*;

        let (icon_name, category, color) = match self {
            Self::DriverLicense => ("car.fill", "Personal", Blue),
            Self::PpsNumber => ("person.text.rectangle.fill", "Personal", Blue),
            Self::Passport => ("airplane", "Personal", Blue),
            Self::Eircode => ("house.fill", "Home", Orange),
            Self::WifiPassword => ("wifi", "Home", Orange),
            Self::LockerCode => ("lock.fill", "Security", Red),
            Self::BankAccount => ("banknote.fill", "Financial", Green),
            Self::CreditCard => ("creditcard.fill", "Financial", Green),
            Self::Insurance => ("checkmark.shield.fill", "Financial", Red),
            Self::EmailAccount => ("envelope.fill", "Contact", Teal),
            Self::PhoneNumber => ("phone.fill", "Contact", Teal),
            Self::Membership => ("person.2.fill", "Membership", Purple),
            Self::Custom => (DEFAULT_ICON, DEFAULT_CATEGORY, Blue),
        };

        KindDefaults {
            icon_name,
            category,
            color,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown item kind: {0}")]
pub struct UnknownKind(pub String);

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for ItemKind {
    type Err = UnknownKind;

    /// Accepts display names and snake_case names, ignoring case and
    /// separators. `"email"` and `"wifi"` are accepted as shorthands.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize(s);
        match wanted.as_str() {
            "email" => return Ok(Self::EmailAccount),
            "wifi" => return Ok(Self::WifiPassword),
            "phone" => return Ok(Self::PhoneNumber),
            _ => {}
        }

        Self::ALL
            .into_iter()
            .find(|kind| normalize(kind.display_name()) == wanted)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
