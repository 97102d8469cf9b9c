use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category assigned when the caller does not pick one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Icon used for items without a recognized kind.
pub const DEFAULT_ICON: &str = "doc.fill";

/// Stable identity of a stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The fixed color palette an item can be tagged with.
///
/// Names outside the palette resolve to [`ItemColor::Blue`], both when parsed
/// from user input and when read back from disk.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemColor {
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Cyan,
    #[default]
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
}

impl ItemColor {
    /// Palette in the order the color picker presents it.
    pub const PALETTE: [ItemColor; 12] = [
        ItemColor::Blue,
        ItemColor::Red,
        ItemColor::Green,
        ItemColor::Orange,
        ItemColor::Purple,
        ItemColor::Teal,
        ItemColor::Pink,
        ItemColor::Yellow,
        ItemColor::Indigo,
        ItemColor::Mint,
        ItemColor::Cyan,
        ItemColor::Brown,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "orange" => Self::Orange,
            "yellow" => Self::Yellow,
            "green" => Self::Green,
            "mint" => Self::Mint,
            "teal" => Self::Teal,
            "cyan" => Self::Cyan,
            "blue" => Self::Blue,
            "indigo" => Self::Indigo,
            "purple" => Self::Purple,
            "pink" => Self::Pink,
            "brown" => Self::Brown,
            _ => Self::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Mint => "mint",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Brown => "brown",
        }
    }
}

impl From<String> for ItemColor {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ItemColor> for String {
    fn from(color: ItemColor) -> Self {
        color.name().to_string()
    }
}

impl fmt::Display for ItemColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single stored label/value secret.
///
/// `id` and `date_created` are fixed at construction. Only the editor mutates
/// the remaining fields, and only after the change has been persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    pub value: String,
    pub icon_name: String,
    pub category: String,
    pub color: ItemColor,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Item {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        icon_name: impl Into<String>,
        category: impl Into<String>,
        color: ItemColor,
    ) -> Self {
        Self {
            id: ItemId::new(),
            label: label.into(),
            value: value.into(),
            icon_name: icon_name.into(),
            category: category.into(),
            color,
            date_created: Utc::now(),
            is_favorite: false,
        }
    }

    /// Case-insensitive substring match over label, value and category.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.label.to_lowercase().contains(needle_lowercase)
            || self.value.to_lowercase().contains(needle_lowercase)
            || self.category.to_lowercase().contains(needle_lowercase)
    }
}

// The secret value never reaches log output.
impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("value", &"[REDACTED]")
            .field("icon_name", &self.icon_name)
            .field("category", &self.category)
            .field("color", &self.color)
            .field("date_created", &self.date_created)
            .field("is_favorite", &self.is_favorite)
            .finish()
    }
}
