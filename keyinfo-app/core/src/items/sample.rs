use chrono::{DateTime, Duration, Utc};

use super::model::{Item, ItemColor};

struct SampleEntry {
    label: &'static str,
    value: &'static str,
    icon_name: &'static str,
    category: &'static str,
    color: ItemColor,
    favorite: bool,
}

const SAMPLE_ENTRIES: [SampleEntry; 10] = [
    SampleEntry {
        label: "Personal Email",
        value: "johndoe@example.com",
        icon_name: "envelope.fill",
        category: "Personal",
        color: ItemColor::Blue,
        favorite: true,
    },
    SampleEntry {
        label: "Work Email",
        value: "john.doe@company.com",
        icon_name: "envelope.fill",
        category: "Work",
        color: ItemColor::Blue,
        favorite: false,
    },
    SampleEntry {
        label: "Home WiFi Password",
        value: "HomeWifi2023!",
        icon_name: "lock.fill",
        category: "Home",
        color: ItemColor::Purple,
        favorite: false,
    },
    SampleEntry {
        label: "Netflix Account",
        value: "NetflixPass123",
        icon_name: "lock.fill",
        category: "Entertainment",
        color: ItemColor::Purple,
        favorite: false,
    },
    SampleEntry {
        label: "Credit Card",
        value: "1234 5678 9012 3456",
        icon_name: "creditcard.fill",
        category: "Finance",
        color: ItemColor::Green,
        favorite: true,
    },
    SampleEntry {
        label: "Passport Number",
        value: "AB123456",
        icon_name: "airplane",
        category: "Travel",
        color: ItemColor::Indigo,
        favorite: false,
    },
    SampleEntry {
        label: "Social Security",
        value: "123-45-6789",
        icon_name: "person.badge.key.fill",
        category: "Personal",
        color: ItemColor::Red,
        favorite: false,
    },
    SampleEntry {
        label: "Bank Account",
        value: "987654321",
        icon_name: "banknote.fill",
        category: "Finance",
        color: ItemColor::Teal,
        favorite: false,
    },
    SampleEntry {
        label: "Office Door Code",
        value: "4513",
        icon_name: "lock.square.fill",
        category: "Work",
        color: ItemColor::Orange,
        favorite: false,
    },
    SampleEntry {
        label: "Car Registration",
        value: "ABC123XYZ",
        icon_name: "car.fill",
        category: "Vehicle",
        color: ItemColor::Indigo,
        favorite: false,
    },
];

/// Demo entries, one day apart, the first being the oldest.
pub fn sample_items(now: DateTime<Utc>) -> Vec<Item> {
    let total = SAMPLE_ENTRIES.len() as i64;
    SAMPLE_ENTRIES
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut item = Item::new(
                entry.label,
                entry.value,
                entry.icon_name,
                entry.category,
                entry.color,
            );
            item.is_favorite = entry.favorite;
            item.date_created = now - Duration::days(total - index as i64);
            item
        })
        .collect()
}
