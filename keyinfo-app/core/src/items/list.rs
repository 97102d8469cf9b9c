//! Derivation of the visible item list.
//!
//! The pipeline is fixed: favorite-first sort, search filter, then optional
//! grouping. Every call recomputes from the raw collection.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::model::Item;

/// Title of the synthetic bucket holding every favorite.
pub const FAVORITES_SECTION: &str = "Favorites";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    Label,
    DateCreated,
    Category,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [
        SortOption::Label,
        SortOption::DateCreated,
        SortOption::Category,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Label => "Label",
            Self::DateCreated => "Date Added",
            Self::Category => "Category",
        }
    }

    /// Ordering inside a single favorite-status tier.
    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            Self::Label => a.label.cmp(&b.label),
            Self::DateCreated => b.date_created.cmp(&a.date_created),
            Self::Category => a
                .category
                .cmp(&b.category)
                .then_with(|| a.label.cmp(&b.label)),
        }
    }

    /// Ordering inside a category bucket, where sorting by category is
    /// meaningless and label takes over.
    fn compare_within_category(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            Self::Category => a.label.cmp(&b.label),
            other => other.compare(a, b),
        }
    }
}

/// User-selected options that shape the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    pub sort: SortOption,
    pub group_by_category: bool,
    pub search_text: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            sort: SortOption::default(),
            group_by_category: true,
            search_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum SectionKind {
    Favorites,
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub items: Vec<Item>,
}

impl Section {
    pub fn title(&self) -> &str {
        match &self.kind {
            SectionKind::Favorites => FAVORITES_SECTION,
            SectionKind::Category(name) => name,
        }
    }
}

/// Why a derived view has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmptyState {
    NoItems,
    NoResults { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "content", rename_all = "snake_case")]
pub enum ListView {
    Flat(Vec<Item>),
    Grouped(Vec<Section>),
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(items) => items.is_empty(),
            Self::Grouped(sections) => sections.iter().all(|s| s.items.is_empty()),
        }
    }

    pub fn sections(&self) -> &[Section] {
        match self {
            Self::Flat(_) => &[],
            Self::Grouped(sections) => sections,
        }
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections().iter().find(|s| s.title() == title)
    }

    /// Every rendered row in display order. Favorites are listed twice when
    /// grouped.
    pub fn rows(&self) -> Vec<&Item> {
        match self {
            Self::Flat(items) => items.iter().collect(),
            Self::Grouped(sections) => sections.iter().flat_map(|s| s.items.iter()).collect(),
        }
    }

    pub fn empty_state(&self, options: &ListOptions) -> Option<EmptyState> {
        if !self.is_empty() {
            return None;
        }
        if options.search_text.is_empty() {
            Some(EmptyState::NoItems)
        } else {
            Some(EmptyState::NoResults {
                query: options.search_text.clone(),
            })
        }
    }
}

fn favorite_first(a: &Item, b: &Item) -> Ordering {
    b.is_favorite.cmp(&a.is_favorite)
}

pub struct ListEngine;

impl ListEngine {
    /// Derive the visible view from the raw collection.
    pub fn derive(items: &[Item], options: &ListOptions) -> ListView {
        let visible = Self::sorted_and_filtered(items, options);

        if options.group_by_category {
            ListView::Grouped(Self::group(visible, options.sort))
        } else {
            ListView::Flat(visible)
        }
    }

    /// Steps 1-3: favorite priority, sort option, then search filter.
    pub fn sorted_and_filtered(items: &[Item], options: &ListOptions) -> Vec<Item> {
        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| favorite_first(a, b).then_with(|| options.sort.compare(a, b)));

        if options.search_text.is_empty() {
            return sorted;
        }

        let needle = options.search_text.to_lowercase();
        sorted.retain(|item| item.matches(&needle));
        sorted
    }

    fn group(visible: Vec<Item>, sort: SortOption) -> Vec<Section> {
        let favorites: Vec<Item> = visible.iter().filter(|i| i.is_favorite).cloned().collect();

        let mut by_category: BTreeMap<String, Vec<Item>> = BTreeMap::new();
        for item in visible {
            by_category.entry(item.category.clone()).or_default().push(item);
        }

        let mut sections = Vec::with_capacity(by_category.len() + 1);
        if !favorites.is_empty() {
            sections.push(Section {
                kind: SectionKind::Favorites,
                items: favorites,
            });
        }

        for (category, mut items) in by_category {
            items.sort_by(|a, b| {
                favorite_first(a, b).then_with(|| sort.compare_within_category(a, b))
            });
            sections.push(Section {
                kind: SectionKind::Category(category),
                items,
            });
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::model::ItemColor;
    use chrono::{Duration, Utc};

    fn item(label: &str, value: &str, category: &str, favorite: bool, age_days: i64) -> Item {
        let mut item = Item::new(label, value, "doc.fill", category, ItemColor::Blue);
        item.is_favorite = favorite;
        item.date_created = Utc::now() - Duration::days(age_days);
        item
    }

    fn labels(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.label.clone()).collect()
    }

    fn flat(sort: SortOption, search: &str) -> ListOptions {
        ListOptions {
            sort,
            group_by_category: false,
            search_text: search.to_string(),
        }
    }

    #[test]
    fn test_favorites_sort_to_top_in_flat_view() {
        let items = vec![
            item("Alpha", "1", "Work", false, 3),
            item("Zulu", "2", "Work", true, 2),
            item("Bravo", "3", "Home", false, 1),
        ];

        let view = ListEngine::derive(&items, &flat(SortOption::Label, ""));
        assert_eq!(labels(&view.rows()), vec!["Zulu", "Alpha", "Bravo"]);
    }

    #[test]
    fn test_sort_by_date_is_newest_first() {
        let items = vec![
            item("Old", "1", "A", false, 10),
            item("New", "2", "A", false, 1),
            item("Mid", "3", "A", false, 5),
        ];

        let view = ListEngine::derive(&items, &flat(SortOption::DateCreated, ""));
        assert_eq!(labels(&view.rows()), vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_sort_by_category_falls_back_to_label() {
        let items = vec![
            item("Wifi", "1", "Home", false, 1),
            item("Alarm", "2", "Home", false, 2),
            item("Badge", "3", "Finance", false, 3),
        ];

        let view = ListEngine::derive(&items, &flat(SortOption::Category, ""));
        assert_eq!(labels(&view.rows()), vec!["Badge", "Alarm", "Wifi"]);
    }

    #[test]
    fn test_label_sort_is_case_sensitive() {
        let items = vec![item("apple", "1", "A", false, 1), item("Banana", "2", "A", false, 2)];

        let view = ListEngine::derive(&items, &flat(SortOption::Label, ""));
        assert_eq!(labels(&view.rows()), vec!["Banana", "apple"]);
    }

    #[test]
    fn test_search_matches_label_value_and_category() {
        let items = vec![
            item("Netflix", "pw", "Entertainment", false, 1),
            item("Bank", "987654321", "Finance", false, 2),
            item("Internet", "router", "Home", false, 3),
        ];

        let view = ListEngine::derive(&items, &flat(SortOption::Label, "net"));
        assert_eq!(labels(&view.rows()), vec!["Internet", "Netflix"]);

        let by_value = ListEngine::derive(&items, &flat(SortOption::Label, "ROUTER"));
        assert_eq!(labels(&by_value.rows()), vec!["Internet"]);

        let by_category = ListEngine::derive(&items, &flat(SortOption::Label, "fin"));
        assert_eq!(labels(&by_category.rows()), vec!["Bank"]);
    }

    #[test]
    fn test_grouped_view_duplicates_favorites() {
        let card = item("Credit Card", "1234", "Finance", true, 1);
        let card_id = card.id;
        let items = vec![
            card,
            item("Bank", "9876", "Finance", false, 2),
            item("Wifi", "abc", "Home", false, 3),
        ];

        let view = ListEngine::derive(&items, &ListOptions::default());
        let titles: Vec<_> = view.sections().iter().map(|s| s.title().to_string()).collect();
        assert_eq!(titles, vec!["Favorites", "Finance", "Home"]);

        let count_in = |title: &str| {
            view.section(title)
                .unwrap()
                .items
                .iter()
                .filter(|i| i.id == card_id)
                .count()
        };
        assert_eq!(count_in("Favorites"), 1);
        assert_eq!(count_in("Finance"), 1);
        assert_eq!(count_in("Home"), 0);
    }

    #[test]
    fn test_grouped_view_omits_empty_favorites() {
        let items = vec![item("Wifi", "abc", "Home", false, 1)];

        let view = ListEngine::derive(&items, &ListOptions::default());
        assert_eq!(view.sections().len(), 1);
        assert_eq!(view.sections()[0].title(), "Home");
    }

    #[test]
    fn test_category_buckets_use_label_when_sorting_by_category() {
        let items = vec![
            item("Zeta", "1", "Home", false, 3),
            item("Alpha", "2", "Home", false, 1),
            item("Mu", "3", "Home", true, 2),
        ];
        let options = ListOptions {
            sort: SortOption::Category,
            ..ListOptions::default()
        };

        let view = ListEngine::derive(&items, &options);
        let home = view.section("Home").unwrap();
        let rows: Vec<&Item> = home.items.iter().collect();
        assert_eq!(labels(&rows), vec!["Mu", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_empty_states() {
        let empty = ListEngine::derive(&[], &ListOptions::default());
        assert_eq!(empty.empty_state(&ListOptions::default()), Some(EmptyState::NoItems));

        let items = vec![item("Wifi", "abc", "Home", false, 1)];
        let options = flat(SortOption::Label, "zzz");
        let none = ListEngine::derive(&items, &options);
        assert_eq!(
            none.empty_state(&options),
            Some(EmptyState::NoResults {
                query: "zzz".into()
            })
        );
    }
}

#[cfg(test)]
mod proptest_list {
    use super::*;
    use crate::items::model::{ItemColor, ItemId};
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            "[A-Za-z]{1,6}",
            "[a-z0-9]{1,6}",
            prop::sample::select(vec!["Home", "Work", "Finance", "home"]),
            any::<bool>(),
            0i64..10_000,
        )
            .prop_map(|(label, value, category, favorite, minutes)| {
                let mut item = Item::new(label, value, "doc.fill", category, ItemColor::Blue);
                item.is_favorite = favorite;
                item.date_created = Utc.timestamp_opt(1_700_000_000, 0).unwrap()
                    + Duration::minutes(minutes);
                item
            })
    }

    fn arb_sort() -> impl Strategy<Value = SortOption> {
        prop::sample::select(SortOption::ALL.to_vec())
    }

    fn no_favorite_after_plain(items: &[Item]) -> bool {
        let first_plain = items.iter().position(|i| !i.is_favorite).unwrap_or(items.len());
        items[first_plain..].iter().all(|i| !i.is_favorite)
    }

    proptest! {
        #[test]
        fn favorites_never_follow_non_favorites(
            items in prop::collection::vec(arb_item(), 0..24),
            sort in arb_sort(),
            grouped in any::<bool>(),
        ) {
            let options = ListOptions { sort, group_by_category: grouped, search_text: String::new() };
            match ListEngine::derive(&items, &options) {
                ListView::Flat(rows) => prop_assert!(no_favorite_after_plain(&rows)),
                ListView::Grouped(sections) => {
                    for section in sections {
                        prop_assert!(no_favorite_after_plain(&section.items));
                    }
                }
            }
        }

        #[test]
        fn filter_keeps_exactly_the_matching_items(
            items in prop::collection::vec(arb_item(), 0..24),
            search in "[a-zA-Z0-9]{0,3}",
            sort in arb_sort(),
        ) {
            let options = ListOptions { sort, group_by_category: false, search_text: search.clone() };
            let kept = ListEngine::sorted_and_filtered(&items, &options);
            let needle = search.to_lowercase();

            for item in &kept {
                prop_assert!(search.is_empty() || item.matches(&needle));
            }
            for item in items.iter().filter(|i| !kept.iter().any(|k| k.id == i.id)) {
                prop_assert!(!search.is_empty() && !item.matches(&needle));
            }
        }

        #[test]
        fn grouping_lists_each_favorite_twice(
            items in prop::collection::vec(arb_item(), 0..24),
            sort in arb_sort(),
        ) {
            let view = ListEngine::derive(&items, &ListOptions { sort, ..ListOptions::default() });
            for item in items.iter().filter(|i| i.is_favorite) {
                let in_favorites = view
                    .section(FAVORITES_SECTION)
                    .map(|s| s.items.iter().filter(|i| i.id == item.id).count())
                    .unwrap_or(0);
                let in_category = view
                    .sections()
                    .iter()
                    .filter(|s| s.kind == SectionKind::Category(item.category.clone()))
                    .flat_map(|s| s.items.iter())
                    .filter(|i| i.id == item.id)
                    .count();
                prop_assert_eq!(in_favorites, 1);
                prop_assert_eq!(in_category, 1);
            }
            let plain_rows = view.rows().len();
            let favorites = items.iter().filter(|i| i.is_favorite).count();
            prop_assert_eq!(plain_rows, items.len() + favorites);
        }

        #[test]
        fn favorites_section_keeps_pipeline_order(
            items in prop::collection::vec(arb_item(), 0..24),
            search in "[a-zA-Z0-9]{0,2}",
        ) {
            for sort in SortOption::ALL {
                let options = ListOptions { sort, group_by_category: true, search_text: search.clone() };
                let expected: Vec<ItemId> = ListEngine::sorted_and_filtered(&items, &options)
                    .into_iter()
                    .filter(|i| i.is_favorite)
                    .map(|i| i.id)
                    .collect();

                let view = ListEngine::derive(&items, &options);
                let actual: Vec<ItemId> = view
                    .section(FAVORITES_SECTION)
                    .map(|s| s.items.iter().map(|i| i.id).collect())
                    .unwrap_or_default();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
