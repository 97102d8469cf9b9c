pub mod editor;
pub mod kind;
pub mod list;
pub mod live;
pub mod model;
pub mod sample;

pub use editor::{ItemEdit, ItemEditor, NewItem, ValidationError};
pub use kind::{ItemKind, KindDefaults, UnknownKind};
pub use list::{
    EmptyState, ListEngine, ListOptions, ListView, Section, SectionKind, SortOption,
    FAVORITES_SECTION,
};
pub use live::ListProjection;
pub use model::{Item, ItemColor, ItemId, DEFAULT_CATEGORY, DEFAULT_ICON};
pub use sample::sample_items;
