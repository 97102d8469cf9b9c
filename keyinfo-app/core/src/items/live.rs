//! Keeps the derived list in step with the store and the list options.

use futures::stream::{self, Stream, StreamExt};
use tokio::sync::watch;
use tracing::trace;

use super::list::{ListEngine, ListOptions, ListView};
use super::model::Item;

/// Re-derives the [`ListView`] whenever the committed items or the list
/// options change.
pub struct ListProjection {
    items: watch::Receiver<Vec<Item>>,
    options: watch::Receiver<ListOptions>,
}

impl ListProjection {
    pub fn new(items: watch::Receiver<Vec<Item>>, options: watch::Receiver<ListOptions>) -> Self {
        Self { items, options }
    }

    pub fn current(&self) -> ListView {
        let items = self.items.borrow();
        let options = self.options.borrow();
        ListEngine::derive(&items, &options)
    }

    pub fn options(&self) -> ListOptions {
        self.options.borrow().clone()
    }

    /// Wait for the next change on either input and return the fresh view.
    /// Returns `None` once both inputs have been dropped.
    pub async fn changed(&mut self) -> Option<ListView> {
        let mut items_open = true;
        let mut options_open = true;

        while items_open || options_open {
            tokio::select! {
                res = self.items.changed(), if items_open => match res {
                    Ok(()) => {
                        self.items.borrow_and_update();
                        trace!("List projection: items changed");
                        return Some(self.current());
                    }
                    Err(_) => items_open = false,
                },
                res = self.options.changed(), if options_open => match res {
                    Ok(()) => {
                        self.options.borrow_and_update();
                        trace!("List projection: options changed");
                        return Some(self.current());
                    }
                    Err(_) => options_open = false,
                },
            }
        }
        None
    }

    /// The current view followed by every subsequent re-derivation.
    pub fn into_stream(self) -> impl Stream<Item = ListView> {
        let first = self.current();
        stream::once(async move { first }).chain(stream::unfold(self, |mut projection| async move {
            projection
                .changed()
                .await
                .map(|view| (view, projection))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemColor, SortOption};

    fn item(label: &str, category: &str) -> Item {
        Item::new(label, "v", "doc.fill", category, ItemColor::Blue)
    }

    #[tokio::test]
    async fn test_follows_item_changes() {
        let (items_tx, items_rx) = watch::channel(vec![item("A", "Home")]);
        let (_options_tx, options_rx) = watch::channel(ListOptions::default());
        let mut projection = ListProjection::new(items_rx, options_rx);

        assert_eq!(projection.current().rows().len(), 1);

        items_tx.send_replace(vec![item("A", "Home"), item("B", "Work")]);
        let view = projection.changed().await.unwrap();
        assert_eq!(view.sections().len(), 2);
    }

    #[tokio::test]
    async fn test_follows_option_changes() {
        let (_items_tx, items_rx) = watch::channel(vec![item("Wifi", "Home"), item("Bank", "Finance")]);
        let (options_tx, options_rx) = watch::channel(ListOptions::default());
        let mut projection = ListProjection::new(items_rx, options_rx);

        options_tx.send_modify(|o| {
            o.group_by_category = false;
            o.search_text = "wifi".into();
            o.sort = SortOption::Category;
        });

        let view = projection.changed().await.unwrap();
        let labels: Vec<_> = view.rows().iter().map(|i| i.label.clone()).collect();
        assert_eq!(labels, vec!["Wifi"]);
    }

    #[tokio::test]
    async fn test_stream_ends_when_inputs_close() {
        let (items_tx, items_rx) = watch::channel(vec![]);
        let (options_tx, options_rx) = watch::channel(ListOptions::default());
        let stream = ListProjection::new(items_rx, options_rx).into_stream();

        items_tx.send_replace(vec![item("A", "Home")]);
        drop(items_tx);
        drop(options_tx);

        let views: Vec<ListView> = stream.collect().await;
        assert_eq!(views.len(), 2);
        assert!(views[0].is_empty());
        assert_eq!(views[1].rows().len(), 1);
    }
}
