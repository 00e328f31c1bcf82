//! In-process item records.
//!
//! Two independent maps: `saved` receives whole records from
//! `PUT /json/items/{id}`; `patchable` is pre-seeded and updated field by
//! field through `PATCH /patching_items/{item_id}`.

use std::sync::Arc;
use dashmap::DashMap;
use serde::Serialize;

use crate::models::{ItemFake, ItemFakePatch};

/// Fixed list served by the paginated item listings.
pub const FAKE_ITEM_NAMES: [&str; 3] = ["Foo", "Bar", "Baz"];

/// One entry of the paginated item listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedItem {
    pub item_name: &'static str,
}

/// The items between `skip` and `skip + limit`.
///
/// Both bounds follow sequence-slice rules: a negative bound counts back
/// from the end, and anything past either end is clamped.
pub fn fake_items(skip: i64, limit: i64) -> Vec<NamedItem> {
    let start = slice_bound(skip, FAKE_ITEM_NAMES.len());
    let stop = slice_bound(skip.saturating_add(limit), FAKE_ITEM_NAMES.len());
    if start >= stop {
        return Vec::new();
    }
    FAKE_ITEM_NAMES[start..stop]
        .iter()
        .map(|&item_name| NamedItem { item_name })
        .collect()
}

fn slice_bound(index: i64, len: usize) -> usize {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    index.clamp(0, len) as usize
}

#[derive(Clone)]
pub struct ItemStore {
    saved: Arc<DashMap<String, ItemFake>>,
    patchable: Arc<DashMap<String, ItemFake>>,
}

impl ItemStore {
    /// Empty `saved` map; `patchable` seeded with `foo`, `bar` and `baz`.
    pub fn seeded() -> Self {
        let patchable = DashMap::new();
        patchable.insert(
            "foo".to_string(),
            ItemFake {
                name: Some("Foo".into()),
                price: Some(50.2),
                ..ItemFake::default()
            },
        );
        patchable.insert(
            "bar".to_string(),
            ItemFake {
                name: Some("Bar".into()),
                description: Some("The bartenders".into()),
                price: Some(62.0),
                tax: 20.2,
                tags: Vec::new(),
            },
        );
        patchable.insert(
            "baz".to_string(),
            ItemFake {
                name: Some("Baz".into()),
                description: None,
                price: Some(50.2),
                tax: 10.5,
                tags: Vec::new(),
            },
        );

        Self {
            saved: Arc::new(DashMap::new()),
            patchable: Arc::new(patchable),
        }
    }

    /// Store `item` under `id`, replacing any previous record.
    pub fn save(&self, id: String, item: ItemFake) {
        self.saved.insert(id, item);
    }

    pub fn saved(&self, id: &str) -> Option<ItemFake> {
        self.saved.get(id).map(|r| r.value().clone())
    }

    /// Apply `patch` to the record under `id` and return the merged record.
    /// `None` when no such record exists.
    pub fn patch(&self, id: &str, patch: ItemFakePatch) -> Option<ItemFake> {
        let mut entry = self.patchable.get_mut(id)?;
        let merged = entry.merged(patch);
        *entry = merged.clone();
        Some(merged)
    }

    pub fn patchable(&self, id: &str) -> Option<ItemFake> {
        self.patchable.get(id).map(|r| r.value().clone())
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_items_slicing() {
        assert_eq!(fake_items(0, 100).len(), 3);
        assert_eq!(fake_items(1, 1), vec![NamedItem { item_name: "Bar" }]);
        assert!(fake_items(5, 10).is_empty());
        assert!(fake_items(0, 0).is_empty());
    }

    #[test]
    fn test_fake_items_negative_bounds() {
        // [-1:99] keeps the last item only.
        assert_eq!(fake_items(-1, 100), vec![NamedItem { item_name: "Baz" }]);
        // [-3:-1] drops the last item.
        assert_eq!(
            fake_items(-3, 2),
            vec![NamedItem { item_name: "Foo" }, NamedItem { item_name: "Bar" }]
        );
        // [0:-1] stops one short of the end.
        assert_eq!(fake_items(0, -1).len(), 2);
        // [-10:-8] lies entirely before the start.
        assert!(fake_items(-10, 2).is_empty());
        assert!(fake_items(2, -5).is_empty());
        assert!(fake_items(i64::MAX, i64::MAX).is_empty());
    }

    #[test]
    fn test_patch_persists() {
        let store = ItemStore::seeded();
        let patch = ItemFakePatch {
            tags: Some(vec!["new".into()]),
            ..ItemFakePatch::default()
        };

        let merged = store.patch("foo", patch).unwrap();
        assert_eq!(merged.tags, vec!["new".to_string()]);
        assert_eq!(merged.price, Some(50.2));
        assert_eq!(store.patchable("foo"), Some(merged));
    }

    #[test]
    fn test_patch_unknown() {
        let store = ItemStore::seeded();
        assert!(store.patch("qux", ItemFakePatch::default()).is_none());
    }

    #[test]
    fn test_save_replaces() {
        let store = ItemStore::seeded();
        store.save("a".into(), ItemFake::default());
        store.save("a".into(), ItemFake { name: Some("A".into()), ..ItemFake::default() });
        assert_eq!(store.saved("a").unwrap().name.as_deref(), Some("A"));
        assert!(store.saved("b").is_none());
    }
}
