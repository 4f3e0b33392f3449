use crate::{common, store};

use aws_sdk_dynamodb::types;
use std::{collections, sync};

/// Books kept in a mutex-guarded map, keyed by ISBN.
///
/// Mirrors the conditional semantics of [`store::DynamoStore`] and counts
/// every call, so callers can tell whether the store was reached at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
    calls: sync::atomic::AtomicUsize,
    items: sync::Mutex<collections::BTreeMap<String, common::Item>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(sync::atomic::Ordering::SeqCst)
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no item is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> sync::MutexGuard<'_, collections::BTreeMap<String, common::Item>> {
        self.items
            .lock()
            .unwrap_or_else(sync::PoisonError::into_inner)
    }

    fn record_call(&self) -> sync::MutexGuard<'_, collections::BTreeMap<String, common::Item>> {
        self.calls.fetch_add(1, sync::atomic::Ordering::SeqCst);
        self.lock()
    }
}

fn isbn_of(item: &common::Item) -> store::Result<String> {
    match item.get(common::key::ISBN) {
        Some(types::AttributeValue::S(isbn)) => Ok(isbn.clone()),
        _ => Err(store::StoreError::Backend(format!(
            "item has no string `{}` attribute",
            common::key::ISBN
        ))),
    }
}

impl store::BookStore for MemoryStore {
    async fn put_book(&self, item: common::Item) -> store::Result<()> {
        let isbn = isbn_of(&item)?;
        match self.record_call().entry(isbn) {
            collections::btree_map::Entry::Occupied(_) => Err(store::StoreError::ConditionFailed),
            collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(())
            }
        }
    }

    async fn get_book(&self, isbn: &str) -> store::Result<Option<common::Item>> {
        Ok(self.record_call().get(isbn).cloned())
    }

    async fn update_book(
        &self,
        isbn: &str,
        updates: Vec<(String, types::AttributeValue)>,
    ) -> store::Result<common::Item> {
        let mut items = self.record_call();
        let item = items
            .get_mut(isbn)
            .ok_or(store::StoreError::ConditionFailed)?;
        let mut updated = common::Item::with_capacity(updates.len());
        for (name, value) in updates {
            item.insert(name.clone(), value.clone());
            updated.insert(name, value);
        }
        Ok(updated)
    }

    async fn delete_book(&self, isbn: &str) -> store::Result<()> {
        self.record_call()
            .remove(isbn)
            .map(|_| ())
            .ok_or(store::StoreError::ConditionFailed)
    }

    async fn scan_books(&self) -> store::Result<Vec<common::Item>> {
        Ok(self.record_call().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BookStore;

    fn item(isbn: &str, name: &str) -> common::Item {
        common::Item::from([
            (
                "isbn".to_string(),
                types::AttributeValue::S(isbn.to_string()),
            ),
            (
                "book_name".to_string(),
                types::AttributeValue::S(name.to_string()),
            ),
        ])
    }

    #[tokio::test]
    async fn test_put_is_create_if_absent() {
        let store = MemoryStore::new();
        store.put_book(item("1", "a")).await.unwrap();
        let actual = store.put_book(item("1", "b")).await.unwrap_err();
        assert!(matches!(actual, store::StoreError::ConditionFailed));
        assert_eq!(store.get_book("1").await.unwrap(), Some(item("1", "a")));
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_put_requires_isbn() {
        let store = MemoryStore::new();
        let actual = store.put_book(common::Item::new()).await.unwrap_err();
        assert!(matches!(actual, store::StoreError::Backend(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_is_update_if_present() {
        let store = MemoryStore::new();
        let updates = vec![(
            "book_name".to_string(),
            types::AttributeValue::S("b".to_string()),
        )];
        let actual = store.update_book("1", updates.clone()).await.unwrap_err();
        assert!(matches!(actual, store::StoreError::ConditionFailed));

        store.put_book(item("1", "a")).await.unwrap();
        let actual = store.update_book("1", updates).await.unwrap();
        assert_eq!(
            actual,
            common::Item::from([(
                "book_name".to_string(),
                types::AttributeValue::S("b".to_string()),
            )])
        );
        assert_eq!(store.get_book("1").await.unwrap(), Some(item("1", "b")));
    }

    #[tokio::test]
    async fn test_delete_is_delete_if_present() {
        let store = MemoryStore::new();
        store.put_book(item("1", "a")).await.unwrap();
        store.delete_book("1").await.unwrap();
        let actual = store.delete_book("1").await.unwrap_err();
        assert!(matches!(actual, store::StoreError::ConditionFailed));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_scan_returns_every_item() {
        let store = MemoryStore::new();
        store.put_book(item("2", "b")).await.unwrap();
        store.put_book(item("1", "a")).await.unwrap();
        let actual = store.scan_books().await.unwrap();
        assert_eq!(actual, vec![item("1", "a"), item("2", "b")]);
    }
}
