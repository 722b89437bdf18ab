use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;

use meshinv_inventory::{InventoryItem, ItemChanges, ItemId, NewItem};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another item already uses this code.
    #[error("item with code {code} already exists")]
    DuplicateCode {
        code: String,
        existing: Box<InventoryItem>,
    },

    /// The store lock was poisoned by a panicking writer.
    #[error("item store unavailable")]
    Unavailable,
}

/// Listing parameters. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub page: u64,
    pub per_page: u64,
    pub search: Option<String>,
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub pages: u64,
}

/// Item storage abstraction. Persistence is out of scope for this service;
/// the in-memory implementation is what both dev and tests run on.
pub trait ItemStore: Send + Sync {
    fn insert(&self, new: NewItem, now: DateTime<Utc>) -> Result<InventoryItem, StoreError>;
    fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError>;
    fn find_by_code(&self, code: &str) -> Result<Option<InventoryItem>, StoreError>;
    /// Newest first (by creation time, then id).
    fn list(&self, query: &ItemQuery) -> Result<Page<InventoryItem>, StoreError>;
    fn update(
        &self,
        id: ItemId,
        changes: &ItemChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<InventoryItem>, StoreError>;
    fn delete(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError>;
    /// Readiness check.
    fn ping(&self) -> Result<(), StoreError>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn insert(&self, new: NewItem, now: DateTime<Utc>) -> Result<InventoryItem, StoreError> {
        (**self).insert(new, now)
    }

    fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        (**self).get(id)
    }

    fn find_by_code(&self, code: &str) -> Result<Option<InventoryItem>, StoreError> {
        (**self).find_by_code(code)
    }

    fn list(&self, query: &ItemQuery) -> Result<Page<InventoryItem>, StoreError> {
        (**self).list(query)
    }

    fn update(
        &self,
        id: ItemId,
        changes: &ItemChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<InventoryItem>, StoreError> {
        (**self).update(id, changes, now)
    }

    fn delete(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        (**self).delete(id)
    }

    fn ping(&self) -> Result<(), StoreError> {
        (**self).ping()
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    items: BTreeMap<ItemId, InventoryItem>,
}

/// In-memory item store for dev/tests.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Inner>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryItemStore {
    fn insert(&self, new: NewItem, now: DateTime<Utc>) -> Result<InventoryItem, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Unavailable)?;

        // Uniqueness is re-checked under the write lock.
        if let Some(existing) = inner.items.values().find(|i| i.code == new.code()) {
            return Err(StoreError::DuplicateCode {
                code: existing.code.clone(),
                existing: Box::new(existing.clone()),
            });
        }

        inner.next_id += 1;
        let id = ItemId::new(inner.next_id);
        let item = InventoryItem::create(id, new, now);
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        Ok(inner.items.get(&id).cloned())
    }

    fn find_by_code(&self, code: &str) -> Result<Option<InventoryItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Unavailable)?;
        Ok(inner.items.values().find(|i| i.code == code).cloned())
    }

    fn list(&self, query: &ItemQuery) -> Result<Page<InventoryItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Unavailable)?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut matching: Vec<&InventoryItem> = inner
            .items
            .values()
            .filter(|item| search.is_none_or(|needle| item.matches(needle)))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let per_page = query.per_page.max(1);
        let page = query.page.max(1);
        let total = matching.len() as u64;
        let pages = total.div_ceil(per_page);

        let skip = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
        let take = usize::try_from(per_page).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total,
            pages,
        })
    }

    fn update(
        &self,
        id: ItemId,
        changes: &ItemChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<InventoryItem>, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        Ok(inner.items.get_mut(&id).map(|item| {
            item.apply(changes, now);
            item.clone()
        }))
    }

    fn delete(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Unavailable)?;
        Ok(inner.items.remove(&id))
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.inner
            .read()
            .map(|_| ())
            .map_err(|_| StoreError::Unavailable)
    }
}
