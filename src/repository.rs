use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::models::{Item, NewItem};

/// Item metadata store
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist an item, assigning the next id
    async fn save(&self, item: NewItem) -> Result<Item>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Item>>;

    /// Whether any stored item references `stored_name`
    async fn references_stored_name(&self, stored_name: &str) -> Result<bool>;
}

/// In-memory repository keyed by an auto-incrementing id, starting at 1
#[derive(Default)]
pub struct InMemoryItemRepository {
    items: DashMap<u64, Item>,
    sequence: AtomicU64,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn save(&self, item: NewItem) -> Result<Item> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let item = Item {
            id,
            item_name: item.item_name,
            attach_file: item.attach_file,
            image_files: item.image_files,
            created_at: Utc::now().to_rfc3339(),
        };

        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Item>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn references_stored_name(&self, stored_name: &str) -> Result<bool> {
        Ok(self.items.iter().any(|entry| entry.value().references(stored_name)))
    }
}
