use crate::error::{InventoryError, Result};
use crate::types::{InventoryItem, InventoryUpdate, NewInventoryItem};
use chrono::{Days, NaiveDate, Utc};
use pantry_kv_store::{ChunkedStore, SecureStore};
use uuid::Uuid;

/// Storage key of the inventory collection
pub const INVENTORY_KEY: &str = "user_inventory";

/// CRUD over the inventory collection.
///
/// Every mutation loads the whole collection, changes it in memory and saves
/// it back once. Concurrent mutations are not serialized here: the last save
/// wins.
pub struct InventoryRepository<S> {
    store: ChunkedStore<S>,
}

impl<S: SecureStore> InventoryRepository<S> {
    pub fn new(store: ChunkedStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ChunkedStore<S> {
        &self.store
    }

    /// All items in insertion order. Unreadable storage yields an empty list.
    pub async fn load_all(&self) -> Vec<InventoryItem> {
        self.store.load(INVENTORY_KEY).await.unwrap_or_default()
    }

    pub async fn get_item(&self, id: &str) -> Option<InventoryItem> {
        self.load_all().await.into_iter().find(|item| item.id == id)
    }

    pub async fn add_item(&self, item: NewInventoryItem) -> Result<InventoryItem> {
        let mut added = self.add_items(vec![item]).await?;
        Ok(added.remove(0))
    }

    /// Append `items` in order with a single save.
    pub async fn add_items(&self, items: Vec<NewInventoryItem>) -> Result<Vec<InventoryItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for item in &items {
            validate_amount(item.amount)?;
        }

        let mut all = self.load_all().await;
        let now = Utc::now();
        let added: Vec<InventoryItem> = items
            .into_iter()
            .map(|item| InventoryItem {
                id: Uuid::new_v4().to_string(),
                name: item.name,
                amount: item.amount,
                unit: item.unit,
                category: item.category,
                expiration_date: item.expiration_date,
                date_added: now,
                notes: item.notes,
            })
            .collect();
        all.extend(added.iter().cloned());

        self.store.save(INVENTORY_KEY, &all).await?;
        log::info!("Added {} inventory items ({} total)", added.len(), all.len());
        Ok(added)
    }

    /// Apply a partial update to the item with `id`.
    pub async fn update_item(&self, id: &str, update: InventoryUpdate) -> Result<InventoryItem> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }

        let mut all = self.load_all().await;
        let item = all
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        update.apply(item);
        let updated = item.clone();

        self.store.save(INVENTORY_KEY, &all).await?;
        log::info!("Updated inventory item {id}");
        Ok(updated)
    }

    /// Remove the item with `id`. Returns false, without writing, if it was absent.
    pub async fn delete_item(&self, id: &str) -> Result<bool> {
        let mut all = self.load_all().await;
        let before = all.len();
        all.retain(|item| item.id != id);
        if all.len() == before {
            log::debug!("Inventory item {id} not present, nothing to delete");
            return Ok(false);
        }

        self.store.save(INVENTORY_KEY, &all).await?;
        log::info!("Deleted inventory item {id}");
        Ok(true)
    }

    /// Drop the whole collection, including any chunk keys.
    pub async fn clear(&self) -> Result<()> {
        self.store.delete(INVENTORY_KEY).await?;
        log::info!("Cleared inventory");
        Ok(())
    }

    /// Items expiring between `today` and `today + days` inclusive, soonest first.
    pub async fn expiring_within(&self, today: NaiveDate, days: u32) -> Vec<InventoryItem> {
        let horizon = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        let mut expiring: Vec<InventoryItem> = self
            .load_all()
            .await
            .into_iter()
            .filter(|item| {
                item.expiration_date
                    .is_some_and(|date| date >= today && date <= horizon)
            })
            .collect();
        expiring.sort_by_key(|item| item.expiration_date);
        expiring
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(InventoryError::InvalidAmount(amount))
    }
}
