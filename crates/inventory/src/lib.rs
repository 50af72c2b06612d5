//! # Pantry Inventory
//!
//! The user's ingredient inventory, persisted as one JSON collection through
//! [`pantry_kv_store::ChunkedStore`].
//!
//! ## Flow
//!
//! ```text
//! RecognizedIngredient[]  (from a scan)
//!     │
//!     ├──> NewInventoryItem::from_recognized (amount/unit/category from the user)
//!     │
//!     └──> InventoryRepository::add_items
//!            └─> load all → append → save once
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pantry_inventory::{InventoryRepository, InventoryUpdate, NewInventoryItem};
//! use pantry_kv_store::{ChunkedStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> pantry_inventory::Result<()> {
//!     let repo = InventoryRepository::new(ChunkedStore::new(MemoryStore::new()));
//!
//!     let item = repo
//!         .add_item(NewInventoryItem::new("Tomato", 3.0, "pcs", "Produce"))
//!         .await?;
//!     repo.update_item(&item.id, InventoryUpdate::amount(5.0)).await?;
//!
//!     assert_eq!(repo.load_all().await[0].amount, 5.0);
//!     Ok(())
//! }
//! ```

mod error;
mod repository;
mod types;

pub use error::{InventoryError, Result};
pub use repository::{InventoryRepository, INVENTORY_KEY};
pub use types::{InventoryItem, InventoryUpdate, NewInventoryItem};
