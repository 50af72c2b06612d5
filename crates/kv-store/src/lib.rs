//! # Pantry KV Store
//!
//! JSON persistence over secure key/value stores that cap the size of a single
//! entry.
//!
//! ## Layout
//!
//! ```text
//! save("user_inventory", value)
//!     │
//!     ├──> serialized ≤ single_value_limit
//!     │      └─> user_inventory = <json>
//!     │
//!     └──> serialized > single_value_limit
//!            ├─> user_inventory_chunk_0 .. user_inventory_chunk_{n-1}
//!            └─> user_inventory_chunks = n   (written last)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pantry_kv_store::{ChunkedStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> pantry_kv_store::Result<()> {
//!     let store = ChunkedStore::new(MemoryStore::with_value_limit(2048));
//!     let values: Vec<String> = (0..500).map(|i| format!("item-{i}")).collect();
//!
//!     store.save("user_inventory", &values).await?;
//!     let loaded: Option<Vec<String>> = store.load("user_inventory").await;
//!     assert_eq!(loaded, Some(values));
//!     Ok(())
//! }
//! ```

mod backend;
mod chunked;
mod config;
mod error;
mod file;
mod memory;

pub use backend::{validate_key, SecureStore};
pub use chunked::{chunk_count_key, chunk_key, ChunkedStore};
pub use config::ChunkConfig;
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
