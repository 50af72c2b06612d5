use thiserror::Error;

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Storage error: {0}")]
    StoreError(#[from] pantry_kv_store::StoreError),

    #[error("Inventory item not found: {0}")]
    NotFound(String),

    #[error("Invalid amount {0}: must be a positive number")]
    InvalidAmount(f64),
}
