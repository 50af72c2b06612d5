use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::sync::Arc;

/// A secure key/value store holding string values.
///
/// Keys are restricted to `[A-Za-z0-9._-]` and may not start with a dot.
/// Backends may enforce a per-key size limit; [`crate::ChunkedStore`] exists to stay under it.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key succeeds.
    async fn delete_item(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: SecureStore + ?Sized> SecureStore for Arc<S> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        (**self).delete_item(key).await
    }
}

pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

pub(crate) fn check_value_size(key: &str, value: &str, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if value.len() > limit => Err(StoreError::ValueTooLarge {
            key: key.to_string(),
            size: value.len(),
            limit,
        }),
        _ => Ok(()),
    }
}
