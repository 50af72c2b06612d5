use crate::backend::{validate_key, SecureStore};
use crate::config::ChunkConfig;
use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the number of chunks stored for `key`.
pub fn chunk_count_key(key: &str) -> String {
    format!("{key}_chunks")
}

/// Key holding chunk `index` of `key`.
pub fn chunk_key(key: &str, index: usize) -> String {
    format!("{key}_chunk_{index}")
}

/// JSON storage over a size-limited [`SecureStore`].
///
/// Small payloads live under the key itself. Larger ones are split into
/// `key_chunk_0..n` with the count in `key_chunks`, written after every chunk
/// body so a reader never sees a count whose chunks are incomplete.
pub struct ChunkedStore<S> {
    backend: S,
    config: ChunkConfig,
}

impl<S: SecureStore> ChunkedStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            config: ChunkConfig::default(),
        }
    }

    pub fn with_config(backend: S, config: ChunkConfig) -> Result<Self> {
        config.validate().map_err(StoreError::InvalidConfig)?;
        Ok(Self { backend, config })
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Serialize `value` and store it under `key`, chunking when it is too large
    /// for a single entry. Any representation left by an earlier save is removed.
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        validate_key(key)?;
        let payload = serde_json::to_string(value)?;

        if payload.len() <= self.config.single_value_limit {
            self.backend.set_item(key, &payload).await?;
            self.delete_chunk_set(key).await?;
            log::debug!("Saved {key} as a single value ({} bytes)", payload.len());
            return Ok(());
        }

        let chunks = split_chunks(&payload, self.config.chunk_size);
        // The old count goes first: a failed write below must not leave it
        // covering a mix of old and new chunks. Until the new count lands,
        // neither representation exists.
        self.backend.delete_item(key).await?;
        self.backend.delete_item(&chunk_count_key(key)).await?;
        for (index, chunk) in chunks.iter().enumerate() {
            self.backend.set_item(&chunk_key(key, index), chunk).await?;
        }
        self.backend
            .set_item(&chunk_count_key(key), &chunks.len().to_string())
            .await?;
        let stale = self.delete_chunk_range(key, chunks.len(), 0).await?;

        log::debug!(
            "Saved {key} in {} chunks ({} bytes, {stale} stale chunks removed)",
            chunks.len(),
            payload.len()
        );
        Ok(())
    }

    /// Load the value stored under `key`.
    ///
    /// Backend failures, incomplete chunk sets and undecodable payloads are
    /// logged and reported as `None`, the same as a key that was never written.
    /// Use [`ChunkedStore::load_strict`] to tell those cases apart.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load_strict(key).await {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to load {key}, treating as empty: {err}");
                None
            }
        }
    }

    /// Load the value stored under `key`, surfacing read and decode failures.
    pub async fn load_strict<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(payload) = self.read_payload(key).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Remove the whole value, every chunk and the chunk count for `key`.
    pub async fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.backend.delete_item(key).await?;
        self.delete_chunk_set(key).await?;
        log::debug!("Deleted {key}");
        Ok(())
    }

    /// Whether anything is stored under `key`. Read failures count as absent.
    pub async fn exists(&self, key: &str) -> bool {
        if validate_key(key).is_err() {
            return false;
        }
        let probe = async {
            if self.backend.get_item(key).await?.is_some() {
                return Ok::<_, StoreError>(true);
            }
            Ok(self
                .backend
                .get_item(&chunk_count_key(key))
                .await?
                .is_some())
        };
        probe.await.unwrap_or_else(|err| {
            log::warn!("Failed to probe {key}: {err}");
            false
        })
    }

    async fn read_payload(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        if let Some(whole) = self.backend.get_item(key).await? {
            return Ok(Some(whole));
        }

        let Some(raw_count) = self.backend.get_item(&chunk_count_key(key)).await? else {
            return Ok(None);
        };
        let count = parse_count(key, &raw_count)?;

        let mut payload = String::new();
        for index in 0..count {
            let chunk = self
                .backend
                .get_item(&chunk_key(key, index))
                .await?
                .ok_or_else(|| StoreError::MissingChunk {
                    key: key.to_string(),
                    index,
                    count,
                })?;
            payload.push_str(&chunk);
        }
        Ok(Some(payload))
    }

    /// Delete chunk bodies, then the count. The count is read first so the scan
    /// knows how far to go; a corrupted count falls back to bounded probing.
    async fn delete_chunk_set(&self, key: &str) -> Result<()> {
        let count_key = chunk_count_key(key);
        let known = match self.backend.get_item(&count_key).await? {
            Some(raw) => parse_count(key, &raw).unwrap_or_else(|err| {
                log::warn!("{err}; probing chunks instead");
                0
            }),
            None => 0,
        };
        self.delete_chunk_range(key, 0, known).await?;
        self.backend.delete_item(&count_key).await
    }

    /// Delete chunks from `start` upward until one is missing. The scan never
    /// passes `max(known_count, start) + max_chunk_scan`, so a corrupted count or
    /// a misbehaving backend cannot make it run away.
    async fn delete_chunk_range(
        &self,
        key: &str,
        start: usize,
        known_count: usize,
    ) -> Result<usize> {
        let scan_limit = known_count
            .max(start)
            .saturating_add(self.config.max_chunk_scan);
        let mut index = start;
        while index < scan_limit {
            let chunk = chunk_key(key, index);
            if self.backend.get_item(&chunk).await?.is_none() {
                break;
            }
            self.backend.delete_item(&chunk).await?;
            index += 1;
        }
        Ok(index - start)
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| StoreError::CorruptChunkCount {
            key: key.to_string(),
            raw: raw.to_string(),
        })
}

/// Split `payload` into pieces of at most `max_bytes`, never cutting a UTF-8 character.
fn split_chunks(payload: &str, max_bytes: usize) -> Vec<&str> {
    let mut chunks = Vec::with_capacity(payload.len() / max_bytes + 1);
    let mut rest = payload;
    while !rest.is_empty() {
        let mut end = max_bytes.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (head, tail) = rest.split_at(end);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde::Deserialize;
    use std::sync::Mutex;

    const KEY: &str = "user_inventory";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        name: String,
        amount: f64,
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                id: format!("id-{i:04}"),
                name: format!("Ingredient number {i}"),
                amount: i as f64 + 0.5,
            })
            .collect()
    }

    /// JSON string literal whose serialized form is exactly `len` bytes.
    fn string_of_serialized_len(len: usize) -> String {
        "a".repeat(len - 2)
    }

    /// Records every write so ordering can be asserted.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore,
        writes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SecureStore for RecordingStore {
        async fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key).await
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.writes.lock().unwrap().push(key.to_string());
            self.inner.set_item(key, value).await
        }

        async fn delete_item(&self, key: &str) -> Result<()> {
            self.inner.delete_item(key).await
        }
    }

    /// Fails writes to one key once armed.
    #[derive(Default)]
    struct FailingWriteStore {
        inner: MemoryStore,
        failing_key: Mutex<Option<String>>,
    }

    impl FailingWriteStore {
        fn fail_on(&self, key: &str) {
            *self.failing_key.lock().unwrap() = Some(key.to_string());
        }
    }

    #[async_trait]
    impl SecureStore for FailingWriteStore {
        async fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key).await
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<()> {
            if self.failing_key.lock().unwrap().as_deref() == Some(key) {
                return Err(StoreError::Other("disk full".to_string()));
            }
            self.inner.set_item(key, value).await
        }

        async fn delete_item(&self, key: &str) -> Result<()> {
            self.inner.delete_item(key).await
        }
    }

    /// Fails every read.
    #[derive(Default)]
    struct UnreadableStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl SecureStore for UnreadableStore {
        async fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(StoreError::Other("keychain locked".to_string()))
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set_item(key, value).await
        }

        async fn delete_item(&self, key: &str) -> Result<()> {
            self.inner.delete_item(key).await
        }
    }

    #[tokio::test]
    async fn test_missing_key_loads_none() {
        let store = ChunkedStore::new(MemoryStore::new());
        assert_eq!(store.load::<Vec<Record>>(KEY).await, None);
        assert_eq!(store.load_strict::<Vec<Record>>(KEY).await.unwrap(), None);
        assert!(!store.exists(KEY).await);
    }

    #[tokio::test]
    async fn test_payload_at_limit_is_stored_whole() {
        let store = ChunkedStore::new(MemoryStore::new());
        let value = string_of_serialized_len(2048);

        store.save(KEY, &value).await.unwrap();
        assert_eq!(store.backend().keys().await, vec![KEY.to_string()]);
        assert_eq!(store.load::<String>(KEY).await, Some(value));
    }

    #[tokio::test]
    async fn test_payload_over_limit_is_chunked() {
        let store = ChunkedStore::new(MemoryStore::new());
        let value = string_of_serialized_len(2049);

        store.save(KEY, &value).await.unwrap();
        assert_eq!(
            store.backend().keys().await,
            vec![
                "user_inventory_chunk_0".to_string(),
                "user_inventory_chunk_1".to_string(),
                "user_inventory_chunks".to_string(),
            ]
        );
        let backend = store.backend();
        assert_eq!(
            backend.get_item("user_inventory_chunks").await.unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(
            backend.get_item("user_inventory_chunk_0").await.unwrap().unwrap().len(),
            1800
        );
        assert_eq!(store.load::<String>(KEY).await, Some(value));
    }

    #[tokio::test]
    async fn test_chunks_fit_a_limited_backend() {
        let store = ChunkedStore::new(MemoryStore::with_value_limit(2048));
        let value = records(200);

        store.save(KEY, &value).await.unwrap();
        assert_eq!(store.load::<Vec<Record>>(KEY).await, Some(value));
    }

    #[tokio::test]
    async fn test_count_written_after_all_chunks() {
        let store = ChunkedStore::new(RecordingStore::default());
        store.save(KEY, &records(100)).await.unwrap();

        let writes = store.backend().writes.lock().unwrap().clone();
        assert!(writes.len() > 2);
        assert_eq!(writes.last().map(String::as_str), Some("user_inventory_chunks"));
        for (index, key) in writes[..writes.len() - 1].iter().enumerate() {
            assert_eq!(key, &chunk_key(KEY, index));
        }
    }

    #[tokio::test]
    async fn test_small_save_removes_stale_chunks() {
        let store = ChunkedStore::new(MemoryStore::new());
        store.save(KEY, &records(100)).await.unwrap();
        store.save(KEY, &records(1)).await.unwrap();

        assert_eq!(store.backend().keys().await, vec![KEY.to_string()]);
        assert_eq!(store.load::<Vec<Record>>(KEY).await, Some(records(1)));
    }

    #[tokio::test]
    async fn test_large_save_removes_stale_whole_value_and_extra_chunks() {
        let store = ChunkedStore::new(MemoryStore::new());
        store.save(KEY, &records(1)).await.unwrap();
        store.save(KEY, &records(200)).await.unwrap();
        assert!(store.backend().get_item(KEY).await.unwrap().is_none());

        store.save(KEY, &records(40)).await.unwrap();
        let raw_count = store
            .backend()
            .get_item(&chunk_count_key(KEY))
            .await
            .unwrap()
            .unwrap();
        let count: usize = raw_count.parse().unwrap();
        assert!(store
            .backend()
            .get_item(&chunk_key(KEY, count))
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.backend().len().await, count + 1);
        assert_eq!(store.load::<Vec<Record>>(KEY).await, Some(records(40)));
    }

    #[tokio::test]
    async fn test_missing_chunk_is_masked_by_load_only() {
        let store = ChunkedStore::new(MemoryStore::new());
        store.save(KEY, &records(100)).await.unwrap();
        store.backend().delete_item(&chunk_key(KEY, 1)).await.unwrap();

        assert_eq!(store.load::<Vec<Record>>(KEY).await, None);
        let err = store.load_strict::<Vec<Record>>(KEY).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingChunk { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_corrupted_payload_is_masked_by_load_only() {
        let store = ChunkedStore::new(MemoryStore::new());
        store.backend().set_item(KEY, "{not json").await.unwrap();

        assert_eq!(store.load::<Vec<Record>>(KEY).await, None);
        assert!(matches!(
            store.load_strict::<Vec<Record>>(KEY).await,
            Err(StoreError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_read_failure_is_masked_as_empty() {
        let store = ChunkedStore::new(UnreadableStore::default());
        assert_eq!(store.load::<Vec<Record>>(KEY).await, None);
        assert!(!store.exists(KEY).await);
        assert!(store.load_strict::<Vec<Record>>(KEY).await.is_err());
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced() {
        let config = ChunkConfig {
            single_value_limit: 200,
            chunk_size: 100,
            ..Default::default()
        };
        let store = ChunkedStore::with_config(MemoryStore::with_value_limit(50), config).unwrap();

        let err = store.save(KEY, &records(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::ValueTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_failed_chunk_write_never_mixes_old_and_new_chunks() {
        let store = ChunkedStore::new(FailingWriteStore::default());
        let old = "x".repeat(3000);
        let new = "y".repeat(3000);
        store.save(KEY, &old).await.unwrap();

        store.backend().fail_on(&chunk_key(KEY, 1));
        let err = store.save(KEY, &new).await.unwrap_err();
        assert!(matches!(err, StoreError::Other(_)));

        let loaded = store.load::<String>(KEY).await;
        assert!(loaded.is_none() || loaded.as_ref() == Some(&old));
        assert!(!store.exists(KEY).await);

        // the next successful save cleans up the leftovers
        *store.backend().failing_key.lock().unwrap() = None;
        store.save(KEY, &new).await.unwrap();
        assert_eq!(store.load::<String>(KEY).await, Some(new));
        assert_eq!(store.backend().inner.len().await, 3);
    }

    #[tokio::test]
    async fn test_delete_removes_every_key() {
        let store = ChunkedStore::new(MemoryStore::new());
        store.save(KEY, &records(100)).await.unwrap();
        store.backend().set_item("unrelated", "1").await.unwrap();
        assert!(store.exists(KEY).await);

        store.delete(KEY).await.unwrap();
        assert!(!store.exists(KEY).await);
        assert_eq!(store.backend().keys().await, vec!["unrelated".to_string()]);
        assert_eq!(store.load::<Vec<Record>>(KEY).await, None);
    }

    #[tokio::test]
    async fn test_delete_with_corrupted_count_probes_chunks() {
        let backend = MemoryStore::new();
        for index in 0..3 {
            backend.set_item(&chunk_key(KEY, index), "x").await.unwrap();
        }
        backend.set_item(&chunk_count_key(KEY), "three").await.unwrap();

        let store = ChunkedStore::new(backend);
        store.delete(KEY).await.unwrap();
        assert!(store.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_scan_is_bounded() {
        let config = ChunkConfig {
            max_chunk_scan: 2,
            ..Default::default()
        };
        let backend = MemoryStore::new();
        for index in 0..5 {
            backend.set_item(&chunk_key(KEY, index), "x").await.unwrap();
        }
        let store = ChunkedStore::with_config(backend, config).unwrap();

        store.delete(KEY).await.unwrap();
        assert_eq!(
            store.backend().keys().await,
            vec![
                chunk_key(KEY, 2),
                chunk_key(KEY, 3),
                chunk_key(KEY, 4),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let store = ChunkedStore::new(MemoryStore::new());
        assert!(matches!(
            store.save("bad key", &1).await,
            Err(StoreError::InvalidKey(_))
        ));
        assert!(!store.exists("bad key").await);
    }

    #[test]
    fn test_split_respects_char_boundaries() {
        let text = "é".repeat(10);
        let chunks = split_chunks(&text, 5);
        assert!(chunks.iter().all(|c| c.len() <= 5 && !c.is_empty()));
        assert_eq!(chunks.concat(), text);
        assert_eq!(split_chunks("", 5), Vec::<&str>::new());
    }

    proptest! {
        #[test]
        fn proptest_save_then_load_round_trips(
            values in proptest::collection::vec(".{0,40}", 0..30)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let config = ChunkConfig {
                single_value_limit: 64,
                chunk_size: 16,
                max_chunk_scan: 8,
            };
            let store = ChunkedStore::with_config(MemoryStore::with_value_limit(64), config).unwrap();

            let loaded = runtime.block_on(async {
                store.save(KEY, &values).await.unwrap();
                store.load_strict::<Vec<String>>(KEY).await.unwrap()
            });
            prop_assert_eq!(loaded, Some(values));
        }
    }
}
