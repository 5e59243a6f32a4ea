// Key-Value Store Port (Interface)

use crate::error::Result;
use crate::port::TimeProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Options applied to a single write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Entry becomes invisible this long after the write
    pub expiration_ttl: Option<Duration>,
}

impl PutOptions {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            expiration_ttl: Some(ttl),
        }
    }
}

/// String key-value storage used to persist whole lists under one key
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value under `key` (None if absent or expired)
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: &str, options: PutOptions) -> Result<()>;

    /// Remove `key` (no-op if absent)
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Absolute expiry (epoch ms) for a write made at `now_millis`
pub fn expires_at(now_millis: i64, options: &PutOptions) -> Option<i64> {
    options
        .expiration_ttl
        .map(|ttl| now_millis.saturating_add(i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)))
}

/// Process-local store (tests and `storage = "memory"` deployments)
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
    time_provider: Arc<dyn TimeProvider>,
}

struct MemoryEntry {
    value: String,
    expires_at: Option<i64>,
}

impl InMemoryKvStore {
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            time_provider,
        }
    }

    /// Number of live (non-expired) entries
    pub async fn len(&self) -> usize {
        let now = self.time_provider.now_millis();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl MemoryEntry {
    fn is_live(&self, now: i64) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.time_provider.now_millis();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &str, options: PutOptions) -> Result<()> {
        let now = self.time_provider.now_millis();
        let mut entries = self.entries.write().await;
        // Expired entries are only hidden by reads, drop them here
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at: expires_at(now, &options),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::time_provider::ManualClock;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = InMemoryKvStore::new(Arc::new(ManualClock::new(0)));

        assert!(store.get("list").await.unwrap().is_none());

        store.put("list", "[]", PutOptions::default()).await.unwrap();
        assert_eq!(store.get("list").await.unwrap().as_deref(), Some("[]"));

        store.put("list", "[1]", PutOptions::default()).await.unwrap();
        assert_eq!(store.get("list").await.unwrap().as_deref(), Some("[1]"));

        store.delete("list").await.unwrap();
        assert!(store.get("list").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entries_are_invisible() {
        let time = Arc::new(ManualClock::new(1_000));
        let store = InMemoryKvStore::new(time.clone());

        store
            .put("list", "[]", PutOptions::with_ttl(Duration::from_secs(60)))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);

        time.set(60_999);
        assert!(store.get("list").await.unwrap().is_some());

        time.set(61_000);
        assert!(store.get("list").await.unwrap().is_none());
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_expires_at() {
        assert_eq!(expires_at(5, &PutOptions::default()), None);
        assert_eq!(
            expires_at(5, &PutOptions::with_ttl(Duration::from_millis(10))),
            Some(15)
        );
    }

    #[test]
    fn test_expires_at_saturates_huge_ttl() {
        let at = expires_at(1_000, &PutOptions::with_ttl(Duration::from_secs(u64::MAX)));
        assert_eq!(at, Some(i64::MAX));
    }

    #[tokio::test]
    async fn test_put_drops_expired_entries() {
        let time = Arc::new(ManualClock::new(0));
        let store = InMemoryKvStore::new(time.clone());

        store
            .put("old", "[]", PutOptions::with_ttl(Duration::from_secs(1)))
            .await
            .unwrap();
        store.put("kept", "[]", PutOptions::default()).await.unwrap();

        time.advance(Duration::from_secs(2));
        store.put("new", "[]", PutOptions::default()).await.unwrap();

        let entries = store.entries.read().await;
        assert_eq!(entries.len(), 2);
        assert!(!entries.contains_key("old"));
    }
}
