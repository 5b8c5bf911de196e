use crate::adapters::memory_cache::expiry_from;
use crate::domain::ports::CacheStore;
use crate::utils::error::{RateError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    data: String,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Cache store keeping one JSON file per key under a base directory, so
/// cached rates survive restarts and are shared between processes.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    base_path: PathBuf,
}

impl FileCacheStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", encode_key(key)))
    }
}

/// One-to-one file name for a cache key. Lowercase ASCII letters, digits and
/// `-` pass through; every other byte, `_` and uppercase included, becomes
/// `_xx` hex so keys never collide, even on case-insensitive filesystems.
pub fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("_{:02x}", byte));
        }
    }
    encoded
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: FileEntry = serde_json::from_str(&content)?;
        if entry.expires_at <= Utc::now() {
            tracing::debug!("Cache entry {} expired at {}", key, entry.expires_at);
            return Ok(None);
        }

        Ok(Some(entry.data.into_bytes()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let data = String::from_utf8(value.to_vec())
            .map_err(|_| RateError::cache(format!("Value for {} is not UTF-8", key)))?;
        let entry = FileEntry {
            data,
            cached_at: Utc::now(),
            expires_at: expiry_from(ttl)?,
        };

        tokio::fs::create_dir_all(&self.base_path).await?;
        let json = serde_json::to_string_pretty(&entry)?;
        tokio::fs::write(self.entry_path(key), json).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
