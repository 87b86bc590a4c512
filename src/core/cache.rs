//! Two-tier response cache: in-memory LRU in front of a JSON file store.
//!
//! - L1: LRU memory cache, entries expire after a configurable age so the
//!   dashboard picks up live scores.
//! - L2: files under the user cache directory. Only entries the caller marks
//!   as settled (finished seasons) are written there.

use lru::LruCache;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::{LeagueId, Season, Week};

const APP_DIR: &str = "ffl-records";

/// Default cache root: ~/.cache/ffl-records
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(APP_DIR)
}

/// Try to read a file into a String
fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Key usable for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// File name stem for disk storage
    fn to_file_key(&self) -> String;
}

/// Which ESPN resource a cached payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    League,
    /// Whole-season schedule with scores
    Schedule,
    BoxScores(Week),
}

/// Cache key for one ESPN league request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseKey {
    pub league_id: LeagueId,
    pub season: Season,
    pub resource: Resource,
}

impl ResponseKey {
    pub fn new(league_id: LeagueId, season: Season, resource: Resource) -> Self {
        Self {
            league_id,
            season,
            resource,
        }
    }
}

impl CacheKey for ResponseKey {
    fn to_file_key(&self) -> String {
        let resource = match self.resource {
            Resource::League => "league".to_string(),
            Resource::Schedule => "schedule".to_string(),
            Resource::BoxScores(w) => format!("boxscores_w{}", w.as_u16()),
        };
        format!(
            "l{}_s{}_{}",
            self.league_id.as_u32(),
            self.season.as_u16(),
            resource
        )
    }
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Memory LRU with optional file persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    memory_cache: Mutex<LruCache<K, Entry<V>>>,
    max_age: Option<Duration>,
    root: Option<PathBuf>,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Memory-only cache holding at most `memory_capacity` entries
    pub fn new(memory_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Mutex::new(LruCache::new(capacity)),
            max_age: None,
            root: None,
        }
    }

    /// Persist settled entries as JSON files under `root`
    pub fn with_disk(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Drop memory entries older than `max_age`
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    fn file_path(&self, key: &K) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{}.json", key.to_file_key())))
    }

    /// Look up `key` in memory, then (when `settled`) on disk
    pub fn get(&self, key: &K, settled: bool) -> Option<V> {
        if let Some(value) = self.get_from_memory(key) {
            return Some(value);
        }

        if !settled {
            return None;
        }

        let value = self.get_from_disk(key)?;
        self.put_to_memory(key.clone(), value.clone());
        Some(value)
    }

    /// Store `value`; settled values are also written to disk
    pub fn put(&self, key: K, value: V, settled: bool) {
        if settled {
            if let Err(e) = self.put_to_disk(&key, &value) {
                tracing::debug!(key = %key.to_file_key(), "cache write failed: {}", e);
            }
        }
        self.put_to_memory(key, value);
    }

    fn get_from_memory(&self, key: &K) -> Option<V> {
        let mut cache = self.memory_cache.lock().ok()?;
        let fresh = match (cache.get(key), self.max_age) {
            (None, _) => return None,
            (Some(entry), Some(max_age)) => entry.stored_at.elapsed() <= max_age,
            (Some(_), None) => true,
        };
        if fresh {
            cache.get(key).map(|entry| entry.value.clone())
        } else {
            cache.pop(key);
            None
        }
    }

    fn put_to_memory(&self, key: K, value: V) {
        if let Ok(mut cache) = self.memory_cache.lock() {
            cache.put(
                key,
                Entry {
                    value,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let path = self.file_path(key)?;
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let Some(path) = self.file_path(key) else {
            return Ok(());
        };
        let content = serde_json::to_string(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&path, &content)
    }

    /// Forget `key` in memory and on disk
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        if let Ok(mut cache) = self.memory_cache.lock() {
            cache.pop(key);
        }
        if let Some(path) = self.file_path(key) {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
