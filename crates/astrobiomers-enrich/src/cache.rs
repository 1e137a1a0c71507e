//! Disk cache keyed by (kind/ontology, canonical_name) (§4.7, §4.8 "Policy").

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use astrobiomers_core::artifacts::{atomic_write_json, read_json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    entries: HashMap<String, Option<String>>,
}

/// In-memory cache backed by a single JSON file, loaded on construction and
/// explicitly flushed back with [`DiskCache::save`]. A miss is recorded as
/// `None` so a confirmed "no result" doesn't re-hit the network every run.
pub struct DiskCache {
    path: PathBuf,
    entries: HashMap<String, Option<String>>,
    dirty: bool,
}

impl DiskCache {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_json::<CacheFile>(&path).map(|f| f.entries).unwrap_or_default();
        Self { path, entries, dirty: false }
    }

    fn key(namespace: &str, canonical_name: &str) -> String {
        format!("{namespace}\u{1}{canonical_name}")
    }

    pub fn get(&self, namespace: &str, canonical_name: &str) -> Option<Option<String>> {
        self.entries.get(&Self::key(namespace, canonical_name)).cloned()
    }

    pub fn insert(&mut self, namespace: &str, canonical_name: &str, value: Option<String>) {
        self.entries.insert(Self::key(namespace, canonical_name), value);
        self.dirty = true;
    }

    pub fn save(&mut self) -> std::io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &CacheFile { entries: self.entries.clone() })
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_insert_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DiskCache::load(dir.path().join("cache.json"));
        assert_eq!(cache.get("gene", "tp53"), None);
        cache.insert("gene", "tp53", Some("7157".to_string()));
        assert_eq!(cache.get("gene", "tp53"), Some(Some("7157".to_string())));
    }

    #[test]
    fn persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = DiskCache::load(&path);
        cache.insert("gene", "tp53", Some("7157".to_string()));
        cache.save().unwrap();

        let reloaded = DiskCache::load(&path);
        assert_eq!(reloaded.get("gene", "tp53"), Some(Some("7157".to_string())));
    }

    #[test]
    fn confirmed_miss_is_cached_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DiskCache::load(dir.path().join("cache.json"));
        cache.insert("gene", "unknown-gene", None);
        assert_eq!(cache.get("gene", "unknown-gene"), Some(None));
    }

    #[test]
    fn namespaces_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DiskCache::load(dir.path().join("cache.json"));
        cache.insert("gene", "x", Some("1".into()));
        cache.insert("protein", "x", Some("2".into()));
        assert_eq!(cache.get("gene", "x"), Some(Some("1".into())));
        assert_eq!(cache.get("protein", "x"), Some(Some("2".into())));
    }
}
