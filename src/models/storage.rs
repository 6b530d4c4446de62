use crate::models::{Snippet, Theme};
use anyhow::{Context, Result, bail};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const SNIPPETS_KEY: &str = "snipdoc.snippets";
pub const THEME_KEY: &str = "snipdoc.theme";

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One JSON file per key inside a data directory
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        Ok(Self { data_dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read {:?}", path))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        // Write next to the target then rename, so a crash never leaves half a file
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        if let Err(err) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err).with_context(|| format!("Failed to move {:?} into place", temp_path));
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to delete {:?}", path))?;
        }
        Ok(())
    }
}

/// In-process store for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Persists the snippet collection and theme preference.
///
/// Reads fail closed and writes never surface errors to the caller; the
/// in-memory collection stays authoritative until the next successful save.
#[derive(Debug)]
pub struct SnippetStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SnippetStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Serializes and writes the whole collection, reporting failures
    pub fn try_save(&mut self, snippets: &[Snippet]) -> Result<()> {
        let payload = serde_json::to_string(snippets).context("Failed to serialize snippets")?;
        self.store.set(SNIPPETS_KEY, &payload)
    }

    pub fn save(&mut self, snippets: &[Snippet]) {
        match self.try_save(snippets) {
            Ok(()) => debug!(count = snippets.len(), "saved snippets"),
            Err(err) => warn!("Failed to save snippets: {err:#}"),
        }
    }

    pub fn try_load(&self) -> Result<Option<Vec<Snippet>>> {
        let Some(raw) = self.store.get(SNIPPETS_KEY)? else {
            return Ok(None);
        };
        let snippets: Vec<Snippet> =
            serde_json::from_str(&raw).context("Stored snippets are not a valid snippet array")?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = snippets.iter().find(|snippet| !seen.insert(snippet.id.as_str())) {
            bail!("Stored snippets repeat the id {:?}", duplicate.id);
        }
        Ok(Some(snippets))
    }

    /// `None` when nothing was saved or the stored value is unusable
    pub fn load(&self) -> Option<Vec<Snippet>> {
        match self.try_load() {
            Ok(Some(snippets)) => {
                debug!(count = snippets.len(), "loaded snippets");
                Some(snippets)
            }
            Ok(None) => None,
            Err(err) => {
                warn!("Failed to load snippets: {err:#}");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.store.remove(SNIPPETS_KEY) {
            warn!("Failed to clear snippets: {err:#}");
        }
    }

    pub fn load_theme(&self) -> Option<Theme> {
        match self.store.get(THEME_KEY) {
            Ok(value) => value.as_deref().map(str::trim).and_then(Theme::parse),
            Err(err) => {
                warn!("Failed to load theme: {err:#}");
                None
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) {
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!("Failed to save theme: {err:#}");
        }
    }
}
