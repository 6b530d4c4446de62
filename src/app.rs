use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::debounce::{Debouncer, TimerHandle};
use crate::models::{
    KeyValueStore, Snippet, SnippetDraft, SnippetRepository, SnippetStorage, SnippetUpdate,
    Theme, ValidationError, distinct_tags, export_snippets, import_snippets,
};
use crate::search::filter_snippets;
use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Timers owned by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppTimer {
    Search,
}

/// Settings the controller takes from configuration
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub search_debounce: Duration,
    pub clipboard_command: Option<String>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            clipboard_command: None,
        }
    }
}

impl From<&Config> for AppOptions {
    fn from(config: &Config) -> Self {
        Self {
            search_debounce: config.search_debounce(),
            clipboard_command: config.clipboard_command.clone(),
        }
    }
}

/// Main Application State Container
///
/// Owns the snippet collection and everything derived from user intents:
/// the applied search query, selected tags, and theme. Every mutation of
/// the collection is written back to storage before the intent returns, and
/// storage failures are logged rather than surfaced.
#[derive(Debug)]
pub struct App<S: KeyValueStore> {
    repository: SnippetRepository,
    storage: SnippetStorage<S>,
    clipboard: Clipboard,
    search_query: String,
    search_input: String,
    timers: Debouncer<AppTimer, String>,
    selected_tags: Vec<String>,
    theme: Theme,
}

impl<S: KeyValueStore> App<S> {
    /// Loads the stored collection (or the bundled examples) and theme.
    ///
    /// The resulting collection is saved right away, so a first run leaves
    /// the examples in storage.
    pub fn new(store: S, options: AppOptions) -> Self {
        let mut storage = SnippetStorage::new(store);
        let repository = SnippetRepository::initialize(storage.load());
        storage.save(repository.snippets());

        let theme = storage.load_theme().unwrap_or_else(Theme::system_default);
        debug!(count = repository.len(), %theme, "application initialized");

        Self {
            repository,
            storage,
            clipboard: Clipboard::new(options.clipboard_command.as_deref()),
            search_query: String::new(),
            search_input: String::new(),
            timers: Debouncer::new(options.search_debounce),
            selected_tags: Vec::new(),
            theme,
        }
    }

    pub fn snippets(&self) -> &[Snippet] {
        self.repository.snippets()
    }

    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.repository.get(id)
    }

    /// Looks a snippet up by id, then exact title, then partial title
    pub fn find(&self, id_or_title: &str) -> Option<&Snippet> {
        if let Some(snippet) = self.repository.get(id_or_title) {
            return Some(snippet);
        }

        let name = id_or_title.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        let snippets = self.repository.snippets();
        snippets
            .iter()
            .find(|s| s.title.to_lowercase() == name)
            .or_else(|| snippets.iter().find(|s| s.title.to_lowercase().contains(&name)))
    }

    pub fn storage(&self) -> &SnippetStorage<S> {
        &self.storage
    }

    fn persist(&mut self) {
        self.storage.save(self.repository.snippets());
    }

    // Collection intents

    /// Adds a snippet at the front and returns its id
    pub fn add_snippet(&mut self, draft: SnippetDraft) -> Result<String, ValidationError> {
        let id = self.repository.add(draft)?.id.clone();
        self.persist();
        info!(%id, "snippet added");
        Ok(id)
    }

    /// Returns `Ok(false)` when no snippet has `id`
    pub fn edit_snippet(&mut self, id: &str, changes: SnippetUpdate) -> Result<bool, ValidationError> {
        let updated = self.repository.update(id, changes)?;
        if updated {
            self.persist();
            info!(%id, "snippet updated");
        }
        Ok(updated)
    }

    /// Deletes after the caller has confirmed; unknown ids are ignored
    pub fn delete_snippet(&mut self, id: &str) -> Option<Snippet> {
        let removed = self.repository.remove(id)?;
        self.persist();
        info!(%id, "snippet deleted");
        Some(removed)
    }

    /// Merges snippets from an export file, skipping ids already present
    pub fn import_from(&mut self, path: &Path) -> Result<usize> {
        let incoming = import_snippets(path)?;
        let added = self.repository.merge_missing(incoming);
        if added > 0 {
            self.persist();
        }
        info!(added, "imported snippets");
        Ok(added)
    }

    pub fn export_to(&self, path: &Path) -> Result<()> {
        export_snippets(self.repository.snippets(), path)
    }

    /// Drops the persisted collection. The in-memory one is untouched, so the
    /// next start falls back to the bundled examples unless something is saved first.
    pub fn clear_storage(&mut self) {
        self.storage.clear();
    }

    // Search intents

    /// Records raw query input. The query is applied once input has been
    /// quiet for the debounce delay; see [`App::tick`].
    pub fn input_search_query(&mut self, query: impl Into<String>, now: Instant) -> TimerHandle {
        let query = query.into();
        self.search_input = query.clone();
        self.timers.schedule(AppTimer::Search, query, now)
    }

    /// Applies any debounced query that is due. Returns true if the visible
    /// set may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for (timer, query) in self.timers.poll(now) {
            match timer {
                AppTimer::Search => {
                    debug!(%query, "applying search query");
                    changed |= self.search_query != query;
                    self.search_query = query;
                }
            }
        }
        changed
    }

    /// Applies a query immediately, discarding pending input
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.timers.cancel_key(&AppTimer::Search);
        self.search_query = query.into();
        self.search_input = self.search_query.clone();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The text as typed, which may be ahead of the applied query
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn next_timer_deadline(&self, now: Instant) -> Option<Duration> {
        self.timers.next_deadline(now)
    }

    // Tag intents

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(index) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(index);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    /// Adds `tag` to the selection if it is not already there
    pub fn select_tag(&mut self, tag: &str) {
        if !self.selected_tags.iter().any(|t| t == tag) {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    // Derived views

    pub fn visible_snippets(&self) -> Vec<&Snippet> {
        filter_snippets(
            self.repository.snippets(),
            &self.search_query,
            &self.selected_tags,
        )
    }

    pub fn all_tags(&self) -> Vec<String> {
        distinct_tags(self.repository.snippets())
    }

    // Theme

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.storage.save_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    /// Copies a snippet's code to the clipboard. Failures are logged only.
    pub fn copy_code(&self, id: &str) -> bool {
        match self.repository.get(id) {
            Some(snippet) => self.clipboard.copy(&snippet.code),
            None => false,
        }
    }
}
