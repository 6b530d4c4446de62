use crate::models::{Snippet, SnippetDraft, SnippetUpdate, ValidationError, default_snippets};
use tracing::{debug, warn};

/// The in-memory snippet collection, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetRepository {
    snippets: Vec<Snippet>,
}

impl SnippetRepository {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self { snippets }
    }

    /// Starts from the persisted collection, or the bundled examples when
    /// nothing (or an empty collection) was stored.
    pub fn initialize(loaded: Option<Vec<Snippet>>) -> Self {
        match loaded {
            Some(snippets) if !snippets.is_empty() => Self::new(snippets),
            _ => {
                debug!("no stored snippets, using bundled examples");
                Self::new(default_snippets())
            }
        }
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|snippet| snippet.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Validates the draft and puts the new snippet at the front
    pub fn add(&mut self, draft: SnippetDraft) -> Result<&Snippet, ValidationError> {
        let mut snippet = draft.into_snippet()?;
        while self.contains(&snippet.id) {
            snippet.id = crate::models::snippet::generate_id();
        }

        debug!(id = %snippet.id, title = %snippet.title, "adding snippet");
        self.snippets.insert(0, snippet);
        Ok(&self.snippets[0])
    }

    /// Merges `changes` over the snippet with `id`.
    ///
    /// Returns `Ok(false)` without touching anything if no snippet has that id;
    /// it may already have been deleted.
    pub fn update(&mut self, id: &str, changes: SnippetUpdate) -> Result<bool, ValidationError> {
        changes.validate()?;

        let Some(snippet) = self.snippets.iter_mut().find(|snippet| snippet.id == id) else {
            debug!(%id, "update skipped, snippet not found");
            return Ok(false);
        };

        snippet.apply(changes);
        debug!(%id, "updated snippet");
        Ok(true)
    }

    /// Removes and returns the snippet with `id`, if present
    pub fn remove(&mut self, id: &str) -> Option<Snippet> {
        let index = self.snippets.iter().position(|snippet| snippet.id == id)?;
        debug!(%id, "removed snippet");
        Some(self.snippets.remove(index))
    }

    /// Appends snippets whose ids are not already present, in their given
    /// order. Entries with an invalid title or code are skipped. Returns how
    /// many were added.
    pub fn merge_missing(&mut self, incoming: Vec<Snippet>) -> usize {
        let mut added = 0;
        for snippet in incoming {
            if self.contains(&snippet.id) {
                continue;
            }
            if let Err(err) = snippet.validate() {
                warn!(id = %snippet.id, "Skipping imported snippet: {err}");
                continue;
            }
            self.snippets.push(snippet);
            added += 1;
        }
        added
    }
}
