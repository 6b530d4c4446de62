//! snipdoc - personal snippet manager
//!
//! Stores, tags, searches and documents reusable code fragments in a local
//! data directory. The library holds the snippet model, the filter and tag
//! index, the repository and persistence layers, and the [`App`] controller
//! that ties them together; the binary is a thin command-line front end.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod models;
pub mod search;

pub use app::{App, AppOptions};
pub use config::Config;
pub use models::{
    Documentation, DocumentationUpdate, FileStore, KeyValueStore, MemoryStore, Snippet,
    SnippetDraft, SnippetRepository, SnippetStorage, SnippetUpdate, Theme, ValidationError,
    distinct_tags,
};
pub use search::filter_snippets;
