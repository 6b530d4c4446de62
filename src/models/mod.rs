pub mod defaults;
pub mod export;
pub mod repository;
pub mod snippet;
pub mod storage;
pub mod tags;
pub mod theme;

pub use defaults::default_snippets;
pub use export::{ExportData, ExportFormat, export_snippets, import_snippets};
pub use repository::SnippetRepository;
pub use snippet::{
    Documentation, DocumentationUpdate, FieldError, Snippet, SnippetDraft, SnippetUpdate,
    ValidationError, parse_tags,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SnippetStorage};
pub use tags::distinct_tags;
pub use theme::Theme;
