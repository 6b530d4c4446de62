//! CLI Module for snipdoc
//!
//! Argument definitions and dispatch. Each command opens the application
//! over the configured data directory, performs one intent, and prints the
//! result in the margin-bar style used throughout.

pub mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use snipdoc::models::{DocumentationUpdate, parse_tags};
use snipdoc::{App, AppOptions, Config, FileStore, SnippetUpdate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snipdoc")]
#[command(about = "snipdoc - store, tag, search and document code snippets")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List snippets, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Text that must appear in the title, code or tags
        #[arg(short, long)]
        query: Option<String>,
        /// Required tag (repeatable, all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Search snippets by text
    #[command(alias = "find")]
    Search {
        query: String,
        /// Required tag (repeatable, all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// List every tag in use
    Tags,
    /// Show a snippet with its documentation
    #[command(aliases = ["view", "cat"])]
    Show {
        /// Snippet id, or all or part of its title
        name: String,
    },
    /// Add a new snippet
    Add(AddArgs),
    /// Edit an existing snippet; only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a snippet
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy a snippet's code to the clipboard
    Copy { id: String },
    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Export all snippets (.json or .yaml)
    Export { path: PathBuf },
    /// Import snippets from an export file
    Import { path: PathBuf },
    /// Remove the saved collection; the examples return on next start
    Reset {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

#[derive(Args, Debug, Default)]
pub struct DocArgs {
    #[arg(long)]
    pub purpose: Option<String>,
    #[arg(long)]
    pub parameters: Option<String>,
    #[arg(long)]
    pub return_value: Option<String>,
    #[arg(long)]
    pub examples: Option<String>,
    #[arg(long)]
    pub gotchas: Option<String>,
    #[arg(long)]
    pub when_to_use: Option<String>,
    #[arg(long)]
    pub alternatives: Option<String>,
}

impl From<DocArgs> for DocumentationUpdate {
    fn from(args: DocArgs) -> Self {
        Self {
            purpose: args.purpose,
            parameters: args.parameters,
            return_value: args.return_value,
            examples: args.examples,
            gotchas: args.gotchas,
            when_to_use: args.when_to_use,
            alternatives: args.alternatives,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,
    /// Code text
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    pub code: Option<String>,
    /// Read code from a file ("-" for stdin)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    #[arg(short, long)]
    pub language: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
    #[command(flatten)]
    pub docs: DocArgs,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long, conflicts_with = "file")]
    pub code: Option<String>,
    /// Read code from a file ("-" for stdin)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    #[arg(short, long)]
    pub language: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Comma-separated tags, replacing the current ones
    #[arg(long)]
    pub tags: Option<String>,
    #[command(flatten)]
    pub docs: DocArgs,
}

impl EditArgs {
    pub fn into_update(self) -> Result<SnippetUpdate> {
        let code = match (self.code, self.file) {
            (Some(code), _) => Some(code),
            (None, Some(path)) => Some(commands::read_code(&path)?),
            (None, None) => None,
        };

        Ok(SnippetUpdate {
            title: self.title,
            code,
            language: self.language,
            description: self.description,
            tags: self.tags.as_deref().map(parse_tags),
            documentation: self.docs.into(),
        })
    }
}

/// Opens the application over the configured (or overridden) data directory
pub fn open_app(data_dir: Option<PathBuf>) -> Result<App<FileStore>> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    let store = FileStore::new(&config.data_dir)?;
    Ok(App::new(store, AppOptions::from(&config)))
}

/// Executes the parsed command; no command lists everything
pub fn execute(cli: Cli) -> Result<()> {
    let mut app = open_app(cli.data_dir)?;

    match cli.command.unwrap_or(Commands::List {
        query: None,
        tags: Vec::new(),
    }) {
        Commands::List { query, tags } => {
            commands::list_snippets(&mut app, query.as_deref().unwrap_or(""), &tags)
        }
        Commands::Search { query, tags } => commands::list_snippets(&mut app, &query, &tags),
        Commands::Tags => commands::list_tags(&app),
        Commands::Show { name } => commands::show_snippet(&app, &name),
        Commands::Add(args) => commands::add_snippet(&mut app, args),
        Commands::Edit { id, fields } => commands::edit_snippet(&mut app, &id, fields),
        Commands::Delete { id, yes } => commands::delete_snippet(&mut app, &id, yes),
        Commands::Copy { id } => commands::copy_snippet(&app, &id),
        Commands::Theme { action } => commands::theme(&mut app, action),
        Commands::Export { path } => commands::export(&app, &path),
        Commands::Import { path } => commands::import(&mut app, &path),
        Commands::Reset { yes } => commands::reset(&mut app, yes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_tags() {
        let cli = Cli::parse_from(["snipdoc", "ls", "-q", "fetch", "-t", "react", "-t", "hooks"]);
        match cli.command {
            Some(Commands::List { query, tags }) => {
                assert_eq!(query.as_deref(), Some("fetch"));
                assert_eq!(tags, vec!["react", "hooks"]);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_add_requires_code_or_file() {
        assert!(Cli::try_parse_from(["snipdoc", "add", "--title", "T"]).is_err());
        assert!(
            Cli::try_parse_from(["snipdoc", "add", "--title", "T", "--code", "0123456789"]).is_ok()
        );
    }

    #[test]
    fn test_edit_args_become_partial_update() {
        let cli = Cli::parse_from([
            "snipdoc",
            "edit",
            "snippet-1",
            "--tags",
            "a, b,",
            "--purpose",
            "p",
        ]);
        let Some(Commands::Edit { id, fields }) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "snippet-1");

        let update = fields.into_update().unwrap();
        assert_eq!(update.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(update.documentation.purpose.as_deref(), Some("p"));
        assert!(update.title.is_none());
        assert!(update.documentation.examples.is_none());
    }
}
