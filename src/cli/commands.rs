use super::{AddArgs, EditArgs, ThemeAction};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use snipdoc::models::parse_tags;
use snipdoc::{App, KeyValueStore, Snippet, SnippetDraft, Theme};
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

fn bar() -> colored::ColoredString {
    "┃".bright_magenta()
}

fn rule(width: usize) {
    println!("{}", "─".repeat(width).bright_magenta());
}

/// Reads code from a file, or stdin for "-"
pub fn read_code(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut code = String::new();
        io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read code from stdin")?;
        return Ok(code);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read code from {:?}", path))
}

/// Prints the filtered view with a "showing N of M" summary
pub fn list_snippets<S: KeyValueStore>(
    app: &mut App<S>,
    query: &str,
    tags: &[String],
) -> Result<()> {
    app.set_search_query(query);
    for tag in tags {
        app.select_tag(tag);
    }

    let total = app.snippets().len();
    let visible = app.visible_snippets();

    if total == 0 {
        println!("{}  No snippets yet. Add one with `snipdoc add`.", bar());
        return Ok(());
    }

    println!(
        "{}  {} {} of {}",
        bar(),
        "SNIPPETS".bold(),
        visible.len().to_string().bright_yellow(),
        total
    );
    if !app.search_query().trim().is_empty() || !app.selected_tags().is_empty() {
        println!(
            "{}  {}: '{}'  {}: {}",
            bar(),
            "Query".bright_blue(),
            app.search_query(),
            "Tags".bright_blue(),
            app.selected_tags().join(", ")
        );
    }

    if visible.is_empty() {
        println!("{}  No snippets match your search", bar());
        println!(
            "{}  Try adjusting your keywords or clearing filters to see more results.",
            bar()
        );
        return Ok(());
    }

    rule(60);
    for (idx, snippet) in visible.iter().enumerate() {
        print_summary(idx, snippet);
        if idx < visible.len() - 1 {
            println!("{}  {}", bar(), "─".repeat(40).bright_black());
        }
    }

    Ok(())
}

fn print_summary(idx: usize, snippet: &Snippet) {
    println!(
        "{}  {}. {} {}",
        bar(),
        (idx + 1).to_string().bright_yellow(),
        snippet.title.bright_white().bold(),
        format!("[{}]", snippet.language_label()).bright_green()
    );
    if let Some(desc) = &snippet.description {
        println!("{}     {}", bar(), desc);
    }
    if !snippet.tags.is_empty() {
        let tags: Vec<String> = snippet.tags.iter().map(|t| format!("#{t}")).collect();
        println!("{}     {}", bar(), tags.join(" ").bright_cyan());
    }
    println!("{}     {}: {}", bar(), "ID".bright_black(), snippet.id);
}

pub fn list_tags<S: KeyValueStore>(app: &App<S>) -> Result<()> {
    let tags = app.all_tags();
    if tags.is_empty() {
        println!("{}  No tags in use.", bar());
        return Ok(());
    }

    println!("{}  {} ({})", bar(), "TAGS".bold(), tags.len());
    for tag in tags {
        println!("{}  {}", bar(), format!("#{tag}").bright_cyan());
    }
    Ok(())
}

pub fn show_snippet<S: KeyValueStore>(app: &App<S>, name_or_id: &str) -> Result<()> {
    let Some(snippet) = app.find(name_or_id) else {
        println!("{}  No snippet found with name: {}", bar(), name_or_id);
        println!("{}  Available snippets:", bar());
        rule(60);
        for (idx, snippet) in app.snippets().iter().enumerate().take(10) {
            println!(
                "{}  {}. {}",
                bar(),
                (idx + 1).to_string().yellow(),
                snippet.title.bright_white()
            );
        }
        if app.snippets().len() > 10 {
            println!("{}  ... and {} more", bar(), app.snippets().len() - 10);
        }
        return Ok(());
    };

    println!(
        "{}  {} {}",
        bar(),
        "SNIPPET".bright_green().bold(),
        snippet.title.bold()
    );
    rule(60);
    println!(
        "{}  {}: {}",
        bar(),
        "Language".bright_yellow(),
        snippet.language_label()
    );
    if let Some(desc) = &snippet.description {
        println!("{}  {}: {}", bar(), "Description".bright_cyan(), desc);
    }
    if !snippet.tags.is_empty() {
        println!("{}  {}: {}", bar(), "Tags".bright_blue(), snippet.tags.join(", "));
    }
    println!(
        "{}  {}: {} ({} lines)",
        bar(),
        "ID".bright_black(),
        snippet.id,
        snippet.get_line_count()
    );
    rule(60);

    for line in snippet.code.lines() {
        println!("{}  {}", bar(), line);
    }

    if !snippet.documentation.is_empty() {
        rule(60);
        for (label, text) in snippet.documentation.sections() {
            if text.is_empty() {
                continue;
            }
            println!("{}  {}", bar(), label.bright_yellow().bold());
            for line in text.lines() {
                println!("{}    {}", bar(), line);
            }
        }
    }

    Ok(())
}

pub fn add_snippet<S: KeyValueStore>(app: &mut App<S>, args: AddArgs) -> Result<()> {
    let code = match (args.code, args.file) {
        (Some(code), _) => code,
        (None, Some(path)) => read_code(&path)?,
        (None, None) => String::new(),
    };

    let mut documentation = snipdoc::Documentation::default();
    documentation.merge(args.docs.into());

    let draft = SnippetDraft {
        title: args.title,
        code,
        language: args.language,
        description: args.description,
        tags: args.tags.as_deref().map(parse_tags).unwrap_or_default(),
        documentation,
    };

    let id = app.add_snippet(draft).context("Snippet not saved")?;
    println!("{}  {} {}", bar(), "Added".bright_green().bold(), id);
    Ok(())
}

pub fn edit_snippet<S: KeyValueStore>(app: &mut App<S>, id: &str, fields: EditArgs) -> Result<()> {
    let update = fields.into_update()?;

    if !app.edit_snippet(id, update).context("Snippet not saved")? {
        bail!("Snippet not found with ID: {id}");
    }
    println!("{}  {} {}", bar(), "Updated".bright_green().bold(), id);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}  {} [y/N] ", bar(), prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn delete_snippet<S: KeyValueStore>(app: &mut App<S>, id: &str, yes: bool) -> Result<()> {
    let Some(title) = app.get(id).map(|snippet| snippet.title.clone()) else {
        bail!("Snippet not found with ID: {id}");
    };

    let prompt = format!("Delete snippet? “{title}” will be permanently removed.");
    if !yes && !confirm(&prompt)? {
        println!("{}  Cancelled", bar());
        return Ok(());
    }

    if app.delete_snippet(id).is_some() {
        println!("{}  {} {}", bar(), "Deleted".bright_red().bold(), title);
    }
    Ok(())
}

pub fn copy_snippet<S: KeyValueStore>(app: &App<S>, id: &str) -> Result<()> {
    if app.get(id).is_none() {
        bail!("Snippet not found with ID: {id}");
    }

    if app.copy_code(id) {
        println!("{}  {}", bar(), "Copied to clipboard".bright_green());
    } else {
        eprintln!("{}  Could not reach the clipboard", bar());
    }
    Ok(())
}

pub fn theme<S: KeyValueStore>(app: &mut App<S>, action: Option<ThemeAction>) -> Result<()> {
    let theme = match action {
        None => app.theme(),
        Some(ThemeAction::Toggle) => app.toggle_theme(),
        Some(ThemeAction::Light) => {
            app.set_theme(Theme::Light);
            Theme::Light
        }
        Some(ThemeAction::Dark) => {
            app.set_theme(Theme::Dark);
            Theme::Dark
        }
    };

    println!("{}  {}: {}", bar(), "Theme".bright_blue(), theme);
    Ok(())
}

pub fn export<S: KeyValueStore>(app: &App<S>, path: &Path) -> Result<()> {
    app.export_to(path)?;
    println!(
        "{}  Exported {} snippets to {}",
        bar(),
        app.snippets().len(),
        path.display()
    );
    Ok(())
}

pub fn import<S: KeyValueStore>(app: &mut App<S>, path: &Path) -> Result<()> {
    let added = app.import_from(path)?;
    println!(
        "{}  Imported {} new snippets from {}",
        bar(),
        added,
        path.display()
    );
    Ok(())
}

pub fn reset<S: KeyValueStore>(app: &mut App<S>, yes: bool) -> Result<()> {
    if !yes && !confirm("Remove every saved snippet?")? {
        println!("{}  Cancelled", bar());
        return Ok(());
    }

    app.clear_storage();
    println!("{}  Saved snippets removed", bar());
    Ok(())
}
