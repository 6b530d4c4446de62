use snipdoc::models::default_snippets;
use snipdoc::{
    App, AppOptions, DocumentationUpdate, FileStore, SnippetDraft, SnippetUpdate, Theme,
    filter_snippets,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn open(dir: &Path) -> App<FileStore> {
    App::new(FileStore::new(dir).unwrap(), AppOptions::default())
}

#[test]
fn test_changes_survive_restart() {
    let dir = tempdir().unwrap();

    let id = {
        let mut app = open(dir.path());
        assert_eq!(app.snippets().len(), 4);

        let id = app
            .add_snippet(
                SnippetDraft::new("Retry with backoff", "for attempt in 0..5 { retry() }")
                    .with_tags(["rust", "Resilience"]),
            )
            .unwrap();
        app.edit_snippet(&id, SnippetUpdate {
            documentation: DocumentationUpdate {
                examples: Some("retry(fetch)".into()),
                ..DocumentationUpdate::default()
            },
            ..SnippetUpdate::default()
        })
        .unwrap();
        app.delete_snippet("snippet-2");
        app.set_theme(Theme::Dark);
        id
    };

    let mut app = open(dir.path());
    assert_eq!(app.theme(), Theme::Dark);

    let ids: Vec<&str> = app.snippets().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![id.as_str(), "snippet-1", "snippet-3", "snippet-4"]);
    assert_eq!(app.snippets()[0].documentation.examples, "retry(fetch)");

    app.edit_snippet(&id, SnippetUpdate {
        documentation: DocumentationUpdate {
            purpose: Some("Survive flaky calls".into()),
            ..DocumentationUpdate::default()
        },
        ..SnippetUpdate::default()
    })
    .unwrap();
    let docs = &app.get(&id).unwrap().documentation;
    assert_eq!(docs.purpose, "Survive flaky calls");
    assert_eq!(docs.examples, "retry(fetch)");
}

#[test]
fn test_saved_empty_collection_restarts_with_examples() {
    let dir = tempdir().unwrap();
    {
        let mut app = open(dir.path());
        for snippet in default_snippets() {
            app.delete_snippet(&snippet.id);
        }
        assert!(app.snippets().is_empty());
        assert_eq!(app.storage().load(), Some(Vec::new()));
    }

    assert_eq!(open(dir.path()).snippets(), default_snippets().as_slice());
}

#[test]
fn test_corrupt_file_falls_back_to_examples() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("snipdoc.snippets.json"), r#"{"snippets": []}"#).unwrap();

    let app = open(dir.path());
    assert_eq!(app.snippets(), default_snippets().as_slice());
}

#[test]
fn test_filter_and_tag_index_case_rules() {
    let dir = tempdir().unwrap();
    let mut app = open(dir.path());
    app.add_snippet(SnippetDraft::new("Hook form", "useForm({ mode })").with_tags(["React"]))
        .unwrap();

    let matched = filter_snippets(app.snippets(), "", &["react"]);
    let titles: Vec<&str> = matched.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Hook form", "Debounced Search Input (React)"]);

    let tags = app.all_tags();
    assert!(tags.contains(&"React".to_string()));
    assert!(tags.contains(&"react".to_string()));
}

#[test]
fn test_export_import_merges_new_snippets_only() {
    let source_dir = tempdir().unwrap();
    let target_dir = tempdir().unwrap();
    let export_path = source_dir.path().join("export.yaml");

    let mut source = open(source_dir.path());
    let new_id = source
        .add_snippet(SnippetDraft::new("Shared", "echo shared snippet"))
        .unwrap();
    source.export_to(&export_path).unwrap();

    let mut target = open(target_dir.path());
    assert_eq!(target.import_from(&export_path).unwrap(), 1);
    assert_eq!(target.snippets().len(), 5);
    assert_eq!(target.snippets()[4].id, new_id);

    // A second import finds nothing new
    assert_eq!(target.import_from(&export_path).unwrap(), 0);
    assert_eq!(open(target_dir.path()).snippets().len(), 5);
}

#[test]
fn test_import_skips_snippets_that_fail_validation() {
    let dir = tempdir().unwrap();
    let import_path = dir.path().join("incoming.json");
    fs::write(
        &import_path,
        r#"[
            {"id":"x","title":"","code":"a"},
            {"id":"y","title":"Kept","code":"println!(\"kept\");"}
        ]"#,
    )
    .unwrap();

    let mut app = open(dir.path());
    assert_eq!(app.import_from(&import_path).unwrap(), 1);
    assert!(app.get("x").is_none());
    assert_eq!(app.get("y").unwrap().title, "Kept");
    assert_eq!(open(dir.path()).snippets().len(), 5);
}
