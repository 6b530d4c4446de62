use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Snippet;

/// Export file format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ExportFormat::Yaml
            }
            _ => ExportFormat::Json,
        }
    }
}

/// Export file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub snippets: Vec<Snippet>,
}

/// Accepts either an export envelope or a bare snippet array
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Envelope(ExportData),
    Snippets(Vec<Snippet>),
}

impl ExportData {
    pub fn new(snippets: &[Snippet]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
            snippets: snippets.to_vec(),
        }
    }
}

/// Writes the collection to `path` as JSON or YAML
pub fn export_snippets(snippets: &[Snippet], path: &Path) -> Result<()> {
    let data = ExportData::new(snippets);

    let content = match ExportFormat::from_path(path) {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&data).context("Failed to serialize snippets to JSON")?
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(&data).context("Failed to serialize snippets to YAML")?
        }
    };

    fs::write(path, content).with_context(|| format!("Failed to write export file {:?}", path))
}

/// Reads snippets from an export file. Any malformed entry rejects the file.
pub fn import_snippets(path: &Path) -> Result<Vec<Snippet>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {:?}", path))?;

    let payload: ImportPayload = match ExportFormat::from_path(path) {
        ExportFormat::Json => {
            serde_json::from_str(&contents).context("Failed to parse JSON import file")?
        }
        ExportFormat::Yaml => {
            serde_yaml::from_str(&contents).context("Failed to parse YAML import file")?
        }
    };

    Ok(match payload {
        ImportPayload::Envelope(data) => data.snippets,
        ImportPayload::Snippets(snippets) => snippets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_snippets;
    use tempfile::tempdir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.yml")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("a.YAML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("a.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("backup")), ExportFormat::Json);
    }

    #[test]
    fn test_json_export_then_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippets.json");

        export_snippets(&default_snippets(), &path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"version\""));

        assert_eq!(import_snippets(&path).unwrap(), default_snippets());
    }

    #[test]
    fn test_yaml_export_then_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippets.yaml");

        export_snippets(&default_snippets(), &path).unwrap();
        assert_eq!(import_snippets(&path).unwrap(), default_snippets());
    }

    #[test]
    fn test_import_bare_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bare.json");
        fs::write(&path, r#"[{"id":"x","title":"X","code":"0123456789","tags":["a"]}]"#).unwrap();

        let snippets = import_snippets(&path).unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].tags, vec!["a"]);
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"snippets": "nope"}"#).unwrap();
        assert!(import_snippets(&path).is_err());

        assert!(import_snippets(&dir.path().join("missing.json")).is_err());
    }
}
