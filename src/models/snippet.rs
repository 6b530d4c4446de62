use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_CODE_LENGTH: usize = 10;

/// A titled, tagged, documented piece of source code.
///
/// The serialized shape is the persisted layout: camelCase keys, optional
/// `language`/`description` omitted when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub documentation: Documentation,
}

/// The seven free-text documentation sections attached to every snippet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documentation {
    pub purpose: String,
    pub parameters: String,
    pub return_value: String,
    pub examples: String,
    pub gotchas: String,
    pub when_to_use: String,
    pub alternatives: String,
}

/// Partial documentation, used by the edit path. Only sections that are
/// `Some` replace the existing text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationUpdate {
    pub purpose: Option<String>,
    pub parameters: Option<String>,
    pub return_value: Option<String>,
    pub examples: Option<String>,
    pub gotchas: Option<String>,
    pub when_to_use: Option<String>,
    pub alternatives: Option<String>,
}

/// User input for a new snippet, before validation
#[derive(Debug, Clone, Default)]
pub struct SnippetDraft {
    pub title: String,
    pub code: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub documentation: Documentation,
}

/// Field changes for an existing snippet. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct SnippetUpdate {
    pub title: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub documentation: DocumentationUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Title must be between 1 and 100 characters.")]
    Title,
    #[error("Code must be at least 10 characters.")]
    Code,
}

/// Every field that failed validation, in form order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ValidationError {
    pub fn has(&self, field: FieldError) -> bool {
        self.errors.contains(&field)
    }
}

impl Documentation {
    /// Overlays the sections present in `update`, keeping the rest
    pub fn merge(&mut self, update: DocumentationUpdate) {
        let DocumentationUpdate {
            purpose,
            parameters,
            return_value,
            examples,
            gotchas,
            when_to_use,
            alternatives,
        } = update;

        overlay(&mut self.purpose, purpose);
        overlay(&mut self.parameters, parameters);
        overlay(&mut self.return_value, return_value);
        overlay(&mut self.examples, examples);
        overlay(&mut self.gotchas, gotchas);
        overlay(&mut self.when_to_use, when_to_use);
        overlay(&mut self.alternatives, alternatives);
    }

    /// Sections paired with their display labels, in form order
    pub fn sections(&self) -> [(&'static str, &str); 7] {
        [
            ("Purpose", self.purpose.as_str()),
            ("Parameters", self.parameters.as_str()),
            ("Return Value", self.return_value.as_str()),
            ("Examples", self.examples.as_str()),
            ("Gotchas", self.gotchas.as_str()),
            ("When To Use", self.when_to_use.as_str()),
            ("Alternatives", self.alternatives.as_str()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.sections().iter().all(|(_, text)| text.is_empty())
    }
}

fn overlay(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Splits comma-separated tag input, trimming entries and dropping empties
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Empty optional text is stored as unset
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn check_title(title: &str) -> Option<FieldError> {
    let length = title.chars().count();
    (length == 0 || length > MAX_TITLE_LENGTH).then_some(FieldError::Title)
}

fn check_code(code: &str) -> Option<FieldError> {
    (code.chars().count() < MIN_CODE_LENGTH).then_some(FieldError::Code)
}

impl SnippetDraft {
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the draft and turns it into a snippet with a fresh id
    pub fn into_snippet(self) -> Result<Snippet, ValidationError> {
        let title = self.title.trim().to_string();
        let code = self.code.trim().to_string();

        let errors: Vec<FieldError> = [check_title(&title), check_code(&code)]
            .into_iter()
            .flatten()
            .collect();
        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }

        Ok(Snippet {
            id: generate_id(),
            title,
            code,
            language: normalize_optional(self.language),
            description: normalize_optional(self.description),
            tags: normalize_tags(self.tags),
            documentation: self.documentation,
        })
    }
}

impl SnippetUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let errors: Vec<FieldError> = [
            self.title.as_deref().and_then(|t| check_title(t.trim())),
            self.code.as_deref().and_then(|c| check_code(c.trim())),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }
}

impl Snippet {
    /// Checks title and code against the limits a new draft must meet
    pub fn validate(&self) -> Result<(), ValidationError> {
        let errors: Vec<FieldError> = [
            check_title(self.title.trim()),
            check_code(self.code.trim()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }

    /// Applies an already validated update in place
    pub(crate) fn apply(&mut self, update: SnippetUpdate) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(code) = update.code {
            self.code = code.trim().to_string();
        }
        if update.language.is_some() {
            self.language = normalize_optional(update.language);
        }
        if update.description.is_some() {
            self.description = normalize_optional(update.description);
        }
        if let Some(tags) = update.tags {
            self.tags = normalize_tags(tags);
        }
        self.documentation.merge(update.documentation);
    }

    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or("Plain text")
    }

    pub fn get_line_count(&self) -> usize {
        self.code.lines().count()
    }
}

/// Time-ordered prefix with a random suffix, unique under rapid successive calls
pub fn generate_id() -> String {
    format!(
        "snippet-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_trims_and_assigns_id() {
        let snippet = SnippetDraft::new("  Title  ", "\n  0123456789  \n")
            .with_tags([" x ", "", "y"])
            .into_snippet()
            .unwrap();

        assert_eq!(snippet.title, "Title");
        assert_eq!(snippet.code, "0123456789");
        assert_eq!(snippet.tags, vec!["x", "y"]);
        assert!(snippet.id.starts_with("snippet-"));
    }

    #[test]
    fn test_draft_reports_every_invalid_field() {
        let err = SnippetDraft::new("   ", "short").into_snippet().unwrap_err();
        assert!(err.has(FieldError::Title));
        assert!(err.has(FieldError::Code));
        assert!(err.to_string().contains("Title must be between 1 and 100"));
    }

    #[test]
    fn test_title_length_counts_characters() {
        let at_limit = "é".repeat(MAX_TITLE_LENGTH);
        assert!(SnippetDraft::new(at_limit, "0123456789").into_snippet().is_ok());

        let over_limit = "a".repeat(MAX_TITLE_LENGTH + 1);
        let err = SnippetDraft::new(over_limit, "0123456789")
            .into_snippet()
            .unwrap_err();
        assert_eq!(err.errors, vec![FieldError::Title]);
    }

    #[test]
    fn test_code_length_ignores_surrounding_whitespace() {
        let err = SnippetDraft::new("T", "   012345678   ")
            .into_snippet()
            .unwrap_err();
        assert_eq!(err.errors, vec![FieldError::Code]);
    }

    #[test]
    fn test_documentation_merge_keeps_untouched_sections() {
        let mut docs = Documentation {
            purpose: "old".into(),
            examples: "fib(10)".into(),
            ..Documentation::default()
        };
        docs.merge(DocumentationUpdate {
            purpose: Some("p".into()),
            ..DocumentationUpdate::default()
        });

        assert_eq!(docs.purpose, "p");
        assert_eq!(docs.examples, "fib(10)");
        assert_eq!(docs.gotchas, "");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("react, hooks ,, performance "), vec![
            "react",
            "hooks",
            "performance"
        ]);
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_documentation_deserializes_missing_sections_as_empty() {
        let docs: Documentation = serde_json::from_str(r#"{"returnValue":"n"}"#).unwrap();
        assert_eq!(docs.return_value, "n");
        assert_eq!(docs.when_to_use, "");
    }

    #[test]
    fn test_existing_snippet_validation() {
        let mut snippet = SnippetDraft::new("T", "0123456789").into_snippet().unwrap();
        assert!(snippet.validate().is_ok());

        snippet.title = "  ".into();
        snippet.code = "a".into();
        let err = snippet.validate().unwrap_err();
        assert_eq!(err.errors, vec![FieldError::Title, FieldError::Code]);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: std::collections::HashSet<_> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
