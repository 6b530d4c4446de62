use std::cmp::Ordering;
use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::Snippet;

/// Collects every distinct non-empty tag in the collection, sorted for display.
///
/// Identity is case-sensitive here: `React` and `react` are separate entries,
/// unlike tag matching in the filter.
pub fn distinct_tags(snippets: &[Snippet]) -> Vec<String> {
    let unique: HashSet<&str> = snippets
        .iter()
        .flat_map(|snippet| snippet.tags.iter())
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect();

    let mut tags: Vec<String> = unique.into_iter().map(String::from).collect();
    tags.sort_by(|a, b| compare_tags(a, b));
    tags
}

/// Locale-style ordering: base letters first (accents and case ignored), then
/// unaccented before accented, then lowercase ahead of uppercase.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
}

/// Lowercased text with combining marks stripped, so `É` keys as `e`
fn base_letters(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn swap_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnippetDraft;

    fn tagged(tags: &[&str]) -> Snippet {
        SnippetDraft::new("Tagged", "0123456789")
            .with_tags(tags.iter().copied())
            .into_snippet()
            .unwrap()
    }

    #[test]
    fn test_distinct_and_sorted() {
        let snippets = vec![
            tagged(&["python", "hooks"]),
            tagged(&["hooks", "algorithms"]),
            tagged(&[]),
        ];
        assert_eq!(distinct_tags(&snippets), vec!["algorithms", "hooks", "python"]);
    }

    #[test]
    fn test_case_variants_are_separate_entries() {
        let snippets = vec![tagged(&["React", "redux"]), tagged(&["react"])];
        assert_eq!(distinct_tags(&snippets), vec!["react", "React", "redux"]);
    }

    #[test]
    fn test_accented_tags_sort_by_base_letter() {
        let snippets = vec![tagged(&["zod", "éclair", "eslint"])];
        assert_eq!(distinct_tags(&snippets), vec!["éclair", "eslint", "zod"]);
    }

    #[test]
    fn test_unaccented_sorts_before_accented_then_case() {
        assert_eq!(compare_tags("e", "é"), Ordering::Less);
        assert_eq!(compare_tags("é", "É"), Ordering::Less);
        assert_eq!(compare_tags("Éclair", "eclairs"), Ordering::Less);
    }

    #[test]
    fn test_empty_tags_are_skipped() {
        let mut snippet = tagged(&["x"]);
        snippet.tags.push(String::new());
        assert_eq!(distinct_tags(&[snippet]), vec!["x"]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(distinct_tags(&[]).is_empty());
    }
}
