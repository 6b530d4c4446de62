use crate::models::Snippet;

/// Returns the snippets that carry every required tag and whose title, code
/// or tags contain `query`, in collection order.
///
/// Both comparisons are case-insensitive. An empty query or an empty tag list
/// disables that half of the filter.
pub fn filter_snippets<'a, S: AsRef<str>>(
    snippets: &'a [Snippet],
    query: &str,
    required_tags: &[S],
) -> Vec<&'a Snippet> {
    let query = query.trim().to_lowercase();
    let required_tags: Vec<String> = required_tags
        .iter()
        .map(|tag| tag.as_ref().to_lowercase())
        .collect();

    snippets
        .iter()
        .filter(|snippet| has_all_tags(snippet, &required_tags))
        .filter(|snippet| query.is_empty() || haystack(snippet).contains(&query))
        .collect()
}

fn has_all_tags(snippet: &Snippet, required_tags: &[String]) -> bool {
    if required_tags.is_empty() {
        return true;
    }

    let snippet_tags: Vec<String> = snippet.tags.iter().map(|tag| tag.to_lowercase()).collect();
    required_tags.iter().all(|tag| snippet_tags.contains(tag))
}

/// Lowercased title, code and space-joined tags, skipping empty parts
fn haystack(snippet: &Snippet) -> String {
    let tags = snippet.tags.join(" ");
    [snippet.title.as_str(), snippet.code.as_str(), tags.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
