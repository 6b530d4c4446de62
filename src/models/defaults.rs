use crate::models::{Documentation, Snippet};

/// Example collection shown on first start, before anything has been saved
pub fn default_snippets() -> Vec<Snippet> {
    vec![
        example(
            "snippet-1",
            "Debounced Search Input (React)",
            "JavaScript",
            "Avoid spamming your API by debouncing keystrokes in a search field.",
            r#"const useDebouncedValue = (value, delay = 300) => {
  const [debounced, setDebounced] = useState(value);

  useEffect(() => {
    const id = setTimeout(() => setDebounced(value), delay);
    return () => clearTimeout(id);
  }, [value, delay]);

  return debounced;
};"#,
            &["react", "hooks", "performance"],
        ),
        example(
            "snippet-2",
            "TypeScript Utility: Optional Keys",
            "TypeScript",
            "Transform some keys of a type into optional while keeping others required.",
            r#"type WithOptional<T, K extends keyof T> = Omit<T, K> & Partial<Pick<T, K>>;

interface User {
  id: string;
  name: string;
  email: string;
}

type UserDraft = WithOptional<User, 'id'>;"#,
            &["typescript", "utility-types"],
        ),
        example(
            "snippet-3",
            "Fetch JSON with AbortController",
            "JavaScript",
            "Cleanly cancel in-flight requests when components unmount.",
            r#"export const fetchJson = async (url, options = {}) => {
  const controller = new AbortController();
  const { signal } = controller;

  const promise = fetch(url, { ...options, signal }).then((res) => {
    if (!res.ok) throw new Error('Request failed');
    return res.json();
  });

  return { promise, cancel: () => controller.abort() };
};"#,
            &["fetch", "abortcontroller"],
        ),
        example(
            "snippet-4",
            "Python: Memoized Fibonacci",
            "Python",
            "Classic Fibonacci with memoization using lru_cache.",
            r#"from functools import lru_cache

@lru_cache(maxsize=None)
def fib(n: int) -> int:
    if n < 2:
        return n
    return fib(n - 1) + fib(n - 2)"#,
            &["python", "algorithms", "memoization"],
        ),
    ]
}

fn example(
    id: &str,
    title: &str,
    language: &str,
    description: &str,
    code: &str,
    tags: &[&str],
) -> Snippet {
    Snippet {
        id: id.to_string(),
        title: title.to_string(),
        code: code.to_string(),
        language: Some(language.to_string()),
        description: Some(description.to_string()),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        documentation: Documentation::default(),
    }
}
