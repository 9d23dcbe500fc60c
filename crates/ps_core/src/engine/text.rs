//! English helpers for event narration.

/// Prefix `text` with "a" or "an".
pub fn with_article(text: &str) -> String {
    let starts_with_vowel = text
        .chars()
        .next()
        .map_or(false, |c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
    if starts_with_vowel {
        format!("an {text}")
    } else {
        format!("a {text}")
    }
}

/// `A`, `A and B`, `A, B, and C`.
pub fn english_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(|s| s.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// `M:SS` with zero-padded seconds.
pub fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
