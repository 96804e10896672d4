//! Minimal English pluralization for default controller names.
//!
//! Covers the regular cases; irregular plurals override
//! [`RemoteModel::controller_name`](crate::RemoteModel::controller_name)
//! instead of growing a rule table here.

/// Pluralizes a lowercase model name: `post` → `posts`, `query` → `queries`,
/// `address` → `addresses`.
#[must_use]
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
