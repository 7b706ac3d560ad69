//! Tokenization shared by the TF-IDF provider and keyword extraction,
//! spec.md §4.C8: lowercase, split on non-alphanumerics, drop tokens of
//! length <= 2.

pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() > 2)
        .map(|s| s.to_lowercase())
        .collect()
}
