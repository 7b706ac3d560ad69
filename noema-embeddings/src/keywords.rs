//! Keyword extraction, spec.md §4.C8: top-k terms by frequency, length > 2.

use std::collections::HashMap;

use crate::tokenize::tokenize;

/// Extract the top `k` most frequent tokens. Ties break by first
/// appearance in `text`, matching `tokenize`'s left-to-right order.
pub fn top_keywords(text: &str, k: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for token in &tokens {
        if counts.insert(token.as_str(), 0).is_none() {
            order.push(token.as_str());
        }
        *counts.get_mut(token.as_str()).unwrap() += 1;
    }

    let mut ranked: Vec<&str> = order;
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.into_iter().take(k).map(|s| s.to_string()).collect()
}
