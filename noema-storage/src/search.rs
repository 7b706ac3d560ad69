//! Shared search/ranking helpers used by more than one backend.

use noema_core::model::Node;

/// Cosine similarity between two vectors. Unequal lengths are handled by
/// padding the shorter with zeros. Returns 0.0 when either magnitude is 0,
/// per spec §4.C8.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let len = a.len().max(b.len());
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for i in 0..len {
        let x = *a.get(i).unwrap_or(&0.0) as f64;
        let y = *b.get(i).unwrap_or(&0.0) as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Text-match tier for search ranking: lower sorts first.
/// Tier 0: exact (case-insensitive) name match.
/// Tier 1: substring match in name or canonical_name.
/// Tier 2: substring match only in description.
fn match_tier(node: &Node, query_lower: &str) -> Option<u8> {
    let name_lower = node.name.to_lowercase();
    if name_lower == query_lower {
        return Some(0);
    }
    if name_lower.contains(query_lower) {
        return Some(1);
    }
    if let Some(canonical) = &node.canonical_name {
        if canonical.to_lowercase().contains(query_lower) {
            return Some(1);
        }
    }
    if node.description.to_lowercase().contains(query_lower) {
        return Some(2);
    }
    None
}

/// Case-insensitive substring search over name/description/canonical_name,
/// per spec §4.C2: exact name match sorts first, description-only match
/// sorts last.
pub fn search_nodes_by_text<'a>(nodes: impl Iterator<Item = &'a Node>, query: &str, limit: usize) -> Vec<Node> {
    let query_lower = query.to_lowercase();
    let mut matches: Vec<(u8, &Node)> = nodes
        .filter_map(|n| match_tier(n, &query_lower).map(|tier| (tier, n)))
        .collect();
    matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.created_at.cmp(&a.1.created_at)));
    matches.into_iter().take(limit).map(|(_, n)| n.clone()).collect()
}
