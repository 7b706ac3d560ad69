//! Cosine similarity, spec.md §4.C8: pad the shorter vector with zeros,
//! return 0 when either magnitude is 0.
//!
//! Mirrors `noema_storage::search::cosine` exactly; kept as a separate
//! copy so this crate has no dependency on the storage layer — callers
//! doing text-core work (keyword ranking, consolidation similarity
//! outside of storage) shouldn't need to pull in `noema-storage`.

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
