//! Deterministic, dependency-free TF-IDF fallback embedding provider,
//! spec.md §4.C8.

use std::collections::HashMap;

use noema_core::errors::GraphResult;
use noema_core::traits::EmbeddingProvider;

use crate::tokenize::tokenize;
use crate::vocabulary::idf_for;

/// Hash a term into a bucket index with FNV-1a.
fn hash_term(term: &str, dims: usize) -> usize {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in term.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    (h as usize) % dims
}

/// Produces dense vectors by hashing terms into fixed-dimension buckets
/// and weighting by `tf * idf`, with IDF drawn from the static domain
/// vocabulary. Always available; no external model or network call.
pub struct TfIdfProvider {
    dimensions: usize,
}

impl TfIdfProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut vector = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vector;
        }

        let mut term_counts: HashMap<&str, f32> = HashMap::new();
        for token in &tokens {
            *term_counts.entry(token.as_str()).or_default() += 1.0;
        }
        let total = tokens.len() as f32;

        for (term, count) in &term_counts {
            let tf = count / total;
            let idf = idf_for(term);
            let bucket = hash_term(term, self.dimensions);
            vector[bucket] += tf * idf;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl EmbeddingProvider for TfIdfProvider {
    fn embed(&self, text: &str) -> GraphResult<Vec<f32>> {
        Ok(self.vector_for(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = TfIdfProvider::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn produces_requested_dimensions() {
        let p = TfIdfProvider::new(768);
        assert_eq!(p.embed("transformer attention gradient descent").unwrap().len(), 768);
    }

    #[test]
    fn output_is_l2_normalized() {
        let p = TfIdfProvider::new(256);
        let v = p.embed("rust systems programming language").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic_across_calls() {
        let p = TfIdfProvider::new(256);
        assert_eq!(p.embed("deterministic embedding test").unwrap(), p.embed("deterministic embedding test").unwrap());
    }

    #[test]
    fn batch_matches_individual() {
        let p = TfIdfProvider::new(128);
        let texts = vec!["hello world".to_string(), "foo bar baz".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).unwrap());
        }
    }

    #[test]
    fn is_always_available() {
        assert!(TfIdfProvider::new(64).is_available());
    }

    #[test]
    fn shared_domain_vocabulary_raises_similarity() {
        let p = TfIdfProvider::new(256);
        let a = p.embed("the transformer uses attention").unwrap();
        let b = p.embed("attention drives the transformer architecture").unwrap();
        let c = p.embed("cooking recipes for pasta dishes").unwrap();

        let cos_ab: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let cos_ac: f32 = a.iter().zip(&c).map(|(x, y)| x * y).sum();
        assert!(cos_ab > cos_ac);
    }
}
