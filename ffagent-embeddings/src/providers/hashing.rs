//! Local term-hashing embedding provider.
//!
//! Generates fixed-dimension vectors from term-frequency scores hashed into
//! buckets, with adjacent-pair buckets so compound phrasings ("splice loss")
//! land differently from their parts. No external dependencies; used for
//! tests and air-gapped deployments.

use std::collections::HashMap;

use ffagent_core::errors::AgentResult;
use ffagent_core::traits::IEmbeddingProvider;

/// Deterministic local embedding provider.
///
/// Far less semantically rich than a neural model, but always available,
/// and similar questions still share buckets.
pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Tokenize text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Build a normalized term-frequency vector for the given text.
    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<String, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }
        // Adjacent pairs weigh compound terms as units.
        for pair in tokens.windows(2) {
            *tf.entry(format!("{} {}", pair[0], pair[1])).or_default() += 0.5;
        }

        let total = tokens.len() as f32;
        let mut vec = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms carry more signal than likely stopwords.
            let weight = 1.0 + (term.len() as f32).ln();
            let bucket = Self::hash_term(term, self.dimensions);
            vec[bucket] += freq * weight;
        }

        // L2 normalize.
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> AgentResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        "hashing-v1"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = HashingProvider::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn produces_correct_dimensions() {
        let p = HashingProvider::new(384);
        let v = p.embed("show all drops in lawley").unwrap();
        assert_eq!(v.len(), 384);
    }

    #[test]
    fn output_is_normalized() {
        let p = HashingProvider::new(256);
        let v = p.embed("average splice loss for mamelodi").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic() {
        let p = HashingProvider::new(256);
        let a = p.embed("list all technicians").unwrap();
        let b = p.embed("list all technicians").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn batch_matches_individual() {
        let p = HashingProvider::new(128);
        let texts = vec!["show all poles".to_string(), "count drops".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).unwrap());
        }
    }

    #[test]
    fn similar_questions_have_higher_cosine() {
        let p = HashingProvider::new(256);
        let a = p.embed("show all drops in lawley").unwrap();
        let b = p.embed("list drops in lawley").unwrap();
        let c = p.embed("which employee approved the budget").unwrap();

        let cos_ab: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let cos_ac: f32 = a.iter().zip(&c).map(|(x, y)| x * y).sum();
        assert!(cos_ab > cos_ac);
    }

    #[test]
    fn compound_terms_shift_the_vector() {
        let p = HashingProvider::new(256);
        let compound = p.embed("splice loss").unwrap();
        let reversed = p.embed("loss splice").unwrap();
        assert_ne!(compound, reversed);
    }
}
