//! Hash embeddings
//!
//! FNV-1a feature hashing over word unigrams and bigrams. No ML model
//! dependencies, fully deterministic, and every non-empty embedding is
//! L2-normalized so inner product equals cosine similarity.

use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::error::{Result, ScoutError};

/// Pluggable embedding backend interface
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts. Output order matches input order and every
    /// vector has `dims()` components. An empty batch yields an empty vec.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text])?
            .pop()
            .ok_or_else(|| ScoutError::Embedding("embedder returned no vector".to_string()))
    }

    fn dims(&self) -> usize;

    fn name(&self) -> &str;
}

/// Build an embedder from search config.
pub fn build_embedder(config: &SearchConfig) -> Result<Box<dyn Embedder>> {
    let backend = config.embedding_backend.trim().to_lowercase();
    let dims = config.embedding_dims as usize;
    if dims == 0 {
        return Err(ScoutError::Config(
            "search.embedding_dims must be greater than 0".to_string(),
        ));
    }

    match backend.as_str() {
        "" | "hash" => Ok(Box::new(HashEmbedder::new(dims))),
        "local" | "api" => Err(ScoutError::NotImplemented(format!(
            "search.embedding_backend={backend} is not available in this build"
        ))),
        other => Err(ScoutError::Config(format!(
            "unknown embedding backend: {other}"
        ))),
    }
}

/// Hash embedder using FNV-1a
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    /// Embedding dimension (default: 384)
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dim: 384 }
    }
}

impl HashEmbedder {
    /// Create embedder with specified dimension
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Embed a single text into a vector. Text without any token of two or
    /// more characters maps to the zero vector.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        if self.dim == 0 {
            return Vec::new();
        }

        let tokens = tokenize(text);
        let mut embedding = vec![0.0; self.dim];

        if tokens.is_empty() {
            return embedding;
        }

        for token in &tokens {
            accumulate_embedding(&mut embedding, token, 1.0);
        }

        for window in tokens.windows(2) {
            let bigram = format!("{} {}", window[0], window[1]);
            accumulate_embedding(&mut embedding, &bigram, 0.5);
        }

        l2_normalize(&mut embedding);
        embedding
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.par_iter().map(|text| self.embed_text(text)).collect())
    }

    fn dims(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        "hash"
    }
}

pub(crate) fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|token| token.len() >= 2)
        .map(str::to_string)
        .collect()
}

/// Signed hash features set per token.
const FEATURES_PER_TOKEN: u8 = 4;

fn accumulate_embedding(embedding: &mut [f32], token: &str, weight: f32) {
    let len = embedding.len() as u64;
    let token_hash = fnv1a_hash(token.as_bytes());

    // fnv1a(token || salt): each salt picks one dimension and a sign
    for salt in 0..FEATURES_PER_TOKEN {
        let hash = fnv1a_extend(token_hash, &[salt]);
        let dim = (hash % len) as usize;
        let sign = if hash >> 63 == 0 { weight } else { -weight };
        embedding[dim] += sign;
    }
}

fn fnv1a_hash(data: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    fnv1a_extend(FNV_OFFSET, data)
}

fn fnv1a_extend(mut hash: u64, data: &[u8]) -> u64 {
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    for byte in data {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn l2_normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vec.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Cosine similarity between two vectors of any length (0.0 on mismatch
    /// or zero norm).
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot = dot_product(a, b);
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a * norm_b)
        }
    }

    #[test]
    fn test_fnv1a_hash_known_value() {
        assert_eq!(fnv1a_hash(b"hello"), 0xa430_d846_80aa_bd0b);
    }

    #[test]
    fn test_embedding_dimensions() {
        let embedder = HashEmbedder::new(64);
        let embedding = embedder.embed_one("python backend engineer").unwrap();
        assert_eq!(embedding.len(), 64);
        assert_eq!(embedder.dims(), 64);
    }

    #[test]
    fn test_embedding_normalized() {
        let embedder = HashEmbedder::new(128);
        let embedding = embedder.embed_one("react and node developer").unwrap();
        assert!((norm(&embedding) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_embedding_without_tokens_is_zero() {
        let embedder = HashEmbedder::new(32);
        // 1-char tokens are dropped by the tokenizer
        let embedding = embedder.embed_one("a b c d").unwrap();
        assert_eq!(norm(&embedding), 0.0);
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::new(96);
        let a = embedder.embed_one("Senior Python engineer, Docker and AWS").unwrap();
        let b = embedder.embed_one("Senior Python engineer, Docker and AWS").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_preserves_order() {
        let embedder = HashEmbedder::new(64);
        let texts = ["python flask", "react node", "aws docker"];
        let batch = embedder.embed(&texts).unwrap();
        assert_eq!(batch.len(), 3);
        for (text, vector) in texts.iter().zip(&batch) {
            assert_eq!(vector, &embedder.embed_one(text).unwrap());
        }
    }

    #[test]
    fn test_empty_batch_yields_empty_output() {
        let embedder = HashEmbedder::new(64);
        assert!(embedder.embed(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_similarity_prefers_related_text() {
        let embedder = HashEmbedder::new(256);
        let a = embedder.embed_one("python backend engineer flask").unwrap();
        let b = embedder.embed_one("python backend developer fastapi").unwrap();
        let c = embedder.embed_one("watercolor painting landscapes").unwrap();

        assert!(cosine_similarity(&a, &b) > cosine_similarity(&a, &c));
    }

    #[test]
    fn test_related_text_beats_unrelated_across_dims() {
        for dims in [64, 128, 256, 384] {
            let embedder = HashEmbedder::new(dims);
            let a = embedder.embed_one("python backend engineer flask").unwrap();
            let b = embedder.embed_one("python backend developer fastapi").unwrap();
            let c = embedder.embed_one("watercolor painting landscapes").unwrap();
            let single = embedder.embed_one("python").unwrap();

            let related = cosine_similarity(&a, &b);
            let unrelated = cosine_similarity(&a, &c);
            assert!(related > unrelated, "dims={dims}: {related} <= {unrelated}");
            for (x, y) in [(&a, &b), (&a, &c), (&b, &c), (&single, &a)] {
                let sim = cosine_similarity(x, y);
                assert!(sim.abs() < 0.99, "dims={dims}: collinear ({sim})");
            }
        }
    }

    #[test]
    fn test_single_token_sets_few_dimensions() {
        let embedder = HashEmbedder::new(384);
        let embedding = embedder.embed_one("python").unwrap();
        let nonzero = embedding.iter().filter(|x| **x != 0.0).count();
        assert!((1..=usize::from(FEATURES_PER_TOKEN)).contains(&nonzero));
    }

    #[test]
    fn test_fnv1a_extend_matches_concatenation() {
        assert_eq!(fnv1a_extend(fnv1a_hash(b"hel"), b"lo"), fnv1a_hash(b"hello"));
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_build_embedder_defaults_to_hash() {
        let config = SearchConfig::default();
        let embedder = build_embedder(&config).unwrap();
        assert_eq!(embedder.name(), "hash");
        assert_eq!(embedder.dims(), config.embedding_dims as usize);
    }

    #[test]
    fn test_build_embedder_rejects_zero_dims() {
        let config = SearchConfig {
            embedding_dims: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(build_embedder(&config), Err(ScoutError::Config(_))));
    }

    #[test]
    fn test_build_embedder_unknown_backend() {
        let config = SearchConfig {
            embedding_backend: "quantum".to_string(),
            ..SearchConfig::default()
        };
        assert!(matches!(build_embedder(&config), Err(ScoutError::Config(_))));

        let config = SearchConfig {
            embedding_backend: "api".to_string(),
            ..SearchConfig::default()
        };
        assert!(matches!(
            build_embedder(&config),
            Err(ScoutError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_embedding_normalized_random_inputs() {
        let embedder = HashEmbedder::new(64);
        let mut seed = 0x1234_5678_9abc_def0u64;

        for _ in 0..20 {
            let text = random_text(&mut seed, 6);
            let embedding = embedder.embed_one(&text).unwrap();
            assert!((norm(&embedding) - 1.0).abs() < 1e-3);
        }
    }

    fn random_text(seed: &mut u64, words: usize) -> String {
        let mut out = String::new();
        for i in 0..words {
            if i > 0 {
                out.push(' ');
            }
            let len = 3 + (next_u32(seed) % 6) as usize;
            for _ in 0..len {
                out.push((b'a' + (next_u32(seed) % 26) as u8) as char);
            }
        }
        out
    }

    fn next_u32(seed: &mut u64) -> u32 {
        *seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (*seed >> 32) as u32
    }
}
