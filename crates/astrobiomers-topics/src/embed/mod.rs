//! Sentence embedding backends (§4.6 "Embed abstracts with a biomedical
//! sentence-embedding model").
//!
//! `embed` takes a batch of texts and returns fixed-width vectors. The
//! default is a deterministic hashing embedder so the stage runs without a
//! model download; `candle_embed` behind the `candle` feature loads a real
//! BiomedBERT checkpoint for a production deployment.

#[cfg(feature = "candle")]
pub mod candle_embed;

pub trait SentenceEmbedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>>;
}

/// Deterministic hashing-trick embedder: no network, no model weights.
/// Each token hashes into one of `dim` buckets with a sign derived from a
/// second hash, in the style of Vowpal-Wabbit-style feature hashing; the
/// resulting vector is L2-normalized.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl SentenceEmbedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts.iter().map(|t| self.embed_one(t)).collect()
    }
}

impl HashingEmbedder {
    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let lower = token.to_lowercase();
            let h = fnv1a(lower.as_bytes());
            let bucket = (h as usize) % self.dim;
            let sign = if (h >> 63) & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        l2_normalize(&mut vector);
        vector
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-9 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_yields_same_vector() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed_one("microgravity induces bone loss");
        let b = embedder.embed_one("microgravity induces bone loss");
        assert_eq!(a, b);
    }

    #[test]
    fn vectors_are_l2_normalized() {
        let embedder = HashingEmbedder::default();
        let v = embedder.embed_one("spaceflight osteoporosis mice");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4 || norm == 0.0);
    }

    #[test]
    fn different_text_yields_different_vector() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed_one("microgravity");
        let b = embedder.embed_one("completely unrelated phrase about fungi");
        assert_ne!(a, b);
    }
}
