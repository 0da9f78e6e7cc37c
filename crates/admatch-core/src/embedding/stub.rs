use super::error::EmbeddingError;

#[derive(Debug, Clone)]
/// Deterministic embedder for tests and offline runs.
///
/// Vectors are seeded from a hash of the input text, so equal texts always
/// embed identically within a build. The output carries no semantic
/// meaning.
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Returns the output dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fabricates a unit-length vector seeded from `text`.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);
        let mut state = seed;

        for _ in 0..self.dimension {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        Ok(normalize(embedding))
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
