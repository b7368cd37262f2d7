//! Dense in-memory word vectors.
//!
//! Vectors are L2-normalised once at build time, so similarity is a dot
//! product and analogy queries are 3CosAdd over unit vectors.

use hashbrown::HashMap;

use crate::{Error, Result};
use super::EmbeddingModel;

/// In-memory embedding model.
#[derive(Debug, Clone)]
pub struct VectorModel {
    name: String,
    dims: usize,
    words: Vec<String>,
    vocab: HashMap<String, usize>,
    /// Row-major unit vectors, `words.len() * dims`.
    vectors: Vec<f32>,
}

impl VectorModel {
    /// Build a model from `(lemma, vector)` pairs.
    ///
    /// Fails on an empty vocabulary, mismatched dimensions, duplicate words,
    /// and zero or non-finite vectors.
    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (String, Vec<f32>)>,
    ) -> Result<Self> {
        let name = name.into();
        let mut dims = 0;
        let mut words = Vec::new();
        let mut vocab = HashMap::new();
        let mut vectors = Vec::new();

        for (word, mut vector) in entries {
            if words.is_empty() {
                dims = vector.len();
                if dims == 0 {
                    return Err(Error::ModelBuild(format!("'{word}' has an empty vector")));
                }
            } else if vector.len() != dims {
                return Err(Error::ModelBuild(format!(
                    "dimension mismatch for '{word}': expected {dims}, got {}", vector.len()
                )));
            }
            if vector.iter().any(|x| !x.is_finite()) {
                return Err(Error::ModelBuild(format!("'{word}' has a non-finite component")));
            }
            let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm <= f32::EPSILON {
                return Err(Error::ModelBuild(format!("'{word}' has a zero vector")));
            }
            vector.iter_mut().for_each(|x| *x /= norm);

            if vocab.insert(word.clone(), words.len()).is_some() {
                return Err(Error::ModelBuild(format!("duplicate word '{word}'")));
            }
            words.push(word);
            vectors.extend_from_slice(&vector);
        }

        if words.is_empty() {
            return Err(Error::ModelBuild(format!("{name}: vocabulary is empty")));
        }

        tracing::info!(model = %name, words = words.len(), dims, "embedding model built");
        Ok(Self { name, dims, words, vocab, vectors })
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    fn row(&self, idx: usize) -> &[f32] {
        &self.vectors[idx * self.dims..(idx + 1) * self.dims]
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        self.vocab.get(word).map(|&idx| self.row(idx))
    }

    /// Rank the vocabulary against a query vector, skipping `exclude`.
    fn rank(&self, query: &[f32], exclude: &[usize], k: usize) -> Vec<String> {
        let mut scored: Vec<(f32, usize)> = (0..self.words.len())
            .filter(|idx| !exclude.contains(idx))
            .map(|idx| (dot(query, self.row(idx)), idx))
            .collect();
        scored.sort_unstable_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.truncate(k);
        scored.into_iter().map(|(_, idx)| self.words[idx].clone()).collect()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl EmbeddingModel for VectorModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_word(&self, lemma: &str) -> bool {
        self.vocab.contains_key(lemma)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let (va, vb) = (self.vector(a)?, self.vector(b)?);
        Some(f64::from(dot(va, vb)))
    }

    fn closest_words(&self, positive: &[&str], negative: &[&str], k: usize) -> Vec<String> {
        let mut query = vec![0.0f32; self.dims];
        let mut exclude = Vec::with_capacity(positive.len() + negative.len());
        let mut found_positive = false;

        for (words, sign) in [(positive, 1.0f32), (negative, -1.0f32)] {
            for word in words {
                let Some(&idx) = self.vocab.get(*word) else {
                    continue;
                };
                if sign > 0.0 {
                    found_positive = true;
                }
                exclude.push(idx);
                for (q, x) in query.iter_mut().zip(self.row(idx)) {
                    *q += sign * x;
                }
            }
        }

        if !found_positive || k == 0 {
            return Vec::new();
        }
        let norm = dot(&query, &query).sqrt();
        if norm > f32::EPSILON {
            query.iter_mut().for_each(|q| *q /= norm);
        }
        self.rank(&query, &exclude, k)
    }

    fn nearest_words(&self, lemma: &str, k: usize) -> Vec<String> {
        match self.vocab.get(lemma) {
            Some(&idx) => self.rank(self.row(idx), &[idx], k),
            None => Vec::new(),
        }
    }

    fn vocabulary_size(&self) -> usize {
        self.words.len()
    }
}
