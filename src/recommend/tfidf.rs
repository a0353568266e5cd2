//! Term-weighting vectorizer for ingredient text.
//!
//! TF-IDF over unigrams and bigrams with a minimum document frequency
//! of 2 (terms appearing in fewer than two recipes are noise) and
//! smoothed idf `ln((1+n)/(1+df)) + 1`. Rows and query vectors are
//! L2-normalized, so the inner product of two vectors is their cosine
//! similarity. The vocabulary is ordered lexicographically so fitting
//! the same corpus twice yields an identical model.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{LarderError, Result};

/// Terms must appear in at least this many documents to enter the
/// vocabulary.
pub const MIN_DOC_FREQ: usize = 2;

/// A sparse feature vector: `(column, weight)` pairs sorted by column.
pub type SparseVector = Vec<(u32, f32)>;

/// Fitted vocabulary + idf weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit a vectorizer over the corpus and return it together with the
    /// weighted, L2-normalized row for each document.
    ///
    /// Fails if min-df filtering leaves an empty vocabulary (a corpus of
    /// all-unique ingredient lists cannot be indexed).
    pub fn fit(docs: &[String]) -> Result<(Self, Vec<SparseVector>)> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| features(d)).collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for terms in &tokenized {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let mut kept: Vec<&str> = df
            .iter()
            .filter(|(_, count)| **count >= MIN_DOC_FREQ)
            .map(|(term, _)| *term)
            .collect();
        kept.sort_unstable();
        if kept.is_empty() {
            return Err(LarderError::DataError(
                "empty vocabulary after minimum-document-frequency filtering".into(),
            ));
        }

        let n = docs.len() as f32;
        let idf: Vec<f32> = kept
            .iter()
            .map(|term| ((1.0 + n) / (1.0 + df[*term] as f32)).ln() + 1.0)
            .collect();
        let vocabulary: HashMap<String, usize> = kept
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect();

        let model = Self { vocabulary, idf };
        let rows = tokenized.iter().map(|terms| model.weigh(terms)).collect();
        Ok((model, rows))
    }

    /// Transform a token string into a weighted, L2-normalized vector.
    ///
    /// Tokens outside the vocabulary are ignored, not an error; a query
    /// of only-unseen tokens yields the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&features(text))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in terms {
            if let Some(&col) = self.vocabulary.get(term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(col, tf)| (col as u32, tf * self.idf[col]))
            .collect();
        vector.sort_unstable_by_key(|(col, _)| *col);
        l2_normalize(&mut vector);
        vector
    }
}

/// Unigram + adjacent-bigram features of a whitespace-tokenized string.
fn features(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut feats: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for pair in tokens.windows(2) {
        feats.push(format!("{} {}", pair[0], pair[1]));
    }
    feats
}

fn l2_normalize(vector: &mut SparseVector) {
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in vector.iter_mut() {
            *w /= norm;
        }
    }
}

/// Inner product of two sorted sparse vectors.
pub fn dot(a: &SparseVector, b: &SparseVector) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
