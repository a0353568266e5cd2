//! Content-based recipe recommender.
//!
//! Ranks a fixed catalog against a pantry's ingredient names using the
//! persisted TF-IDF index. The index is built by an explicit training
//! step ([`train`]), loaded lazily on the first recommendation request,
//! and reused until [`Recommender::reload`] or a new training run
//! invalidates it.

pub mod index;
pub mod tfidf;
pub mod train;

pub use index::{ArtifactPaths, CatalogRecipe, RecommendationIndex};
pub use tfidf::TfidfVectorizer;
pub use train::TrainReport;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::Result;

use tfidf::dot;
use train::normalize_tokens;

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub ingredients: String,
    pub diet_tag: Option<String>,
    /// Cosine similarity between the pantry query and this recipe's
    /// ingredient vector. Zero for the empty-pantry degenerate case.
    pub score: f32,
}

/// Pantry-to-catalog recommender over the persisted index.
pub struct Recommender {
    artifacts_dir: PathBuf,
    index: RwLock<Option<Arc<RecommendationIndex>>>,
}

impl Recommender {
    /// Create a recommender reading artifacts from `artifacts_dir`.
    pub fn new(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            index: RwLock::new(None),
        }
    }

    /// Train from a corpus file and swap in the new index.
    pub fn train(&self, corpus: &Path) -> Result<TrainReport> {
        let report = train::train(corpus, &self.artifacts_dir)?;
        self.reload();
        Ok(report)
    }

    /// Drop the cached index so the next request reloads from disk.
    pub fn reload(&self) {
        *self.index.write().expect("index lock poisoned") = None;
    }

    /// Rank the catalog against the pantry and return the top `top_k`.
    ///
    /// Deterministic for a fixed index and pantry: same ordering, same
    /// scores. An empty pantry yields the first `top_k` catalog rows in
    /// stored order, all scored zero. Fails with
    /// [`ModelNotTrained`](crate::LarderError::ModelNotTrained) when the
    /// artifacts are absent.
    pub fn recommend(
        &self,
        pantry: &[String],
        top_k: usize,
        diet: Option<&str>,
    ) -> Result<Vec<Recommendation>> {
        let index = self.load()?;
        let query = normalize_tokens(pantry);
        if query.is_empty() {
            debug!("empty pantry query, returning leading catalog rows");
            return Ok(index
                .catalog
                .iter()
                .take(top_k)
                .map(|row| to_recommendation(row, 0.0))
                .collect());
        }

        let query_vector = index.model.transform(&query);
        let mut scored: Vec<Recommendation> = index
            .catalog
            .iter()
            .zip(index.matrix.iter())
            .map(|(row, vector)| to_recommendation(row, dot(&query_vector, vector)))
            .collect();

        // Filtering commutes with sorting here; apply it before the sort
        // so top_k bounds the filtered set. Skipped entirely when the
        // corpus carried no diet tags.
        if let Some(diet) = diet.map(str::trim).filter(|d| !d.is_empty()) {
            let has_tags = index.catalog.iter().any(|row| row.diet_tag.is_some());
            if has_tags {
                scored.retain(|r| {
                    r.diet_tag
                        .as_deref()
                        .is_some_and(|tag| tag.eq_ignore_ascii_case(diet))
                });
            }
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    fn load(&self) -> Result<Arc<RecommendationIndex>> {
        if let Some(index) = self.index.read().expect("index lock poisoned").as_ref() {
            return Ok(index.clone());
        }
        let mut guard = self.index.write().expect("index lock poisoned");
        if let Some(index) = guard.as_ref() {
            return Ok(index.clone());
        }
        let paths = ArtifactPaths::in_dir(&self.artifacts_dir);
        let loaded = Arc::new(RecommendationIndex::load(&paths)?);
        debug!(
            recipes = loaded.catalog.len(),
            vocabulary = loaded.model.vocabulary_len(),
            "loaded recommendation index"
        );
        *guard = Some(loaded.clone());
        Ok(loaded)
    }
}

fn to_recommendation(row: &CatalogRecipe, score: f32) -> Recommendation {
    Recommendation {
        id: row.id.clone(),
        title: row.title.clone(),
        ingredients: row.ingredients.clone(),
        diet_tag: row.diet_tag.clone(),
        score,
    }
}
