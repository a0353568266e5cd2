//! The `Larder` facade: one configured entry point over the provider
//! client and the recommender.

mod builder;

pub use builder::LarderBuilder;

use std::path::Path;

use crate::provider::{RecipeProvider, SearchResult};
use crate::recommend::{Recommendation, Recommender, TrainReport};
use crate::types::RecipeDetail;
use crate::Result;

/// Recipe discovery for a pantry: provider search with tiered fallback,
/// lazy detail lookup, and content-based recommendations.
pub struct Larder {
    provider: RecipeProvider,
    recommender: Recommender,
}

impl Larder {
    /// Create a new builder for configuring a [`Larder`].
    pub fn builder() -> LarderBuilder {
        LarderBuilder::new()
    }

    pub(crate) fn new(provider: RecipeProvider, recommender: Recommender) -> Self {
        Self {
            provider,
            recommender,
        }
    }

    /// Search for recipes reachable from the given ingredient names.
    ///
    /// Never fails; the [`SearchResult`] names the tier that answered.
    pub async fn search(
        &self,
        ingredients: &[String],
        diet: Option<&str>,
        number: usize,
    ) -> SearchResult {
        self.provider.search(ingredients, diet, number).await
    }

    /// Full detail record for one recipe id, or `None` if unavailable.
    pub async fn details(&self, id: u64) -> Option<RecipeDetail> {
        self.provider.details(id).await
    }

    /// Rank the trained catalog against a pantry's ingredient names.
    pub fn recommend(
        &self,
        pantry: &[String],
        top_k: usize,
        diet: Option<&str>,
    ) -> Result<Vec<Recommendation>> {
        self.recommender.recommend(pantry, top_k, diet)
    }

    /// Train the recommendation index from a corpus file.
    pub fn train(&self, corpus: &Path) -> Result<TrainReport> {
        self.recommender.train(corpus)
    }
}
