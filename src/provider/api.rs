//! HTTP transport for the external recipe provider.
//!
//! [`RecipeApi`] is the seam between protocol orchestration
//! ([`RecipeProvider`](super::RecipeProvider)) and the wire: tests drive
//! the protocol with scripted implementations, production uses
//! [`HttpRecipeApi`] against the real endpoints (or a wiremock server
//! via [`ProviderConfig::base_url`](super::ProviderConfig)).
//!
//! `HttpRecipeApi` owns credential rotation: each outbound call selects
//! the pool's current key and, on a rotate signal (401/402/429 or a
//! transport failure), advances the pool and retries with the next key.
//! The retry budget is one full pass over the pool; exhausting it yields
//! [`LarderError::CredentialsExhausted`], the "no response" condition
//! the caller's fallback chain absorbs. Any other non-200 status fails
//! the attempt immediately without consuming further keys.

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::telemetry;
use crate::types::{Ingredient, RecipeDetail, RecipeSummary, SearchQuery};
use crate::{LarderError, Result};

use super::ProviderConfig;
use super::image::resolve_image;
use super::keypool::KeyPool;

/// Most ingredient names forwarded per search request.
const MAX_QUERY_INGREDIENTS: usize = 20;

/// Transport-level view of the recipe provider.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Primary search strategy: ingredient-inclusive metadata search
    /// with rich summaries.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>>;

    /// Secondary search strategy: ranked-by-ingredient-match search with
    /// leaner summaries.
    async fn search_by_ingredients(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>>;

    /// Full detail record for one recipe id.
    async fn information(&self, id: u64) -> Result<RecipeDetail>;
}

/// reqwest-backed [`RecipeApi`] with key rotation.
pub struct HttpRecipeApi {
    http: reqwest::Client,
    base_url: String,
    cdn_base: String,
    pool: KeyPool,
}

impl HttpRecipeApi {
    /// Build a transport from provider configuration.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LarderError::Configuration(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cdn_base: config.cdn_base_url.trim_end_matches('/').to_string(),
            pool: KeyPool::new(config.api_keys.clone()),
        })
    }

    /// The credential pool, exposed for inspection in tests.
    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }

    /// GET a JSON document through the key-rotation loop.
    ///
    /// One full pass over the pool; timed-out and errored attempts count
    /// against the budget and advance rotation like rejected keys do.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, path);
        let attempts = self.pool.len().max(1);
        for _ in 0..attempts {
            let Some(key) = self.pool.current() else {
                break;
            };
            let response = self
                .http
                .get(&url)
                .query(params)
                .query(&[("apiKey", key)])
                .send()
                .await;
            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    warn!(endpoint, error = %e, "transport failure, rotating credential");
                    self.rotate(endpoint);
                    continue;
                }
            };
            match response.status().as_u16() {
                200 => {
                    let parsed = response
                        .json::<T>()
                        .await
                        .map_err(|e| LarderError::Http(e.to_string()));
                    Self::record_request(endpoint, start, parsed.is_ok());
                    return parsed;
                }
                status @ (401 | 402 | 429) => {
                    warn!(endpoint, status, "credential rejected, rotating");
                    self.rotate(endpoint);
                }
                status => {
                    Self::record_request(endpoint, start, false);
                    return Err(LarderError::Api {
                        status,
                        message: format!("provider returned status {status}"),
                    });
                }
            }
        }
        Self::record_request(endpoint, start, false);
        Err(LarderError::CredentialsExhausted)
    }

    fn rotate(&self, endpoint: &'static str) {
        self.pool.advance();
        metrics::counter!(telemetry::KEY_ROTATIONS_TOTAL, "endpoint" => endpoint).increment(1);
    }

    fn record_request(endpoint: &'static str, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::PROVIDER_REQUESTS_TOTAL,
            "endpoint" => endpoint,
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::PROVIDER_REQUEST_DURATION_SECONDS,
            "endpoint" => endpoint,
        )
        .record(start.elapsed().as_secs_f64());
    }

    fn joined_ingredients(query: &SearchQuery) -> String {
        query
            .ingredients
            .iter()
            .take(MAX_QUERY_INGREDIENTS)
            .cloned()
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>> {
        let mut params = vec![
            ("includeIngredients", Self::joined_ingredients(query)),
            ("fillIngredients", "true".into()),
            ("addRecipeInformation", "true".into()),
            ("instructionsRequired", "true".into()),
            ("number", query.number.to_string()),
            ("sort", "meta-score".into()),
        ];
        if let Some(diet) = &query.diet {
            params.push(("diet", diet.clone()));
        }
        let body: ComplexSearchResponse = self
            .get_json("search", "/recipes/complexSearch", &params)
            .await?;
        Ok(body
            .results
            .into_iter()
            .filter_map(|rec| rec.into_summary(&self.cdn_base, false))
            .collect())
    }

    async fn search_by_ingredients(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>> {
        let params = vec![
            ("ingredients", Self::joined_ingredients(query)),
            ("number", query.number.to_string()),
            ("ranking", "1".into()),
            ("ignorePantry", "true".into()),
        ];
        let body: Vec<SearchRecord> = self
            .get_json(
                "search_by_ingredients",
                "/recipes/findByIngredients",
                &params,
            )
            .await?;
        Ok(body
            .into_iter()
            .filter_map(|rec| rec.into_summary(&self.cdn_base, true))
            .collect())
    }

    async fn information(&self, id: u64) -> Result<RecipeDetail> {
        let params = vec![("includeNutrition", "false".to_string())];
        let body: InformationResponse = self
            .get_json(
                "information",
                &format!("/recipes/{id}/information"),
                &params,
            )
            .await?;
        Ok(body.into_detail(&self.cdn_base))
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[derive(Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Vec<SearchRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRecord {
    id: Option<u64>,
    title: Option<String>,
    image: Option<String>,
    image_type: Option<String>,
    used_ingredient_count: Option<u32>,
    missed_ingredient_count: Option<u32>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    source_url: Option<String>,
    spoonacular_source_url: Option<String>,
}

impl SearchRecord {
    /// Normalize one wire record into a summary.
    ///
    /// Records without an id are dropped — they cannot be detailed or
    /// cached. The secondary strategy's records are lean: no source URL,
    /// timing, or servings regardless of what the wire carried.
    fn into_summary(self, cdn_base: &str, lean: bool) -> Option<RecipeSummary> {
        let id = self.id?;
        let image = resolve_image(
            self.image.as_deref(),
            Some(id),
            self.image_type.as_deref(),
            cdn_base,
        );
        Some(RecipeSummary {
            id,
            title: self.title.unwrap_or_default(),
            image,
            used_ingredient_count: self.used_ingredient_count.unwrap_or(0),
            missed_ingredient_count: self.missed_ingredient_count.unwrap_or(0),
            ready_in_minutes: if lean { None } else { self.ready_in_minutes },
            servings: if lean { None } else { self.servings },
            source_url: if lean {
                None
            } else {
                self.source_url.or(self.spoonacular_source_url)
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InformationResponse {
    id: u64,
    title: Option<String>,
    image: Option<String>,
    image_type: Option<String>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    source_url: Option<String>,
    spoonacular_source_url: Option<String>,
    #[serde(default)]
    extended_ingredients: Vec<WireIngredient>,
    #[serde(default)]
    analyzed_instructions: Vec<WireInstructionGroup>,
    instructions: Option<String>,
}

#[derive(Deserialize)]
struct WireIngredient {
    name: Option<String>,
    amount: Option<f64>,
    unit: Option<String>,
    original: Option<String>,
}

#[derive(Deserialize)]
struct WireInstructionGroup {
    #[serde(default)]
    steps: Vec<WireStep>,
}

#[derive(Deserialize)]
struct WireStep {
    step: Option<String>,
}

impl InformationResponse {
    fn into_detail(self, cdn_base: &str) -> RecipeDetail {
        let image = resolve_image(
            self.image.as_deref(),
            Some(self.id),
            self.image_type.as_deref(),
            cdn_base,
        );
        let mut steps: Vec<String> = self
            .analyzed_instructions
            .into_iter()
            .flat_map(|group| group.steps)
            .filter_map(|s| s.step)
            .filter(|s| !s.is_empty())
            .collect();
        if steps.is_empty() {
            if let Some(flat) = self.instructions.filter(|s| !s.trim().is_empty()) {
                steps = vec![flat];
            }
        }
        RecipeDetail {
            id: self.id,
            title: self.title.unwrap_or_default(),
            image,
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            source_url: self.source_url.or(self.spoonacular_source_url),
            ingredients: self
                .extended_ingredients
                .into_iter()
                .map(|i| Ingredient {
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                    original: i.original,
                })
                .collect(),
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_record_without_id_is_dropped() {
        let rec: SearchRecord = serde_json::from_str(r#"{"title": "Mystery"}"#).unwrap();
        assert!(rec.into_summary("https://cdn", false).is_none());
    }

    #[test]
    fn lean_normalization_strips_rich_fields() {
        let rec: SearchRecord = serde_json::from_str(
            r#"{"id": 7, "title": "Dal", "readyInMinutes": 25, "servings": 4,
                "sourceUrl": "https://example.com/dal"}"#,
        )
        .unwrap();
        let summary = rec.into_summary("https://cdn", true).unwrap();
        assert_eq!(summary.ready_in_minutes, None);
        assert_eq!(summary.servings, None);
        assert_eq!(summary.source_url, None);
    }

    #[test]
    fn detail_falls_back_to_flat_instructions() {
        let body: InformationResponse = serde_json::from_str(
            r#"{"id": 3, "title": "Toast", "instructions": "Toast the bread."}"#,
        )
        .unwrap();
        let detail = body.into_detail("https://cdn");
        assert_eq!(detail.steps, vec!["Toast the bread.".to_string()]);
        assert!(detail.ingredients.is_empty());
    }

    #[test]
    fn detail_prefers_structured_steps() {
        let body: InformationResponse = serde_json::from_str(
            r#"{"id": 3, "title": "Toast",
                "analyzedInstructions": [{"steps": [{"step": "Slice."}, {"step": "Toast."}]}],
                "instructions": "ignored"}"#,
        )
        .unwrap();
        let detail = body.into_detail("https://cdn");
        assert_eq!(detail.steps, vec!["Slice.".to_string(), "Toast.".to_string()]);
    }
}
