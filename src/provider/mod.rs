//! Recipe provider client: tiered retrieval with credential rotation.
//!
//! [`RecipeProvider`] produces a list of summaries for a search request
//! and a detail record for a recipe id while tolerating upstream
//! unavailability. Retrieval tiers for a list request, in order:
//!
//! 1. fresh cache entry (or, in offline mode: fresh cache → offline
//!    catalog, with no network attempt at all)
//! 2. primary search strategy (rich summaries)
//! 3. secondary search strategy (lean summaries)
//! 4. stale cache entry
//! 5. offline catalog defaults
//!
//! Every provider/network failure is absorbed here and converted into a
//! degraded-but-valid result; callers never see transport errors. The
//! [`ResultSource`] on each result names the tier that served it.

pub mod api;
pub mod image;
pub mod keypool;

pub use api::{HttpRecipeApi, RecipeApi};
pub use keypool::KeyPool;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{DetailStore, ListCache, fingerprint};
use crate::catalog::OfflineCatalog;
use crate::telemetry;
use crate::types::{RecipeDetail, RecipeSummary, SearchQuery, normalize_diet};
use crate::{LarderError, Result};

/// Ingredients substituted when a search arrives with none.
///
/// Searching with zero ingredients is not a valid provider request, but
/// a key-less first visit should still show something.
const DEFAULT_SEARCH_INGREDIENTS: &[&str] = &["egg", "milk", "bread"];

/// Result count used when the caller passes zero.
const DEFAULT_RESULT_COUNT: usize = 10;

/// Configuration for the recipe provider client.
///
/// Explicit state only: TTL, offline mode, the credential pool, and all
/// base paths travel in here rather than in ambient process state.
///
/// ```rust
/// # use larder::ProviderConfig;
/// # use std::time::Duration;
/// let config = ProviderConfig::new()
///     .api_keys(["key-a", "key-b"])
///     .ttl(Duration::from_secs(24 * 3600))
///     .offline(false);
/// ```
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Credential pool, rotated on 401/402/429 and transport failures.
    pub api_keys: Vec<String>,
    /// Provider API base URL.
    pub base_url: String,
    /// CDN base for resolving bare/synthesized image references.
    pub cdn_base_url: String,
    /// Root for the cache stores and the offline dataset.
    pub data_dir: PathBuf,
    /// Time-to-live for cached list results. Default: 3 days.
    pub ttl: Duration,
    /// Per-request network timeout. Default: 12 seconds.
    pub timeout: Duration,
    /// When set, no network I/O is attempted at all.
    pub offline: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("larder");
        Self {
            api_keys: Vec::new(),
            base_url: "https://api.spoonacular.com".into(),
            cdn_base_url: "https://img.spoonacular.com/recipes".into(),
            data_dir,
            ttl: Duration::from_secs(3 * 24 * 3600),
            timeout: Duration::from_secs(12),
            offline: false,
        }
    }
}

impl ProviderConfig {
    /// Create a config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credential pool.
    pub fn api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the provider API base URL (wiremock servers in tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the image CDN base URL.
    pub fn cdn_base_url(mut self, url: impl Into<String>) -> Self {
        self.cdn_base_url = url.into();
        self
    }

    /// Set the data directory (caches + offline dataset).
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the list-result TTL.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the network timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Path of the list-result cache document.
    pub fn list_cache_path(&self) -> PathBuf {
        self.data_dir.join("cache").join("recipes_cache.json")
    }

    /// Directory of per-id detail cache documents.
    pub fn detail_cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache").join("recipe_details")
    }

    /// Path of the optional offline dataset file.
    pub fn offline_dataset_path(&self) -> PathBuf {
        self.data_dir.join("demo_recipes.json")
    }

    /// Directory of optional offline per-id detail files.
    pub fn offline_details_dir(&self) -> PathBuf {
        self.data_dir.join("demo_recipe_details")
    }
}

/// Which tier served a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// Fresh cache entry.
    Cache,
    /// Primary search strategy (live provider).
    Primary,
    /// Secondary search strategy (live provider).
    Secondary,
    /// Cache entry older than the TTL, served because every network
    /// strategy failed.
    StaleCache,
    /// Offline catalog defaults.
    Offline,
}

/// A search outcome: the recipes plus the tier that produced them.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub recipes: Vec<RecipeSummary>,
    pub source: ResultSource,
}

/// Client for the external recipe provider with caching and fallback.
pub struct RecipeProvider {
    api: Arc<dyn RecipeApi>,
    list_cache: ListCache,
    details: DetailStore,
    catalog: OfflineCatalog,
    offline: bool,
}

impl RecipeProvider {
    /// Build a provider with the reqwest-backed transport.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api = Arc::new(HttpRecipeApi::new(&config)?);
        Ok(Self::with_api(config, api))
    }

    /// Build a provider over an explicit transport (test seam).
    pub fn with_api(config: ProviderConfig, api: Arc<dyn RecipeApi>) -> Self {
        Self {
            api,
            list_cache: ListCache::new(config.list_cache_path(), config.ttl),
            details: DetailStore::new(config.detail_cache_dir()),
            catalog: OfflineCatalog::new(
                config.offline_dataset_path(),
                config.offline_details_dir(),
            ),
            offline: config.offline,
        }
    }

    /// Search for recipes reachable from the given ingredient names.
    ///
    /// Never fails: some tier always answers, possibly with stale or
    /// offline data. A cache write only happens after a successful
    /// non-empty normalization.
    pub async fn search(
        &self,
        ingredients: &[String],
        diet: Option<&str>,
        number: usize,
    ) -> SearchResult {
        let number = if number == 0 {
            DEFAULT_RESULT_COUNT
        } else {
            number
        };
        let diet_norm = normalize_diet(diet);
        let mut ingredients: Vec<String> = ingredients
            .iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();

        if self.offline {
            let key = fingerprint(&ingredients, diet_norm.as_deref(), number);
            if let Some(entry) = self.list_cache.get(&key).await {
                if self.list_cache.fresh(&entry) {
                    debug!("offline: serving cached results");
                    return SearchResult {
                        recipes: entry.payload,
                        source: ResultSource::Cache,
                    };
                }
            }
            debug!("offline: serving catalog defaults");
            metrics::counter!(telemetry::FALLBACK_TOTAL, "tier" => "offline").increment(1);
            return SearchResult {
                recipes: self.catalog.defaults().await,
                source: ResultSource::Offline,
            };
        }

        if ingredients.is_empty() {
            ingredients = DEFAULT_SEARCH_INGREDIENTS
                .iter()
                .map(|s| s.to_string())
                .collect();
        }

        let key = fingerprint(&ingredients, diet_norm.as_deref(), number);
        let cached = self.list_cache.get(&key).await;
        if let Some(entry) = &cached {
            if self.list_cache.fresh(entry) {
                debug!("serving recipes from cache");
                return SearchResult {
                    recipes: entry.payload.clone(),
                    source: ResultSource::Cache,
                };
            }
        }

        let query = SearchQuery {
            ingredients,
            diet: diet_norm,
            number,
        };

        match self.api.search(&query).await {
            Ok(recipes) if !recipes.is_empty() => {
                self.list_cache.put(&key, recipes.clone()).await;
                return SearchResult {
                    recipes,
                    source: ResultSource::Primary,
                };
            }
            Ok(_) => debug!("primary search returned no results"),
            Err(LarderError::CredentialsExhausted) => {
                warn!("primary search: all credentials failed");
                return self.degraded(cached).await;
            }
            Err(e) => warn!(error = %e, "primary search failed"),
        }

        match self.api.search_by_ingredients(&query).await {
            Ok(recipes) if !recipes.is_empty() => {
                self.list_cache.put(&key, recipes.clone()).await;
                SearchResult {
                    recipes,
                    source: ResultSource::Secondary,
                }
            }
            Ok(_) => {
                debug!("secondary search returned no results");
                self.degraded(cached).await
            }
            Err(e) => {
                warn!(error = %e, "secondary search failed");
                self.degraded(cached).await
            }
        }
    }

    /// Detail record for one recipe id.
    ///
    /// Cache, then offline catalog, then (online only) the provider.
    /// `None` means "detail unavailable" — an informational state, never
    /// an error.
    pub async fn details(&self, id: u64) -> Option<RecipeDetail> {
        if let Some(detail) = self.details.get(id).await {
            return Some(detail);
        }
        if let Some(detail) = self.catalog.details_for(id).await {
            return Some(detail);
        }
        if self.offline {
            debug!(id, "offline: detail not cached, reporting unavailable");
            return None;
        }
        match self.api.information(id).await {
            Ok(detail) => {
                self.details.put(&detail).await;
                Some(detail)
            }
            Err(e) => {
                debug!(id, error = %e, "detail unavailable");
                None
            }
        }
    }

    /// Serve the degraded tiers: stale cache if one exists, catalog
    /// defaults otherwise.
    async fn degraded(&self, cached: Option<crate::cache::CacheEntry>) -> SearchResult {
        if let Some(entry) = cached {
            debug!("serving stale cached results");
            metrics::counter!(telemetry::FALLBACK_TOTAL, "tier" => "stale").increment(1);
            return SearchResult {
                recipes: entry.payload,
                source: ResultSource::StaleCache,
            };
        }
        debug!("serving catalog defaults");
        metrics::counter!(telemetry::FALLBACK_TOTAL, "tier" => "offline").increment(1);
        SearchResult {
            recipes: self.catalog.defaults().await,
            source: ResultSource::Offline,
        }
    }
}
