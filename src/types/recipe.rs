//! Recipe listing and detail records.
//!
//! These are the normalized shapes produced by the provider client and
//! the offline catalog. Optional fields are genuinely optional in the
//! upstream responses — an absent image means "do not render an image",
//! never an empty string or a broken reference.

use serde::{Deserialize, Serialize};

/// Lightweight listing record, one per search result.
///
/// Immutable once constructed. `image` is a fully-resolved absolute URL;
/// raw filenames and CDN fallbacks are resolved at normalization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredient_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// One ingredient line of a recipe detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Human-readable original text, e.g. "2 cups basmati rice".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

/// Full record for one recipe, fetched lazily by id.
///
/// Treated as immutable for a given id: cached indefinitely once
/// retrieved. `steps` falls back to a single entry holding the
/// provider's flat instructions text when no structured steps exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
}
