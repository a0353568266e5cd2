//! Larder - recipe discovery engine for pantry assistants
//!
//! This crate owns the recipe-discovery core of a pantry assistant: an
//! external recipe-provider client with credential rotation and tiered
//! fallback (live API → persistent cache → offline catalog), and a
//! content-based recommender that ranks a trained recipe catalog against
//! on-hand ingredients.
//!
//! # Search Example
//!
//! ```rust,no_run
//! use larder::Larder;
//!
//! #[tokio::main]
//! async fn main() -> larder::Result<()> {
//!     let larder = Larder::builder()
//!         .api_keys(["your-api-key"])
//!         .build()?;
//!
//!     let result = larder
//!         .search(&["egg".into(), "tomato".into()], Some("vegetarian"), 10)
//!         .await;
//!
//!     for recipe in &result.recipes {
//!         println!("{} ({:?})", recipe.title, result.source);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Recommendation Example
//!
//! ```rust,no_run
//! use larder::Larder;
//!
//! # fn main() -> larder::Result<()> {
//! let larder = Larder::builder().build()?;
//! larder.train("recipes.json".as_ref())?;
//!
//! let ranked = larder.recommend(&["rice".into(), "lentils".into()], 5, None)?;
//! for r in &ranked {
//!     println!("{:.3}  {}", r.score, r.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Searches never hard-fail: some tier always produces a recipe list,
//! possibly stale or offline data, and the result is tagged with the
//! tier that served it. The recommender's one surfaced error is
//! [`LarderError::ModelNotTrained`], which callers resolve by running
//! [`Larder::train`].

pub mod cache;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod recommend;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use error::{LarderError, Result};
pub use gateway::{Larder, LarderBuilder};
pub use provider::{
    KeyPool, ProviderConfig, RecipeApi, RecipeProvider, ResultSource, SearchResult,
};
pub use recommend::{Recommendation, Recommender, TrainReport};
pub use types::{Ingredient, RecipeDetail, RecipeSummary, SearchQuery};
