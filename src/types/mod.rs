//! Core domain types

pub mod query;
pub mod recipe;

pub use query::{SearchQuery, normalize_diet};
pub use recipe::{Ingredient, RecipeDetail, RecipeSummary};
