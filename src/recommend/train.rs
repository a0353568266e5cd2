//! Offline training step.
//!
//! Reads a recipe corpus (a JSON array of records), normalizes each
//! recipe's ingredients into token text, fits the vectorizer, and
//! persists the three artifacts. Invoked explicitly — never implicitly
//! on a recommendation request.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{LarderError, Result};

use super::index::{ArtifactPaths, CatalogRecipe, RecommendationIndex};
use super::tfidf::TfidfVectorizer;

/// Summary of a completed training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainReport {
    pub recipes: usize,
    pub vocabulary: usize,
}

#[derive(Deserialize)]
struct CorpusRecord {
    recipe_id: IdField,
    title: String,
    ingredients: IngredientsField,
    #[serde(default)]
    diet_tag: Option<String>,
}

/// Corpus ids may be numeric or string; both become opaque strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdField {
    Number(i64),
    Text(String),
}

impl IdField {
    fn into_string(self) -> String {
        match self {
            IdField::Number(n) => n.to_string(),
            IdField::Text(s) => s,
        }
    }
}

/// Ingredients arrive as a literal list or a comma/semicolon-delimited
/// string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientsField {
    List(Vec<String>),
    Text(String),
}

impl IngredientsField {
    fn names(&self) -> Vec<String> {
        match self {
            IngredientsField::List(names) => names.clone(),
            IngredientsField::Text(text) => text
                .replace(';', ",")
                .split(',')
                .map(str::to_string)
                .collect(),
        }
    }

    fn raw_text(&self) -> String {
        match self {
            IngredientsField::List(names) => names.join(", "),
            IngredientsField::Text(text) => text.clone(),
        }
    }
}

/// Normalize ingredient names into the token text the vectorizer
/// consumes: lower-cased, with multi-word names collapsed to single
/// underscore-joined tokens so the vectorizer cannot split them.
pub fn normalize_tokens(names: &[String]) -> String {
    names
        .iter()
        .map(|name| {
            name.trim()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
        })
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Train the recommendation index from a corpus file and persist the
/// artifacts, overwriting any previous run.
pub fn train(corpus_path: &Path, artifacts_dir: &Path) -> Result<TrainReport> {
    let bytes = std::fs::read(corpus_path)?;
    let records: Vec<CorpusRecord> = serde_json::from_slice(&bytes)
        .map_err(|e| LarderError::InvalidInput(format!("{}: {e}", corpus_path.display())))?;
    if records.is_empty() {
        return Err(LarderError::InvalidInput(format!(
            "{}: corpus is empty",
            corpus_path.display()
        )));
    }

    let mut docs = Vec::with_capacity(records.len());
    let mut catalog = Vec::with_capacity(records.len());
    for record in records {
        docs.push(normalize_tokens(&record.ingredients.names()));
        catalog.push(CatalogRecipe {
            id: record.recipe_id.into_string(),
            title: record.title,
            ingredients: record.ingredients.raw_text(),
            diet_tag: record
                .diet_tag
                .filter(|tag| !tag.trim().is_empty()),
        });
    }

    let (model, matrix) = TfidfVectorizer::fit(&docs)?;
    let report = TrainReport {
        recipes: catalog.len(),
        vocabulary: model.vocabulary_len(),
    };
    let index = RecommendationIndex {
        model,
        matrix,
        catalog,
    };
    index.store(&ArtifactPaths::in_dir(artifacts_dir))?;
    info!(
        recipes = report.recipes,
        vocabulary = report.vocabulary,
        "trained recommendation index"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiword_names_collapse_to_single_tokens() {
        let names = vec!["Olive  Oil".to_string(), "sea salt".to_string()];
        assert_eq!(normalize_tokens(&names), "olive_oil sea_salt");
    }

    #[test]
    fn blank_names_are_dropped() {
        let names = vec!["egg".to_string(), "   ".to_string(), String::new()];
        assert_eq!(normalize_tokens(&names), "egg");
    }

    #[test]
    fn delimited_strings_split_on_comma_and_semicolon() {
        let field = IngredientsField::Text("pasta; butter, garlic".into());
        assert_eq!(
            normalize_tokens(&field.names()),
            "pasta butter garlic"
        );
    }
}
