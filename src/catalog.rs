//! Offline recipe catalog — the last-resort fallback tier.
//!
//! Serves a static dataset file when one is configured, and a small
//! built-in sample otherwise. `defaults()` never fails and is never
//! empty; `details_for()` answers from per-id dataset files only.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::types::{RecipeDetail, RecipeSummary};

/// Static fallback catalog backed by optional dataset files.
pub struct OfflineCatalog {
    dataset_file: PathBuf,
    details_dir: PathBuf,
}

impl OfflineCatalog {
    /// Create a catalog over a dataset file and a per-id details directory.
    ///
    /// Neither path has to exist; absence falls back to the built-in
    /// sample (for listings) or "absent" (for details).
    pub fn new(dataset_file: PathBuf, details_dir: PathBuf) -> Self {
        Self {
            dataset_file,
            details_dir,
        }
    }

    /// The fallback listing: the dataset file if present and non-empty,
    /// the built-in sample otherwise. Always at least 3 entries.
    pub async fn defaults(&self) -> Vec<RecipeSummary> {
        match tokio::fs::read(&self.dataset_file).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<RecipeSummary>>(&bytes) {
                Ok(list) if !list.is_empty() => return list,
                Ok(_) => debug!("offline dataset is empty, using built-in sample"),
                Err(e) => {
                    warn!(path = %self.dataset_file.display(), error = %e,
                        "offline dataset malformed, using built-in sample");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.dataset_file.display(), error = %e,
                    "offline dataset unreadable, using built-in sample");
            }
        }
        builtin_sample()
    }

    /// A detail record from the dataset, if one exists for this id.
    pub async fn details_for(&self, id: u64) -> Option<RecipeDetail> {
        let path = self.details_dir.join(format!("{id}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "offline detail unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "offline detail malformed");
                None
            }
        }
    }
}

/// The built-in sample served when no dataset file is available.
///
/// Ids live in a reserved high range so they cannot collide with
/// provider-assigned ids.
fn builtin_sample() -> Vec<RecipeSummary> {
    vec![
        RecipeSummary {
            id: 910001,
            title: "Masala Khichdi".into(),
            image: None,
            used_ingredient_count: 4,
            missed_ingredient_count: 0,
            ready_in_minutes: Some(28),
            servings: Some(2),
            source_url: None,
        },
        RecipeSummary {
            id: 910002,
            title: "Paneer Bhurji Wrap".into(),
            image: None,
            used_ingredient_count: 5,
            missed_ingredient_count: 0,
            ready_in_minutes: Some(20),
            servings: Some(2),
            source_url: None,
        },
        RecipeSummary {
            id: 910003,
            title: "Garlic Butter Pasta".into(),
            image: None,
            used_ingredient_count: 3,
            missed_ingredient_count: 1,
            ready_in_minutes: Some(18),
            servings: Some(2),
            source_url: None,
        },
    ]
}
