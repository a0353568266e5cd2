//! Persisted recommendation index.
//!
//! Three artifacts written by training and required together at
//! inference time: the fitted vectorizer, the weighted term matrix, and
//! the catalog lookup table aligned with it by row. Presence of only
//! some is equivalent to "not trained".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{LarderError, Result};

use super::tfidf::{SparseVector, TfidfVectorizer};

/// One catalog row, aligned by index with the term matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecipe {
    /// Opaque corpus-supplied identifier.
    pub id: String,
    pub title: String,
    /// Raw ingredients text as it appeared in the corpus.
    pub ingredients: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_tag: Option<String>,
}

/// Locations of the three training artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub matrix: PathBuf,
    pub catalog: PathBuf,
}

impl ArtifactPaths {
    /// Conventional artifact layout inside a directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            vectorizer: dir.join("vectorizer.json"),
            matrix: dir.join("matrix.json"),
            catalog: dir.join("catalog.json"),
        }
    }

    fn all_present(&self) -> bool {
        self.vectorizer.exists() && self.matrix.exists() && self.catalog.exists()
    }
}

#[derive(Serialize, Deserialize)]
struct TermMatrixDoc {
    rows: Vec<SparseVector>,
}

/// The in-memory index: read-only at inference time.
pub struct RecommendationIndex {
    pub model: TfidfVectorizer,
    pub matrix: Vec<SparseVector>,
    pub catalog: Vec<CatalogRecipe>,
}

impl RecommendationIndex {
    /// Load all three artifacts.
    ///
    /// Any missing artifact is [`LarderError::ModelNotTrained`] — the
    /// distinct, recoverable condition callers handle by triggering
    /// training. Unreadable or misaligned artifacts are data errors.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        if !paths.all_present() {
            return Err(LarderError::ModelNotTrained);
        }
        let model: TfidfVectorizer = read_json(&paths.vectorizer)?;
        let matrix: TermMatrixDoc = read_json(&paths.matrix)?;
        let catalog: Vec<CatalogRecipe> = read_json(&paths.catalog)?;
        if matrix.rows.len() != catalog.len() {
            return Err(LarderError::DataError(format!(
                "term matrix has {} rows but catalog has {} entries",
                matrix.rows.len(),
                catalog.len()
            )));
        }
        Ok(Self {
            model,
            matrix: matrix.rows,
            catalog,
        })
    }

    /// Write all three artifacts, replacing any previous training run.
    pub fn store(&self, paths: &ArtifactPaths) -> Result<()> {
        for path in [&paths.vectorizer, &paths.matrix, &paths.catalog] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }
        write_json(&paths.vectorizer, &self.model)?;
        write_json(
            &paths.matrix,
            &TermMatrixDoc {
                rows: self.matrix.clone(),
            },
        )?;
        write_json(&paths.catalog, &self.catalog)?;
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| LarderError::DataError(format!("{}: {e}", path.display())))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec(value)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
