//! Builder for configuring [`Larder`] instances.

use std::path::PathBuf;
use std::time::Duration;

use crate::provider::{ProviderConfig, RecipeProvider};
use crate::recommend::Recommender;
use crate::Result;

use super::Larder;

/// Builder for configuring [`Larder`] instances.
///
/// ```rust,no_run
/// use larder::Larder;
///
/// # fn main() -> larder::Result<()> {
/// let larder = Larder::builder()
///     .api_keys(["key-a", "key-b"])
///     .data_dir("/var/lib/pantry")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct LarderBuilder {
    config: ProviderConfig,
    artifacts_dir: Option<PathBuf>,
}

impl LarderBuilder {
    pub fn new() -> Self {
        Self {
            config: ProviderConfig::default(),
            artifacts_dir: None,
        }
    }

    /// Set the provider credential pool.
    pub fn api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.api_keys(keys);
        self
    }

    /// Override the provider API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    /// Override the image CDN base URL.
    pub fn cdn_base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.cdn_base_url(url);
        self
    }

    /// Set the data directory (caches + offline dataset).
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.data_dir(dir);
        self
    }

    /// Set the training-artifact directory. Defaults to
    /// `<data_dir>/artifacts`.
    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    /// Set the list-result cache TTL.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config = self.config.ttl(ttl);
        self
    }

    /// Set the network timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Enable or disable offline mode (no network I/O at all).
    pub fn offline(mut self, offline: bool) -> Self {
        self.config = self.config.offline(offline);
        self
    }

    /// Build the configured [`Larder`].
    pub fn build(self) -> Result<Larder> {
        let artifacts_dir = self
            .artifacts_dir
            .unwrap_or_else(|| self.config.data_dir.join("artifacts"));
        let provider = RecipeProvider::new(self.config)?;
        Ok(Larder::new(provider, Recommender::new(artifacts_dir)))
    }
}

impl Default for LarderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
