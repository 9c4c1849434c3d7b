//! Layered TOML configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`dreadboard.toml` shipped with the workspace)
//! 2. `~/.config/dreadboard/dreadboard.toml`
//! 3. `./dreadboard.toml`

use crate::RetryPolicy;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, File, FileFormat};
use dreadboard_core::{ArtStyle, resolve_style};
use dreadboard_error::{ConfigError, DreadboardError, DreadboardResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../dreadboard.toml");

/// Gemini endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeminiConfig {
    /// Model used for segmentation
    #[serde(default = "default_model")]
    model: String,
    /// REST base URL, without trailing slash
    #[serde(default = "default_base_url")]
    base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Replace the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Segmentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SegmentationConfig {
    /// Scenes requested per batch
    #[serde(default = "default_batch_size")]
    batch_size: usize,
}

fn default_batch_size() -> usize {
    5
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

/// Top-level Dreadboard configuration.
///
/// # Example
///
/// ```no_run
/// use dreadboard_retry::DreadboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DreadboardConfig::load()?;
/// println!("model: {}", config.gemini().model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct DreadboardConfig {
    /// Gemini endpoint settings
    #[serde(default)]
    gemini: GeminiConfig,
    /// Backoff schedule for transient backend failures
    #[serde(default)]
    retry: RetryPolicy,
    /// Segmentation defaults
    #[serde(default)]
    segmentation: SegmentationConfig,
    /// Art style catalog; the first entry is the fallback style
    #[serde(default)]
    styles: Vec<ArtStyle>,
}

impl DreadboardConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// Missing user files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// result fails [`validate`](Self::validate).
    #[instrument]
    pub fn load() -> DreadboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/dreadboard/dreadboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("dreadboard").required(false));

        Self::finish(builder)
    }

    /// Bundled defaults only, ignoring user files.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> DreadboardResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Load configuration from a specific file path layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DreadboardResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Parse a complete configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(toml: &str) -> DreadboardResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Build, deserialize and validate the merged sources.
    fn finish(builder: ConfigBuilder<DefaultState>) -> DreadboardResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                DreadboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DreadboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch size is zero, the style catalog is
    /// empty, or the retry policy is invalid.
    pub fn validate(&self) -> DreadboardResult<()> {
        if self.segmentation.batch_size == 0 {
            return Err(ConfigError::new("segmentation.batch_size must be at least 1").into());
        }
        if self.styles.is_empty() {
            return Err(ConfigError::new("at least one [[styles]] entry is required").into());
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::new("gemini.timeout_secs must be greater than 0").into());
        }
        self.retry.validate()
    }

    /// Resolve a style id against the catalog, falling back to the first style.
    pub fn style(&self, style_id: &str) -> Option<&ArtStyle> {
        resolve_style(&self.styles, style_id)
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the Gemini settings.
    pub fn with_gemini(mut self, gemini: GeminiConfig) -> Self {
        self.gemini = gemini;
        self
    }
}
