use crate::error::Result;
use crate::paths;
use crate::writer::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// FetchConfig
// ---------------------------------------------------------------------------

/// Limits for grounding content pulled from `--url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_chars() -> usize {
    10_000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// StandaloneConfig
// ---------------------------------------------------------------------------

/// Image and environment variable used in generated Dockerfiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandaloneConfig {
    #[serde(default = "default_base_image")]
    pub base_image: String,
    #[serde(default = "default_lessons_env_var")]
    pub lessons_env_var: String,
}

fn default_base_image() -> String {
    "turtorial:latest".to_string()
}

fn default_lessons_env_var() -> String {
    "TURTORIAL_LESSONS_DIRECTORY".to_string()
}

impl Default for StandaloneConfig {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            lessons_env_var: default_lessons_env_var(),
        }
    }
}

// ---------------------------------------------------------------------------
// ReleaseConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseConfig {
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_metadata_url() -> String {
    "https://maven.pkg.github.com/mtthwcmpbll/turtorial/com/snowfort/turtorial/maven-metadata.xml"
        .to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            metadata_url: default_metadata_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project settings read from `lessons.yaml`. Every field has a default, so
/// the file is optional and may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lessons root, relative to the project root unless absolute.
    #[serde(default = "default_lessons_dir")]
    pub lessons_dir: PathBuf,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub on_collision: CollisionPolicy,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub standalone: StandaloneConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_lessons_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_LESSONS_DIR)
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_base() -> String {
    chat_client::DEFAULT_API_BASE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lessons_dir: default_lessons_dir(),
            model: default_model(),
            api_base: default_api_base(),
            on_collision: CollisionPolicy::default(),
            fetch: FetchConfig::default(),
            standalone: StandaloneConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

impl Config {
    /// Load `lessons.yaml` from `root`, or defaults when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn lessons_root(&self, root: &Path) -> PathBuf {
        if self.lessons_dir.is_absolute() {
            self.lessons_dir.clone()
        } else {
            root.join(&self.lessons_dir)
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.model.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "model is empty".to_string(),
            });
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("api_base '{}' is not an http(s) URL", self.api_base),
            });
        }

        if self.fetch.max_chars == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "fetch.max_chars is 0; --url content will always be empty".to_string(),
            });
        }

        if self.fetch.timeout_secs == 0 || self.release.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "a timeout of 0 seconds fails every request".to_string(),
            });
        }

        if self.standalone.base_image.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "standalone.base_image is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
