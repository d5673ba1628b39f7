use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("lesson directory not found: {0} (run 'lessons scaffold' or 'lessons create' first)")]
    LessonNotFound(PathBuf),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("step {index} is missing required field '{field}'")]
    MissingStepField { index: usize, field: &'static str },

    #[error("step title '{0}' cannot be used as a file name")]
    InvalidStepTitle(String),

    #[error("step file already exists: {0}")]
    StepFileExists(PathBuf),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("package index rejected credentials (HTTP {0})")]
    IndexAuth(u16),

    #[error("package index request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why a completion could not be turned into usable output.
///
/// Kept apart from [`LessonError`] so callers can tell "the model let us
/// down" from "the filesystem let us down".
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Provider(#[from] chat_client::ChatError),

    #[error("completion was empty")]
    EmptyCompletion,

    #[error("could not decode lesson plan: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Why grounding content could not be obtained. Always recovered from.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no readable text at {0}")]
    NoText(String),
}

pub type Result<T> = std::result::Result<T, LessonError>;
