use crate::error::{LessonError, Result};
use crate::generator::{CompletionBackend, LessonPlanGenerator};
use crate::prompt;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    pub path: PathBuf,
    pub bytes_before: usize,
    pub bytes_after: usize,
}

/// Rewrite one file in place according to `instruction`.
///
/// The file is replaced atomically; on any failure it keeps its old content.
pub fn update_file(
    backend: &dyn CompletionBackend,
    path: &Path,
    instruction: &str,
) -> Result<UpdateOutcome> {
    if !path.is_file() {
        return Err(LessonError::FileNotFound(path.to_path_buf()));
    }
    let before = std::fs::read_to_string(path)?;

    tracing::info!(path = %path.display(), "requesting file update");
    let updated = LessonPlanGenerator::new(backend).generate_text(
        prompt::EDITOR_SYSTEM,
        &prompt::update_prompt(&before, instruction),
    )?;
    crate::io::atomic_write(path, updated.as_bytes())?;

    Ok(UpdateOutcome {
        path: path.to_path_buf(),
        bytes_before: before.len(),
        bytes_after: updated.len(),
    })
}
