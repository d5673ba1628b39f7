use crate::error::{LessonError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "lessons.yaml";
pub const DEFAULT_LESSONS_DIR: &str = "src/main/resources/lessons";

pub const LESSON_META_FILE: &str = "lesson.yml";
pub const STANDALONE_DOCKERFILE: &str = "Dockerfile";

/// Extension given to every step file this tool writes.
pub const STEP_EXTENSION: &str = "mdx";

/// Suffixes counted as existing steps when continuing the numbering.
pub const STEP_SUFFIXES: &[&str] = &[".md", ".mdx"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn lesson_dir(lessons_root: &Path, slug: &str) -> PathBuf {
    lessons_root.join(slug)
}

pub fn lesson_meta_path(dir: &Path) -> PathBuf {
    dir.join(LESSON_META_FILE)
}

pub fn standalone_dockerfile_path(dir: &Path) -> PathBuf {
    dir.join(STANDALONE_DOCKERFILE)
}

/// `{root}/turtorial-{slug}.Dockerfile`, written by the scaffold flow.
pub fn environment_dockerfile_path(root: &Path, slug: &str) -> PathBuf {
    root.join(format!("turtorial-{slug}.Dockerfile"))
}

pub fn is_step_file(name: &str) -> bool {
    STEP_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(LessonError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
