use crate::config::Config;
use crate::error::Result;
use crate::generator::{CompletionBackend, LessonPlanGenerator};
use crate::lesson::LessonDirectory;
use crate::paths;
use crate::prompt;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldOutcome {
    pub slug: String,
    pub title: String,
    pub lesson_dir: PathBuf,
    pub dockerfile: PathBuf,
}

/// Create an empty tutorial plus a generated environment Dockerfile.
///
/// The Dockerfile is generated before anything is written, so a failed
/// completion leaves no directory behind.
pub fn scaffold(
    root: &Path,
    config: &Config,
    backend: &dyn CompletionBackend,
    slug: &str,
    description: &str,
) -> Result<ScaffoldOutcome> {
    paths::validate_slug(slug)?;

    tracing::info!(slug, "generating environment Dockerfile");
    let prompt = prompt::environment_prompt(
        slug,
        description,
        &config.standalone.base_image,
        &config.standalone.lessons_env_var,
    );
    let dockerfile = LessonPlanGenerator::new(backend).generate_text(prompt::DEVOPS_SYSTEM, &prompt)?;

    let dir = LessonDirectory::ensure_exists(&config.lessons_root(root), slug)?;
    let title = title_from_slug(slug);
    dir.write_metadata(&title, description)?;

    let dockerfile_path = paths::environment_dockerfile_path(root, slug);
    crate::io::atomic_write(&dockerfile_path, dockerfile.as_bytes())?;
    tracing::info!(path = %dockerfile_path.display(), "wrote environment Dockerfile");

    Ok(ScaffoldOutcome {
        slug: slug.to_string(),
        title,
        lesson_dir: dir.path().to_path_buf(),
        dockerfile: dockerfile_path,
    })
}

/// `spring-boot-intro` → `Spring Boot Intro`.
///
/// Dashes become spaces; a letter is capitalized when it follows a
/// non-letter, every other letter is lowercased.
pub fn title_from_slug(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut prev_alpha = false;
    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
