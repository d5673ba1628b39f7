use crate::error::{LessonError, Result};
use crate::lesson::LessonDirectory;
use crate::paths::STEP_EXTENSION;
use crate::plan::LessonPlan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CollisionPolicy
// ---------------------------------------------------------------------------

/// What to do when a computed step file name is already taken on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Write `NN-title-2.mdx`, `NN-title-3.mdx`, ... instead.
    Suffix,
    /// Stop before writing the colliding step.
    Error,
}

impl CollisionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CollisionPolicy::Overwrite => "overwrite",
            CollisionPolicy::Suffix => "suffix",
            CollisionPolicy::Error => "error",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "suffix" => Ok(CollisionPolicy::Suffix),
            "error" => Ok(CollisionPolicy::Error),
            other => Err(format!(
                "unknown collision policy '{other}' (expected overwrite, suffix or error)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Naming and rendering
// ---------------------------------------------------------------------------

/// Lowercase the title and turn spaces into dashes. Nothing else changes.
pub fn step_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// `{order:02}-{slug}.mdx`
pub fn step_file_name(order: u32, title: &str) -> String {
    format!("{order:02}-{}.{STEP_EXTENSION}", step_slug(title))
}

#[derive(Debug, Serialize)]
struct StepFrontmatter<'a> {
    title: &'a str,
    section: &'a str,
    order: u32,
}

/// Frontmatter block, a blank line, then the body verbatim.
pub fn render_step(title: &str, section: &str, order: u32, content: &str) -> Result<String> {
    let header = serde_yaml::to_string(&StepFrontmatter {
        title,
        section,
        order,
    })?;
    Ok(format!("---\n{header}---\n\n{content}"))
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct WrittenStep {
    pub order: u32,
    pub file_name: String,
    pub title: String,
    /// The model's own `order` for this step, kept for reference only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_order: Option<i64>,
    /// `true` when an existing file was replaced.
    pub overwrote: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WriteReport {
    pub start_order: u32,
    pub steps: Vec<WrittenStep>,
}

impl WriteReport {
    pub fn count(&self) -> usize {
        self.steps.len()
    }
}

// ---------------------------------------------------------------------------
// ArtifactWriter
// ---------------------------------------------------------------------------

/// Materializes a [`LessonPlan`] as numbered step files.
///
/// Numbering continues from the step files already in the directory; the
/// plan's own `order` values are ignored. Files are written one by one with
/// no rollback, so a failing step leaves the earlier ones in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter {
    policy: CollisionPolicy,
}

impl ArtifactWriter {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    pub fn write(&self, dir: &LessonDirectory, plan: &LessonPlan) -> Result<WriteReport> {
        let start_order = dir.next_order()?;
        let mut report = WriteReport {
            start_order,
            steps: Vec::with_capacity(plan.steps.len()),
        };

        for (index, (step, order)) in plan.steps.iter().zip(start_order..).enumerate() {
            let position = index + 1;
            let title = step.title.as_deref().ok_or(LessonError::MissingStepField {
                index: position,
                field: "title",
            })?;
            let content = step.content.as_deref().ok_or(LessonError::MissingStepField {
                index: position,
                field: "content",
            })?;
            if title.trim().is_empty() || title.contains(['/', '\\']) {
                return Err(LessonError::InvalidStepTitle(title.to_string()));
            }

            let (file_name, path, overwrote) = self.resolve_target(dir, order, title)?;
            let body = render_step(title, step.section_or_default(), order, content)?;
            crate::io::atomic_write(&path, body.as_bytes())?;

            tracing::info!(file = %file_name, order, "wrote step");
            report.steps.push(WrittenStep {
                order,
                file_name,
                title: title.to_string(),
                suggested_order: step.advisory_order(),
                overwrote,
            });
        }

        Ok(report)
    }

    fn resolve_target(
        &self,
        dir: &LessonDirectory,
        order: u32,
        title: &str,
    ) -> Result<(String, PathBuf, bool)> {
        let file_name = step_file_name(order, title);
        let path = dir.path().join(&file_name);
        if !path.exists() {
            return Ok((file_name, path, false));
        }

        match self.policy {
            CollisionPolicy::Overwrite => {
                tracing::warn!(file = %file_name, "overwriting existing step file");
                Ok((file_name, path, true))
            }
            CollisionPolicy::Error => Err(LessonError::StepFileExists(path)),
            CollisionPolicy::Suffix => {
                let stem = format!("{order:02}-{}", step_slug(title));
                let mut n = 2u32;
                loop {
                    let candidate = format!("{stem}-{n}.{STEP_EXTENSION}");
                    let candidate_path = dir.path().join(&candidate);
                    if !candidate_path.exists() {
                        return Ok((candidate, candidate_path, false));
                    }
                    n += 1;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
