use crate::acquire::{ContentAcquirer, ContentSource};
use crate::config::Config;
use crate::error::{LessonError, Result};
use crate::generator::{CompletionBackend, LessonPlanGenerator};
use crate::lesson::LessonDirectory;
use crate::paths;
use crate::prompt;
use crate::writer::{ArtifactWriter, WriteReport};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Topic used when only `--url` was given.
pub const URL_ONLY_TOPIC: &str = "Tutorial based on provided URL";

pub const DEFAULT_LEVEL: &str = "Beginner";

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Create the directory if needed and (re)write `lesson.yml`.
    Fresh,
    /// Add steps to a tutorial that must already exist; `lesson.yml` is left alone.
    Append,
}

#[derive(Debug, Clone)]
pub struct LessonRequest<'a> {
    pub slug: &'a str,
    pub topic: Option<&'a str>,
    pub objectives: Option<&'a str>,
    pub level: &'a str,
    pub url: Option<&'a str>,
    pub mode: PipelineMode,
    /// Also write `{lesson_dir}/Dockerfile` pointing the base image at this lesson.
    pub standalone: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub slug: String,
    pub mode: PipelineMode,
    pub lesson_dir: PathBuf,
    pub title: String,
    pub grounded: bool,
    pub report: WriteReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// LessonPipeline
// ---------------------------------------------------------------------------

/// acquire → prompt → generate → write, shared by every entry point.
///
/// Nothing touches the lesson directory until a plan has been decoded, so a
/// generation failure leaves the filesystem as it was.
pub struct LessonPipeline<'a> {
    lessons_root: PathBuf,
    config: &'a Config,
    backend: &'a dyn CompletionBackend,
    source: &'a dyn ContentSource,
}

impl<'a> LessonPipeline<'a> {
    pub fn new(
        root: &Path,
        config: &'a Config,
        backend: &'a dyn CompletionBackend,
        source: &'a dyn ContentSource,
    ) -> Self {
        Self {
            lessons_root: config.lessons_root(root),
            config,
            backend,
            source,
        }
    }

    pub fn run(&self, request: &LessonRequest<'_>) -> Result<PipelineOutcome> {
        // Resolve the target first so a bad slug or missing lesson fails fast.
        let existing = match request.mode {
            PipelineMode::Append => Some(LessonDirectory::require_exists(
                &self.lessons_root,
                request.slug,
            )?),
            PipelineMode::Fresh => {
                paths::validate_slug(request.slug)?;
                None
            }
        };

        let acquirer = ContentAcquirer::new(self.source, self.config.fetch.max_chars);
        let excerpt = acquirer.grounding(request.url);
        let grounding = excerpt
            .as_deref()
            .map(prompt::grounding_block)
            .unwrap_or_default();

        let topic = match (request.topic, excerpt.is_some()) {
            (Some(topic), _) => topic,
            (None, true) => URL_ONLY_TOPIC,
            (None, false) => {
                return Err(LessonError::MissingInput(
                    "either a topic or a URL with readable content must be provided".into(),
                ))
            }
        };

        tracing::info!(slug = request.slug, topic, mode = ?request.mode, "generating lesson plan");
        let prompt = prompt::lesson_plan_prompt(
            topic,
            request.objectives.unwrap_or_default(),
            request.level,
            &grounding,
        );
        let plan = LessonPlanGenerator::new(self.backend).generate(&prompt)?;
        let title = plan.title_or(topic).to_string();

        let dir = match existing {
            Some(dir) => dir,
            None => {
                let dir = LessonDirectory::ensure_exists(&self.lessons_root, request.slug)?;
                dir.write_metadata(&title, plan.description_or_empty())?;
                dir
            }
        };

        let report = ArtifactWriter::new(self.config.on_collision).write(&dir, &plan)?;

        let dockerfile = if request.standalone {
            let path = paths::standalone_dockerfile_path(dir.path());
            let body = standalone_dockerfile(
                &self.config.standalone.base_image,
                &self.config.standalone.lessons_env_var,
                request.slug,
            );
            crate::io::atomic_write(&path, body.as_bytes())?;
            Some(path)
        } else {
            None
        };

        Ok(PipelineOutcome {
            slug: request.slug.to_string(),
            mode: request.mode,
            lesson_dir: dir.path().to_path_buf(),
            title,
            grounded: excerpt.is_some(),
            report,
            dockerfile,
        })
    }
}

/// Dockerfile that serves a single lesson from the base image.
pub fn standalone_dockerfile(base_image: &str, lessons_env_var: &str, slug: &str) -> String {
    format!("FROM {base_image}\n\nENV {lessons_env_var}=classpath:/lessons/{slug}\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
