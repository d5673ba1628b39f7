use crate::ProviderArgs;
use anyhow::Context;
use lesson_core::acquire::HttpSource;
use lesson_core::pipeline::{LessonPipeline, LessonRequest, PipelineMode};
use std::path::Path;
use std::time::Duration;

pub struct AddArgs<'a> {
    pub tutorial: &'a str,
    pub topic: &'a str,
    pub objectives: &'a str,
    pub level: &'a str,
    pub url: Option<&'a str>,
}

pub fn run(root: &Path, provider: &ProviderArgs, args: AddArgs<'_>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let backend = super::chat_backend(&config, provider)?;
    let source = HttpSource::new(Duration::from_secs(config.fetch.timeout_secs))
        .context("failed to configure HTTP client")?;

    let outcome = LessonPipeline::new(root, &config, &backend, &source)
        .run(&LessonRequest {
            slug: args.tutorial,
            topic: Some(args.topic),
            objectives: Some(args.objectives),
            level: args.level,
            url: args.url,
            mode: PipelineMode::Append,
            standalone: false,
        })
        .with_context(|| format!("failed to add steps to '{}'", args.tutorial))?;

    super::create::report(&outcome, json)
}
