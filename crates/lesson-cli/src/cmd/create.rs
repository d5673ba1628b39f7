use crate::output::print_json;
use crate::ProviderArgs;
use anyhow::Context;
use lesson_core::acquire::HttpSource;
use lesson_core::pipeline::{LessonPipeline, LessonRequest, PipelineMode, PipelineOutcome};
use std::path::Path;
use std::time::Duration;

pub struct CreateArgs<'a> {
    pub name: &'a str,
    pub topic: Option<&'a str>,
    pub url: Option<&'a str>,
    pub objectives: Option<&'a str>,
    pub level: &'a str,
    pub standalone: bool,
}

pub fn run(root: &Path, provider: &ProviderArgs, args: CreateArgs<'_>, json: bool) -> anyhow::Result<()> {
    if args.topic.is_none() && args.url.is_none() {
        anyhow::bail!("either --topic or --url must be provided");
    }

    let config = super::load_config(root)?;
    let backend = super::chat_backend(&config, provider)?;
    let source = HttpSource::new(Duration::from_secs(config.fetch.timeout_secs))
        .context("failed to configure HTTP client")?;

    let outcome = LessonPipeline::new(root, &config, &backend, &source)
        .run(&LessonRequest {
            slug: args.name,
            topic: args.topic,
            objectives: args.objectives,
            level: args.level,
            url: args.url,
            mode: PipelineMode::Fresh,
            standalone: args.standalone,
        })
        .with_context(|| format!("failed to create tutorial '{}'", args.name))?;

    report(&outcome, json)
}

/// Shared by `create` and `add`.
pub(crate) fn report(outcome: &PipelineOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(outcome);
    }

    match outcome.mode {
        PipelineMode::Fresh => println!(
            "Created tutorial '{}' ({}) at {}",
            outcome.slug,
            outcome.title,
            outcome.lesson_dir.display()
        ),
        PipelineMode::Append => println!(
            "Added {} steps to tutorial '{}'",
            outcome.report.count(),
            outcome.slug
        ),
    }
    for step in &outcome.report.steps {
        let note = if step.overwrote { "  (overwrote)" } else { "" };
        println!("  {}{note}", step.file_name);
    }
    if let Some(dockerfile) = &outcome.dockerfile {
        println!("Wrote {}", dockerfile.display());
    }
    Ok(())
}
