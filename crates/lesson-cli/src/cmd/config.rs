use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use lesson_core::config::{Config, WarnLevel};
use lesson_core::paths;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a lessons.yaml with every default spelled out
    Init {
        /// Replace an existing lessons.yaml
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init { force } => init(root, force),
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, force: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to replace it", path.display());
    }
    Config::default()
        .save(root)
        .context("failed to save config")?;
    println!("Wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;

    if json {
        return print_json(&config);
    }

    print_table(
        &["KEY", "VALUE"],
        vec![
            vec!["lessons_root".into(), config.lessons_root(root).display().to_string()],
            vec!["model".into(), config.model.clone()],
            vec!["api_base".into(), config.api_base.clone()],
            vec!["on_collision".into(), config.on_collision.to_string()],
            vec!["fetch.max_chars".into(), config.fetch.max_chars.to_string()],
            vec!["fetch.timeout_secs".into(), config.fetch.timeout_secs.to_string()],
            vec!["standalone.base_image".into(), config.standalone.base_image.clone()],
            vec![
                "standalone.lessons_env_var".into(),
                config.standalone.lessons_env_var.clone(),
            ],
            vec!["release.metadata_url".into(), config.release.metadata_url.clone()],
        ],
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
