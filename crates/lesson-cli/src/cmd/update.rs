use crate::output::print_json;
use crate::ProviderArgs;
use anyhow::Context;
use std::path::Path;

pub fn run(
    root: &Path,
    provider: &ProviderArgs,
    file: &Path,
    instruction: &str,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let backend = super::chat_backend(&config, provider)?;

    let outcome = lesson_core::update::update_file(&backend, file, instruction)
        .with_context(|| format!("failed to update {}", file.display()))?;

    if json {
        print_json(&outcome)?;
    } else {
        println!("Updated {}", outcome.path.display());
    }
    Ok(())
}
