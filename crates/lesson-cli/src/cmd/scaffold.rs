use crate::output::print_json;
use crate::ProviderArgs;
use anyhow::Context;
use std::path::Path;

pub fn run(
    root: &Path,
    provider: &ProviderArgs,
    name: &str,
    description: &str,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let backend = super::chat_backend(&config, provider)?;

    let outcome = lesson_core::scaffold::scaffold(root, &config, &backend, name, description)
        .with_context(|| format!("failed to scaffold tutorial '{name}'"))?;

    if json {
        print_json(&outcome)?;
    } else {
        println!(
            "Scaffolded '{}' at {}",
            outcome.title,
            outcome.lesson_dir.display()
        );
        println!("Wrote {}", outcome.dockerfile.display());
    }
    Ok(())
}
