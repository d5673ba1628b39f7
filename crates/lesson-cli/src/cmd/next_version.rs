use crate::output::print_json;
use anyhow::Context;
use lesson_core::release::{Bump, IndexCredentials, ReleaseIndex};
use std::path::Path;
use std::time::Duration;

pub fn run(
    root: &Path,
    bump: &str,
    actor: Option<String>,
    token: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let bump = Bump::from_name(bump);
    let credentials = IndexCredentials::from_parts(actor, token);

    let index = ReleaseIndex::new(
        config.release.metadata_url.clone(),
        Duration::from_secs(config.release.timeout_secs),
    )
    .context("failed to configure HTTP client")?;
    let current = index
        .current_version(credentials.as_ref())
        .context("failed to read published versions")?;
    let next = lesson_core::release::next_from(&current, bump);

    if json {
        print_json(&serde_json::json!({
            "current": current,
            "bump": bump,
            "next": next.to_string(),
        }))?;
    } else {
        println!("{next}");
    }
    Ok(())
}
