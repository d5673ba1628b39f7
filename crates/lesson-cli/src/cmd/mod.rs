pub mod add;
pub mod config;
pub mod create;
pub mod next_version;
pub mod scaffold;
pub mod update;

use crate::ProviderArgs;
use anyhow::Context;
use chat_client::ChatClient;
use lesson_core::config::Config;
use lesson_core::generator::ChatBackend;
use std::path::Path;

pub(crate) fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).context("failed to load lessons.yaml")
}

/// Build the completion backend, letting command-line flags win over config.
pub(crate) fn chat_backend(config: &Config, provider: &ProviderArgs) -> anyhow::Result<ChatBackend> {
    let api_key = provider
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .context("no API key: pass --api-key or set OPENAI_API_KEY")?;
    let api_base = provider.api_base.as_deref().unwrap_or(&config.api_base);
    let model = provider.model.as_deref().unwrap_or(&config.model);

    let client = ChatClient::builder(api_key)
        .api_base(api_base)
        .build()
        .context("failed to configure completion client")?;
    tracing::debug!(model, api_base, "completion backend ready");
    Ok(ChatBackend::new(client, model))
}
