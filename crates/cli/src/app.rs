// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring: registry loading and the production workspace.

use std::path::Path;

use anyhow::{Context, Result};
use mage_adapters::{http_client, ConsoleNotifyAdapter, GeminiAdapter, GrokAdapter, ProviderRouter};
use mage_core::{CredentialsPatch, Registry, SystemClock};
use mage_engine::Workspace;
use mage_storage::AppState;

use crate::env;

pub type AppWorkspace = Workspace<ProviderRouter, ConsoleNotifyAdapter, SystemClock>;

/// The registry at `path`, or the built-in one.
pub fn load_registry(path: Option<&Path>) -> Result<Registry> {
    let Some(path) = path else {
        return Registry::builtin().context("built-in registry is invalid");
    };
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read registry {}", path.display()))?;
    Registry::from_toml(&src).with_context(|| format!("invalid registry {}", path.display()))
}

/// Build the workspace with real backends. Environment credentials are
/// applied first, then `keys` on top.
pub fn workspace(registry: Registry, keys: CredentialsPatch) -> Result<AppWorkspace> {
    let client = http_client(env::http_timeout()).context("failed to build HTTP client")?;

    let mut gemini = GeminiAdapter::new(client.clone());
    if let Some(model) = env::gemini_model() {
        gemini = gemini.with_model(model);
    }
    if let Some(url) = env::gemini_base_url() {
        gemini = gemini.with_base_url(url);
    }

    let mut grok = GrokAdapter::new(client);
    if let Some(model) = env::grok_model() {
        grok = grok.with_model(model);
    }
    if let Some(url) = env::grok_base_url() {
        grok = grok.with_base_url(url);
    }

    let workspace = Workspace::new(
        AppState::new(registry),
        ProviderRouter::new(gemini, grok),
        ConsoleNotifyAdapter::new(),
        SystemClock,
    );
    workspace.save_credentials(env::credentials());
    workspace.save_credentials(keys);
    Ok(workspace)
}
