// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global settings: target domain, niche, and provider credentials.
//!
//! Credentials live in memory only. Their `Debug` output is redacted so
//! state snapshots and events can be logged freely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// External service a credential belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    #[default]
    Gemini,
    Grok,
    #[serde(alias = "dataforseo")]
    DataForSeo,
}

crate::simple_display! {
    Provider {
        Gemini => "gemini",
        Grok => "grok",
        DataForSeo => "dataForSeo",
    }
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Gemini, Provider::Grok, Provider::DataForSeo];

    /// Human-facing label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Grok => "Grok",
            Provider::DataForSeo => "DataForSEO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider '{0}' (expected gemini, grok, or dataForSeo)")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(|c: char| c == '_' || c == '-', "").as_str() {
            "gemini" => Ok(Provider::Gemini),
            "grok" => Ok(Provider::Grok),
            "dataforseo" => Ok(Provider::DataForSeo),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// Provider secrets. Empty strings count as "not configured".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    keys: BTreeMap<Provider, String>,
}

impl Credentials {
    /// The configured secret for `provider`, if any.
    pub fn get(&self, provider: Provider) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str).filter(|k| !k.is_empty())
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }

    pub fn set(&mut self, provider: Provider, key: impl Into<String>) {
        self.keys.insert(provider, key.into());
    }

    /// Overwrite only the providers present in `patch`.
    pub fn merge(&mut self, patch: &CredentialsPatch) {
        for (provider, key) in &patch.keys {
            self.keys.insert(*provider, key.clone());
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let configured: Vec<_> =
            Provider::ALL.iter().filter(|p| self.is_configured(**p)).collect();
        f.debug_struct("Credentials").field("configured", &configured).finish()
    }
}

/// Partial credential update: only the listed providers change.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialsPatch {
    keys: BTreeMap<Provider, String>,
}

impl CredentialsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: Provider, key: impl Into<String>) -> Self {
        self.keys.insert(provider, key.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.keys.keys().copied()
    }
}

impl fmt::Debug for CredentialsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsPatch")
            .field("providers", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Workspace-wide settings shared by every agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    pub domain: String,
    pub niche: String,
    #[serde(skip)]
    pub credentials: Credentials,
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
