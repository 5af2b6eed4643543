// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global settings event handlers.

use mage_core::Event;

use super::AppState;

pub(crate) fn apply(state: &mut AppState, event: &Event) {
    match event {
        Event::SettingsChanged { domain, niche } => {
            if let Some(domain) = domain {
                state.settings.domain = domain.clone();
            }
            if let Some(niche) = niche {
                state.settings.niche = niche.clone();
            }
        }

        Event::CredentialsSaved { credentials } => {
            state.settings.credentials.merge(credentials);
        }

        _ => {}
    }
}
