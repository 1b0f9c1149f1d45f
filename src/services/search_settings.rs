// ABOUTME: Search tuning settings service with split read and write permissions
// ABOUTME: Reads need any session and fall back to defaults; writes need admin or editor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Search settings
//!
//! A single settings row tunes ranking for the public search. Any signed-in
//! user may read it; only admins and editors may replace it. Before the
//! first save, reads serve [`SearchSettings::default`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::bounded;
use crate::constants::messages;
use crate::database::CatalogStore;
use crate::errors::AppResult;
use crate::models::{SearchSettings, Session};
use crate::permissions::{require_any_role, require_session, UserRole};

/// Roles allowed to replace the settings
pub const SETTINGS_EDITORS: [UserRole; 2] = [UserRole::Admin, UserRole::Editor];

/// Reads and replaces the search settings row
#[derive(Clone)]
pub struct SearchSettingsService {
    store: Arc<dyn CatalogStore>,
    timeout: Duration,
}

impl SearchSettingsService {
    /// Create a service over `store`
    pub fn new(store: Arc<dyn CatalogStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Current settings, or the defaults when none were saved
    ///
    /// # Errors
    ///
    /// - 401 without a valid session, before any query
    /// - Upstream failure if the query errors or times out
    #[instrument(skip_all, fields(operation = "get_search_settings"))]
    pub async fn get(&self, session: Option<&Session>) -> AppResult<SearchSettings> {
        require_session(session)?;

        let stored = bounded(
            self.timeout,
            "load_search_settings",
            messages::SETTINGS_FETCH_FAILED,
            self.store.load_search_settings(),
        )
        .await?;

        Ok(stored.unwrap_or_else(|| {
            debug!("No stored search settings, serving defaults");
            SearchSettings::default()
        }))
    }

    /// Replace the settings with the decoded `body`
    ///
    /// # Errors
    ///
    /// - 401 / 403 unless the caller is an admin or editor, before decoding
    /// - 400 when the body does not decode or validate
    /// - Upstream failure if the save errors or times out
    #[instrument(skip_all, fields(operation = "update_search_settings"))]
    pub async fn update(
        &self,
        session: Option<&Session>,
        body: &[u8],
    ) -> AppResult<SearchSettings> {
        let editor = require_any_role(session, &SETTINGS_EDITORS)?;
        let settings = SearchSettings::from_body(body)?;

        bounded(
            self.timeout,
            "save_search_settings",
            messages::SETTINGS_SAVE_FAILED,
            self.store.save_search_settings(&settings, &editor.user_id),
        )
        .await?;

        info!(user_id = %editor.user_id, role = %editor.role, "Search settings saved");
        Ok(settings)
    }
}
