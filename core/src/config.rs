// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use davcheck_webdav::DavConfig;

/// The name of the application.
pub const APP_NAME: &str = "davcheck";

/// Configuration of a check run.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// The server under test.
    pub server: DavConfig,

    /// Key of the admin user in `users`, what `%admin%` resolves to.
    #[serde(default)]
    pub admin: Option<String>,

    /// Password of users configured without one.
    #[serde(default)]
    pub default_password: Option<String>,

    /// Known users by login name.
    #[serde(default)]
    pub users: BTreeMap<String, UserConfig>,

    /// Sharing settings.
    #[serde(default)]
    pub sharing: SharingConfig,
}

/// A user known to the server.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UserConfig {
    /// Password, falls back to the default password.
    #[serde(default)]
    pub password: Option<String>,

    /// Display name, falls back to the login name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Personal space id, needed by the spaces endpoint.
    #[serde(default)]
    pub space_id: Option<String>,
}

/// Sharing settings.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct SharingConfig {
    /// Public link tokens come from the sharing NG API.
    #[serde(default)]
    pub ng: bool,
}

impl Config {
    /// A configuration for `base_url` with no users.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            server: DavConfig {
                base_url: base_url.into(),
                ..Default::default()
            },
            admin: None,
            default_password: None,
            users: BTreeMap::new(),
            sharing: SharingConfig::default(),
        }
    }

    /// Adds a user with a password.
    #[must_use]
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.users.insert(
            username.to_string(),
            UserConfig {
                password: Some(password.to_string()),
                ..Default::default()
            },
        );
        self
    }

    /// Normalizes the configuration.
    pub fn normalize(&mut self) {
        let trimmed = self.server.base_url.trim_end_matches('/').len();
        self.server.base_url.truncate(trimmed);

        if let Some(admin) = &self.admin
            && !self.users.contains_key(admin)
        {
            tracing::warn!(admin, "admin user is not configured in users");
        }
    }

    /// Path part of the base URL without trailing slash, e.g. `/owncloud`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        let url = self.server.base_url.as_str();
        let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        after_scheme
            .find('/')
            .map_or("", |i| after_scheme[i..].trim_end_matches('/'))
    }
}
