// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use davcheck_webdav::Actor;

use crate::config::{Config, UserConfig};
use crate::error::Error;
use crate::substitute::{self, Substitutions};

/// Placeholder for the admin user in scenario text.
pub const ADMIN: &str = "%admin%";

/// Resolves logical user names to credentials.
#[derive(Debug, Clone, Default)]
pub struct Actors {
    admin: Option<String>,
    default_password: Option<String>,
    users: BTreeMap<String, UserConfig>,
}

impl Actors {
    /// Actors from the user table of a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            admin: config.admin.clone(),
            default_password: config.default_password.clone(),
            users: config.users.clone(),
        }
    }

    /// Login name for `user`.
    ///
    /// `%admin%` is the configured admin; otherwise a configured user whose
    /// name matches case-insensitively, or `user` as given.
    #[must_use]
    pub fn actual_username(&self, user: &str) -> String {
        if user == ADMIN
            && let Some(admin) = &self.admin
        {
            return admin.clone();
        }
        self.users
            .keys()
            .find(|k| k.eq_ignore_ascii_case(user))
            .cloned()
            .unwrap_or_else(|| user.to_string())
    }

    /// Password of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if neither the user nor the defaults have one.
    pub fn password(&self, user: &str) -> Result<String, Error> {
        let username = self.actual_username(user);
        self.users
            .get(&username)
            .and_then(|u| u.password.clone())
            .or_else(|| self.default_password.clone())
            .ok_or_else(|| Error::Config(format!("no password for user {username}")))
    }

    /// Display name of `user`, the login name if none is configured.
    #[must_use]
    pub fn display_name(&self, user: &str) -> String {
        let username = self.actual_username(user);
        self.users
            .get(&username)
            .and_then(|u| u.display_name.clone())
            .unwrap_or(username)
    }

    /// Personal space id of `user`.
    #[must_use]
    pub fn space_id(&self, user: &str) -> Option<String> {
        self.users
            .get(&self.actual_username(user))
            .and_then(|u| u.space_id.clone())
    }

    /// Request actor for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the user has no password.
    pub fn actor(&self, user: &str) -> Result<Actor, Error> {
        Ok(Actor::user(self.actual_username(user), self.password(user)?))
    }

    /// Placeholder values for `user`.
    ///
    /// A missing password or space id leaves its code unreplaced.
    #[must_use]
    pub fn substitutions(&self, user: &str, config: &Config) -> Substitutions {
        let mut subs = Substitutions::new()
            .set(substitute::USERNAME, self.actual_username(user))
            .set(substitute::DISPLAY_NAME, self.display_name(user))
            .set(substitute::BASE_URL, config.server.base_url.trim_end_matches('/'))
            .set(substitute::BASE_PATH, config.base_path().trim_start_matches('/'));
        if let Ok(password) = self.password(user) {
            subs = subs.set(substitute::PASSWORD, password);
        }
        if let Some(space_id) = self.space_id(user) {
            subs = subs.set(substitute::SPACE_ID, space_id);
        }
        subs
    }
}
