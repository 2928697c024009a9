// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcheck_webdav::Actor;

/// Tokens of the last created public links.
///
/// The legacy sharing API and the sharing NG API keep separate slots; which
/// one is current depends on the configured sharing mode.
#[derive(Debug, Clone, Default)]
pub struct ShareTokens {
    legacy: Option<LinkShare>,
    ng: Option<LinkShare>,
    use_ng: bool,
}

#[derive(Debug, Clone)]
struct LinkShare {
    token: String,
    password: Option<String>,
}

impl ShareTokens {
    /// Empty slots, reading from the NG slot when `use_ng`.
    #[must_use]
    pub fn new(use_ng: bool) -> Self {
        Self {
            use_ng,
            ..Default::default()
        }
    }

    /// Records a link created through the legacy sharing API.
    pub fn set_last_public_share(&mut self, token: impl Into<String>, password: Option<String>) {
        self.legacy = Some(LinkShare {
            token: token.into(),
            password,
        });
    }

    /// Records a link created through the sharing NG API.
    pub fn set_last_ng_link_share(&mut self, token: impl Into<String>, password: Option<String>) {
        self.ng = Some(LinkShare {
            token: token.into(),
            password,
        });
    }

    /// Token of the last link created with the active API.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current_share().map(|s| s.token.as_str())
    }

    /// Request actor for the last link created with the active API.
    #[must_use]
    pub fn actor(&self) -> Option<Actor> {
        self.current_share().map(|s| Actor::Public {
            token: s.token.clone(),
            password: s.password.clone(),
        })
    }

    fn current_share(&self) -> Option<&LinkShare> {
        if self.use_ng {
            self.ng.as_ref()
        } else {
            self.legacy.as_ref()
        }
    }
}
