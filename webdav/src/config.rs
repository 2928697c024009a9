// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::error::DavError;

/// Authentication method for a single request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// Layout of the `WebDAV` endpoint on the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "u8")]
pub enum DavPathVersion {
    /// Legacy endpoint, `<root>/webdav/<path>`.
    Old,
    /// Per-user endpoint, `<root>/dav/files/<user>/<path>`.
    #[default]
    New,
    /// Space endpoint, `<root>/dav/spaces/<space id>/<path>`.
    Spaces,
}

impl TryFrom<u8> for DavPathVersion {
    type Error = DavError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Old),
            2 => Ok(Self::New),
            3 => Ok(Self::Spaces),
            v => Err(DavError::Config(format!("unknown DAV path version: {v}"))),
        }
    }
}

impl FromStr for DavPathVersion {
    type Err = DavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "old" => Ok(Self::Old),
            "2" | "new" => Ok(Self::New),
            "3" | "spaces" => Ok(Self::Spaces),
            _ => Err(DavError::Config(format!("unknown DAV path version: {s}"))),
        }
    }
}

impl fmt::Display for DavPathVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
            Self::Spaces => f.write_str("spaces"),
        }
    }
}

/// `WebDAV` server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DavConfig {
    /// Base URL of the server, e.g. `https://cloud.example.com`.
    pub base_url: String,
    /// Prefix in front of the DAV endpoints, `remote.php` by default. May be empty.
    #[serde(default = "default_dav_root")]
    pub dav_root: String,
    /// Endpoint layout used for user queries.
    #[serde(default)]
    pub dav_path_version: DavPathVersion,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl DavConfig {
    /// Returns the DAV root with surrounding slashes trimmed.
    #[must_use]
    pub fn dav_root(&self) -> &str {
        self.dav_root.trim_matches('/')
    }

    /// Prefixes `path` with the DAV root, e.g. `dav/files/a` becomes
    /// `remote.php/dav/files/a`.
    #[must_use]
    pub fn prefix_root(&self, path: &str) -> String {
        let root = self.dav_root();
        if root.is_empty() {
            path.to_string()
        } else {
            format!("{root}/{path}")
        }
    }
}

fn default_dav_root() -> String {
    "remote.php".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("davcheck/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for DavConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            dav_root: default_dav_root(),
            dav_path_version: DavPathVersion::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
