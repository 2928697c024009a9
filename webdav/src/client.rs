// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `WebDAV` client for property operations.

use std::sync::Arc;

use reqwest::Url;

use crate::config::{AuthMethod, DavConfig, DavPathVersion};
use crate::error::DavError;
use crate::http::{HttpClient, dav_method};
use crate::request::{PropFindRequest, PropPatchRequest};
use crate::response::DavResponse;
use crate::types::Depth;
use crate::xml::PropName;

/// Who issues a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// An authenticated user.
    User {
        /// Login name.
        username: String,
        /// Password.
        password: String,
    },
    /// Anyone holding a public link token.
    Public {
        /// Share token.
        token: String,
        /// Link password, if the link is protected.
        password: Option<String>,
    },
}

impl Actor {
    /// Creates an authenticated user actor.
    #[must_use]
    pub fn user(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::User {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a public link actor.
    #[must_use]
    pub fn public(token: impl Into<String>) -> Self {
        Self::Public {
            token: token.into(),
            password: None,
        }
    }

    /// Credentials for this actor.
    #[must_use]
    pub fn auth(&self) -> AuthMethod {
        match self {
            Self::User { username, password } => AuthMethod::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            Self::Public {
                password: Some(password),
                ..
            } => AuthMethod::Basic {
                username: "public".to_string(),
                password: password.clone(),
            },
            Self::Public { password: None, .. } => AuthMethod::None,
        }
    }

    /// Username or share token, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User { username, .. } => username,
            Self::Public { token, .. } => token,
        }
    }
}

/// A "list resource properties" request.
#[derive(Debug, Clone)]
pub struct PropertyQuery {
    /// Who asks.
    pub actor: Actor,
    /// Resource path relative to the actor's root.
    pub path: String,
    /// Listing depth.
    pub depth: Depth,
    /// Requested properties, empty for the server defaults.
    pub properties: Vec<PropName>,
    /// Space id, required by the spaces endpoint.
    pub space_id: Option<String>,
}

impl PropertyQuery {
    /// Creates a depth 0 query for the server's default properties.
    #[must_use]
    pub fn new(actor: Actor, path: impl Into<String>) -> Self {
        Self {
            actor,
            path: path.into(),
            depth: Depth::Zero,
            properties: Vec::new(),
            space_id: None,
        }
    }

    /// Sets the depth.
    #[must_use]
    pub const fn depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the requested properties.
    #[must_use]
    pub fn properties(mut self, properties: Vec<PropName>) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the space id.
    #[must_use]
    pub fn space_id(mut self, space_id: Option<String>) -> Self {
        self.space_id = space_id;
        self
    }
}

/// `WebDAV` client for reading and writing resource properties.
///
/// # Example
///
/// ```ignore
/// use davcheck_webdav::{Actor, DavClient, DavConfig, Depth, PropName, PropertyQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DavClient::new(DavConfig {
///     base_url: "https://cloud.example.com".to_string(),
///     ..Default::default()
/// })?;
///
/// let query = PropertyQuery::new(Actor::user("alice", "secret"), "/file.txt")
///     .properties(vec![PropName::parse("d:getetag")?]);
/// let response = client.propfind(&query).await?;
/// let etag = response.multistatus()?.first_etag();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DavClient {
    http: Arc<HttpClient>,
    config: DavConfig,
}

impl DavClient {
    /// Creates a new `WebDAV` client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Client configuration.
    #[must_use]
    pub const fn config(&self) -> &DavConfig {
        &self.config
    }

    /// Lists properties of a resource.
    ///
    /// The response is returned whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or if the URL cannot be built.
    pub async fn propfind(&self, query: &PropertyQuery) -> Result<DavResponse, DavError> {
        let url = self.resource_url(&query.actor, &query.path, query.space_id.as_deref())?;

        let mut propfind = PropFindRequest::new();
        for prop in &query.properties {
            propfind.add_property(prop.clone());
        }
        let xml_body = propfind.build()?;

        tracing::debug!(%url, depth = %query.depth, props = query.properties.len(), "PROPFIND");
        self.http
            .send(
                self.http
                    .build_request(dav_method("PROPFIND")?, url, &query.actor.auth())
                    .header("Content-Type", "application/xml; charset=utf-8")
                    .header("Depth", query.depth.header_value())
                    .body(xml_body),
            )
            .await
    }

    /// Sets or removes properties of a resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or if the URL cannot be built.
    pub async fn proppatch(
        &self,
        actor: &Actor,
        path: &str,
        space_id: Option<&str>,
        request: &PropPatchRequest,
    ) -> Result<DavResponse, DavError> {
        let url = self.resource_url(actor, path, space_id)?;
        let xml_body = request.build()?;

        tracing::debug!(%url, "PROPPATCH");
        self.http
            .send(
                self.http
                    .build_request(dav_method("PROPPATCH")?, url, &actor.auth())
                    .header("Content-Type", "application/xml; charset=utf-8")
                    .body(xml_body),
            )
            .await
    }

    /// Full URL of a resource as seen by `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, or if the spaces endpoint
    /// is used without a space id.
    pub fn resource_url(
        &self,
        actor: &Actor,
        path: &str,
        space_id: Option<&str>,
    ) -> Result<Url, DavError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| DavError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;

        let mut segments: Vec<&str> = self
            .config
            .dav_root()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        segments.extend(self.endpoint(actor, space_id)?);
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        if path.ends_with('/') && path.len() > 1 {
            segments.push("");
        }

        url.path_segments_mut()
            .map_err(|()| DavError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn endpoint<'a>(
        &self,
        actor: &'a Actor,
        space_id: Option<&'a str>,
    ) -> Result<Vec<&'a str>, DavError> {
        Ok(match actor {
            Actor::Public { token, .. } => vec!["dav", "public-files", token.as_str()],
            Actor::User { username, .. } => match self.config.dav_path_version {
                DavPathVersion::Old => vec!["webdav"],
                DavPathVersion::New => vec!["dav", "files", username.as_str()],
                DavPathVersion::Spaces => {
                    let space_id = space_id.ok_or_else(|| {
                        DavError::Config(format!("no space id for user {username}"))
                    })?;
                    vec!["dav", "spaces", space_id]
                }
            },
        })
    }
}
