// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication.

use reqwest::{Client, Method, RequestBuilder};

use crate::config::{AuthMethod, DavConfig};
use crate::error::DavError;
use crate::response::DavResponse;

/// HTTP client for `WebDAV` operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &DavConfig) -> Result<Self, DavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Builds a request with authentication headers.
    pub fn build_request(
        &self,
        method: Method,
        url: reqwest::Url,
        auth: &AuthMethod,
    ) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Sends a request and reads the whole response.
    ///
    /// Any HTTP status is returned as is; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body cannot be read.
    pub async fn send(&self, req: RequestBuilder) -> Result<DavResponse, DavError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(%status, bytes = body.len(), "received response");
        Ok(DavResponse { status, body })
    }
}

/// Builds a `WebDAV` extension method such as PROPFIND.
///
/// # Errors
///
/// Returns an error if the method name is not a valid token.
pub fn dav_method(name: &str) -> Result<Method, DavError> {
    Method::from_bytes(name.as_bytes())
        .map_err(|e| DavError::Http(format!("Invalid method: {e}")))
}
