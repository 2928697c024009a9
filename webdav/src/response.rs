// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response types for `WebDAV` operations.

use reqwest::StatusCode;

use crate::error::DavError;
use crate::types::{ETag, Href};
use crate::xml::{Document, Element, ns};

/// Raw response of a `WebDAV` request.
///
/// The status is not interpreted; callers decide what they expect.
#[derive(Debug, Clone)]
pub struct DavResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response body.
    pub body: String,
}

impl DavResponse {
    /// Parses the body as XML.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not well-formed XML.
    pub fn xml(&self) -> Result<Document, DavError> {
        Document::parse(&self.body)
    }

    /// Parses the body as a multistatus response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a multistatus document.
    pub fn multistatus(&self) -> Result<MultiStatusResponse, DavError> {
        MultiStatusResponse::from_document(&self.xml()?)
    }
}

/// `WebDAV` multistatus response.
#[derive(Debug, Clone)]
pub struct MultiStatusResponse {
    /// The response items, in document order.
    pub responses: Vec<ResponseItem>,
}

/// Individual response in multistatus.
#[derive(Debug, Clone)]
pub struct ResponseItem {
    /// Href of the resource.
    pub href: Href,
    /// Property stats.
    pub prop_stats: Vec<PropStat>,
    /// Response-level status, for responses without propstat.
    pub status: Option<String>,
}

/// Property stat with status and values.
#[derive(Debug, Clone)]
pub struct PropStat {
    /// Property values as `(namespace, local name, text)`.
    pub props: Vec<PropValue>,
    /// Status line, e.g. `HTTP/1.1 200 OK`.
    pub status: String,
}

/// A single property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropValue {
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    /// Text content.
    pub value: String,
}

impl MultiStatusResponse {
    /// Parses multistatus response from XML.
    ///
    /// # Errors
    ///
    /// Returns an error if XML parsing fails.
    pub fn from_xml(xml: &str) -> Result<Self, DavError> {
        Self::from_document(&Document::parse(xml)?)
    }

    /// Builds the typed view of a parsed document.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not `d:multistatus`.
    pub fn from_document(doc: &Document) -> Result<Self, DavError> {
        let root = doc.root();
        if !root.is(ns::DAV, "multistatus") {
            return Err(DavError::Xml(format!(
                "expected multistatus, got {}",
                root.name()
            )));
        }

        let responses = root
            .children()
            .filter(|c| c.is(ns::DAV, "response"))
            .map(response_item)
            .collect();
        Ok(Self { responses })
    }

    /// Finds the response for `href`.
    #[must_use]
    pub fn find(&self, href: &str) -> Option<&ResponseItem> {
        self.responses.iter().find(|r| r.href.as_str() == href)
    }

    /// First `d:getetag` in document order, if its propstat is successful.
    #[must_use]
    pub fn first_etag(&self) -> Option<ETag> {
        self.responses
            .iter()
            .flat_map(|r| r.prop_stats.iter())
            .find_map(|stat| {
                stat.props
                    .iter()
                    .find(|p| p.namespace.as_deref() == Some(ns::DAV) && p.name == "getetag")
                    .map(|p| (stat, p))
            })
            .filter(|(stat, _)| stat.is_success())
            .map(|(_, p)| ETag::new(p.value.clone()))
    }
}

impl ResponseItem {
    /// Value of a property from a successful propstat.
    #[must_use]
    pub fn prop(&self, namespace: &str, name: &str) -> Option<&str> {
        self.prop_stats
            .iter()
            .filter(|p| p.is_success())
            .flat_map(|p| p.props.iter())
            .find(|p| p.namespace.as_deref() == Some(namespace) && p.name == name)
            .map(|p| p.value.as_str())
    }
}

impl PropStat {
    /// Whether the status line reports 200.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.split_whitespace().nth(1) == Some("200")
    }
}

fn response_item(response: Element<'_>) -> ResponseItem {
    let href = response
        .child(ns::DAV, "href")
        .map(|h| Href::new(h.text().trim().to_string()))
        .unwrap_or_else(|| Href::new(String::new()));
    let status = response
        .child(ns::DAV, "status")
        .map(|s| s.text().trim().to_string());
    let prop_stats = response
        .children()
        .filter(|c| c.is(ns::DAV, "propstat"))
        .map(|propstat| PropStat {
            props: propstat
                .child(ns::DAV, "prop")
                .map(|prop| {
                    prop.children()
                        .map(|p| PropValue {
                            namespace: p.namespace().map(str::to_string),
                            name: p.name().to_string(),
                            value: p.text().to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            status: propstat
                .child(ns::DAV, "status")
                .map(|s| s.text().trim().to_string())
                .unwrap_or_default(),
        })
        .collect();

    ResponseItem {
        href,
        prop_stats,
        status,
    }
}
