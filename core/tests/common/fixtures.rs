// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories.

use davcheck_core::{Config, Scenario, Table};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One `d:response` of a multistatus body.
#[derive(Debug, Clone)]
pub struct Entry {
    pub href: String,
    pub props: Vec<(String, String)>,
    pub status: String,
}

impl Entry {
    /// An entry whose properties were all found.
    pub fn new(href: &str, props: &[(&str, &str)]) -> Self {
        Self {
            href: href.to_string(),
            props: props
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            status: "HTTP/1.1 200 OK".to_string(),
        }
    }

    /// An entry whose properties were not found.
    pub fn not_found(href: &str, props: &[&str]) -> Self {
        Self {
            href: href.to_string(),
            props: props
                .iter()
                .map(|k| ((*k).to_string(), String::new()))
                .collect(),
            status: "HTTP/1.1 404 Not Found".to_string(),
        }
    }
}

/// An entry with only a `d:getetag`.
pub fn etag_entry(href: &str, etag: &str) -> Entry {
    Entry::new(href, &[("d:getetag", etag)])
}

/// A multistatus body declaring `d`, `oc` and `x1`.
pub fn multistatus(entries: &[Entry]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="utf-8"?>
<d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:x1="http://whatever.org/ns">"#,
    );
    for entry in entries {
        xml.push_str("\n  <d:response>\n");
        xml.push_str(&format!("    <d:href>{}</d:href>\n", entry.href));
        xml.push_str("    <d:propstat>\n      <d:prop>\n");
        for (name, value) in &entry.props {
            if value.is_empty() {
                xml.push_str(&format!("        <{name}/>\n"));
            } else {
                xml.push_str(&format!("        <{name}>{value}</{name}>\n"));
            }
        }
        xml.push_str("      </d:prop>\n");
        xml.push_str(&format!("      <d:status>{}</d:status>\n", entry.status));
        xml.push_str("    </d:propstat>\n  </d:response>");
    }
    xml.push_str("\n</d:multistatus>");
    xml
}

/// A scenario with users `alice` and `brian` against the mock server.
pub fn scenario(server: &MockServer) -> Scenario {
    scenario_with_config(
        Config::new(server.uri())
            .with_user("alice", "secret")
            .with_user("brian", "hunter2"),
    )
}

/// A scenario with the given configuration.
pub fn scenario_with_config(config: Config) -> Scenario {
    Scenario::new(config).expect("Failed to create scenario")
}

/// Answers every PROPFIND on `url_path` with a 207 and `body`.
pub async fn mock_propfind(server: &MockServer, url_path: &str, body: String) {
    Mock::given(method("PROPFIND"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(207).set_body_raw(body, "application/xml"))
        .mount(server)
        .await;
}

/// Answers the next PROPFIND on `url_path` with a depth header only once.
pub async fn mock_propfind_once(server: &MockServer, url_path: &str, depth: &str, body: String) {
    Mock::given(method("PROPFIND"))
        .and(path(url_path))
        .and(header("Depth", depth))
        .respond_with(ResponseTemplate::new(207).set_body_raw(body, "application/xml"))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}

/// Parses a pipe table.
pub fn table(text: &str) -> Table {
    text.parse().expect("Failed to parse table")
}
