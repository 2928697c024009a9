// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use davcheck_webdav::{Namespace, ns};

/// Prefix to namespace URI bindings used to resolve property addresses.
///
/// Lookups never touch the document; every check takes the bindings it
/// resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    bindings: BTreeMap<String, String>,
}

impl Default for Namespaces {
    /// The well-known `d`, `oc`, `s` and `ocs` prefixes.
    fn default() -> Self {
        let bindings = ns::WELL_KNOWN
            .iter()
            .map(|(prefix, uri)| ((*prefix).to_string(), (*uri).to_string()))
            .collect();
        Self { bindings }
    }
}

impl Namespaces {
    /// Bindings with no prefix registered at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Adds a binding, replacing any previous URI for the prefix.
    #[must_use]
    pub fn with(mut self, namespace: &Namespace) -> Self {
        self.register(namespace);
        self
    }

    /// Adds a binding in place.
    pub fn register(&mut self, namespace: &Namespace) {
        self.bindings
            .insert(namespace.prefix.clone(), namespace.uri.clone());
    }

    /// URI bound to `prefix`.
    #[must_use]
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Prefix bound to `uri`, the first in prefix order.
    #[must_use]
    pub fn prefix_of(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, u)| u.as_str() == uri)
            .map(|(p, _)| p.as_str())
    }
}
