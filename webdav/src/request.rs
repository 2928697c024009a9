// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request builders for `WebDAV` property operations.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::DavError;
use crate::xml::{Namespace, PropName, ns};

/// PROPFIND request builder.
///
/// Without properties the request asks for `allprop`.
#[derive(Debug, Default)]
pub struct PropFindRequest {
    props: Vec<PropName>,
}

impl PropFindRequest {
    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn new() -> Self {
        Self { props: Vec::new() }
    }

    /// Adds a property to the request.
    pub fn add_property(&mut self, prop: PropName) -> &mut Self {
        self.props.push(prop);
        self
    }

    /// Requested properties.
    #[must_use]
    pub fn properties(&self) -> &[PropName] {
        &self.props
    }

    /// Builds the XML body for the PROPFIND request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, DavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <d:propfind xmlns:d="DAV:" ...>
        let mut propfind = BytesStart::new("d:propfind");
        for (prefix, uri) in declarations(self.props.iter()) {
            propfind.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
        }
        writer.write_event(Event::Start(propfind))?;

        if self.props.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("d:allprop")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("d:prop")))?;
            for prop in &self.props {
                writer.write_event(Event::Empty(BytesStart::new(prop.qualified())))?;
            }
            writer.write_event(Event::End(BytesEnd::new("d:prop")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("d:propfind")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))
    }
}

/// PROPPATCH request builder.
#[derive(Debug, Default)]
pub struct PropPatchRequest {
    set: Vec<(PropName, String)>,
    remove: Vec<PropName>,
}

impl PropPatchRequest {
    /// Creates a new PROPPATCH request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property to a value.
    pub fn set(&mut self, prop: PropName, value: impl Into<String>) -> &mut Self {
        self.set.push((prop, value.into()));
        self
    }

    /// Removes a property.
    pub fn remove(&mut self, prop: PropName) -> &mut Self {
        self.remove.push(prop);
        self
    }

    /// Whether the request changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty()
    }

    /// Builds the XML body for the PROPPATCH request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, DavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <d:propertyupdate xmlns:d="DAV:" ...>
        let mut update = BytesStart::new("d:propertyupdate");
        let names = self.set.iter().map(|(p, _)| p).chain(self.remove.iter());
        for (prefix, uri) in declarations(names) {
            update.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
        }
        writer.write_event(Event::Start(update))?;

        if !self.set.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("d:set")))?;
            writer.write_event(Event::Start(BytesStart::new("d:prop")))?;
            for (prop, value) in &self.set {
                let name = prop.qualified();
                writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
                writer.write_event(Event::Text(BytesText::new(value)))?;
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
            writer.write_event(Event::End(BytesEnd::new("d:prop")))?;
            writer.write_event(Event::End(BytesEnd::new("d:set")))?;
        }

        if !self.remove.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("d:remove")))?;
            writer.write_event(Event::Start(BytesStart::new("d:prop")))?;
            for prop in &self.remove {
                writer.write_event(Event::Empty(BytesStart::new(prop.qualified())))?;
            }
            writer.write_event(Event::End(BytesEnd::new("d:prop")))?;
            writer.write_event(Event::End(BytesEnd::new("d:remove")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("d:propertyupdate")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))
    }
}

/// Namespace declarations needed by `props`, `d` first, each prefix once.
///
/// Names with an unknown prefix and no namespace are left undeclared; the
/// server rejects them, which is what a test for them expects.
fn declarations<'a>(props: impl Iterator<Item = &'a PropName>) -> Vec<(String, String)> {
    let mut out = vec![("d".to_string(), ns::DAV.to_string())];
    for prop in props {
        let Some(uri) = &prop.namespace else {
            continue;
        };
        if out.iter().all(|(prefix, _)| *prefix != prop.prefix) {
            out.push((prop.prefix.clone(), uri.clone()));
        }
    }
    out
}

/// Property names for a request, binding `namespace` to its prefix.
///
/// # Errors
///
/// Returns an error if a name is empty.
pub fn prop_names<S: AsRef<str>>(
    names: &[S],
    namespace: Option<&Namespace>,
) -> Result<Vec<PropName>, DavError> {
    names
        .iter()
        .map(|name| match namespace {
            Some(ns) => PropName::with_namespace(name.as_ref(), ns),
            None => PropName::parse(name.as_ref()),
        })
        .collect()
}
