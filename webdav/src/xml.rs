// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for `WebDAV` processing.

use std::fmt;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::DavError;

/// XML namespaces and the prefixes they are conventionally bound to.
pub mod ns {
    /// `WebDAV` namespace.
    pub const DAV: &str = "DAV:";

    /// ownCloud namespace.
    pub const OWNCLOUD: &str = "http://owncloud.org/ns";

    /// SabreDAV namespace.
    pub const SABRE: &str = "http://sabredav.org/ns";

    /// Open Collaboration Services namespace.
    pub const OCS: &str = "http://open-collaboration-services.org/ns";

    /// Well-known `(prefix, uri)` pairs.
    pub const WELL_KNOWN: &[(&str, &str)] = &[
        ("d", DAV),
        ("oc", OWNCLOUD),
        ("s", SABRE),
        ("ocs", OCS),
    ];

    /// Looks up the URI of a well-known prefix.
    #[must_use]
    pub fn well_known(prefix: &str) -> Option<&'static str> {
        WELL_KNOWN
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| *uri)
    }
}

/// A namespace binding, `prefix` → `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// Prefix used in property names.
    pub prefix: String,
    /// Namespace URI.
    pub uri: String,
}

impl Namespace {
    /// Creates a new binding.
    #[must_use]
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Parses the `x1='http://whatever.org/ns'` form used in test tables.
///
/// Double quotes and unquoted URIs are accepted too.
impl FromStr for Namespace {
    type Err = DavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, uri) = s
            .split_once('=')
            .ok_or_else(|| DavError::Config(format!("invalid namespace: {s}")))?;
        let prefix = prefix.trim();
        let uri = uri.trim().trim_matches(|c| c == '\'' || c == '"');
        if prefix.is_empty() || uri.is_empty() || prefix.contains(':') {
            return Err(DavError::Config(format!("invalid namespace: {s}")));
        }
        Ok(Self::new(prefix, uri))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}='{}'", self.prefix, self.uri)
    }
}

/// Name of a property to request or patch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropName {
    /// Prefix, `d` when the name was given bare.
    pub prefix: String,
    /// Local name.
    pub local: String,
    /// Namespace URI, if the prefix is known.
    pub namespace: Option<String>,
}

impl PropName {
    /// Parses `prefix:local` (or a bare `local`, meaning `d:local`) and binds
    /// well-known prefixes.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn parse(name: &str) -> Result<Self, DavError> {
        let name = name.trim();
        let (prefix, local) = name.split_once(':').unwrap_or(("d", name));
        if local.is_empty() || prefix.is_empty() {
            return Err(DavError::Config(format!("invalid property name: {name}")));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            local: local.to_string(),
            namespace: ns::well_known(prefix).map(str::to_string),
        })
    }

    /// Parses a name whose prefix is bound to a custom namespace.
    ///
    /// A bare name takes the namespace' prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn with_namespace(name: &str, namespace: &Namespace) -> Result<Self, DavError> {
        let name = name.trim();
        let local = match name.split_once(':') {
            Some((prefix, local)) if prefix == namespace.prefix => local,
            Some(_) => return Self::parse(name),
            None => name,
        };
        if local.is_empty() {
            return Err(DavError::Config(format!("invalid property name: {name}")));
        }
        Ok(Self {
            prefix: namespace.prefix.clone(),
            local: local.to_string(),
            namespace: Some(namespace.uri.clone()),
        })
    }

    /// Qualified name as written in a request body.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.prefix, self.local)
    }
}

impl fmt::Display for PropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// Index of an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    namespace: Option<String>,
    prefix: Option<String>,
    name: String,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed XML document with namespace-resolved element names.
///
/// Elements live in an arena in document order, so sibling and ancestor
/// navigation is cheap.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parses an XML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed or has no root element.
    pub fn parse(xml: &str) -> Result<Self, DavError> {
        let mut reader = NsReader::from_str(xml);
        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            let namespace = match resolved {
                ResolveResult::Bound(ns) => {
                    Some(String::from_utf8_lossy(ns.as_ref()).into_owned())
                }
                ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
            };

            match event {
                Event::Start(ref e) => {
                    let id = push_node(&mut nodes, &stack, namespace, e)?;
                    stack.push(id);
                }
                Event::Empty(ref e) => {
                    push_node(&mut nodes, &stack, namespace, e)?;
                }
                Event::End(_) => {
                    if let Some(NodeId(id)) = stack.pop() {
                        let node = &mut nodes[id];
                        if !node.children.is_empty() && node.text.trim().is_empty() {
                            node.text.clear();
                        }
                    }
                }
                Event::Text(ref t) => {
                    let raw = std::str::from_utf8(t)
                        .map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))?;
                    let text = quick_xml::escape::unescape(raw)
                        .map_err(|e| DavError::Xml(e.to_string()))?;
                    append_text(&mut nodes, &stack, &text);
                }
                Event::CData(ref t) => {
                    let text = std::str::from_utf8(t)
                        .map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))?;
                    append_text(&mut nodes, &stack, text);
                }
                Event::GeneralRef(ref r) => {
                    let name = std::str::from_utf8(r)
                        .map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))?;
                    let reference = format!("&{name};");
                    let text = quick_xml::escape::unescape(&reference)
                        .map_err(|e| DavError::Xml(e.to_string()))?;
                    append_text(&mut nodes, &stack, &text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if nodes.is_empty() {
            return Err(DavError::Xml("document has no root element".to_string()));
        }
        if !stack.is_empty() {
            return Err(DavError::Xml("Unexpected EOF".to_string()));
        }

        Ok(Self { nodes })
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> Element<'_> {
        Element {
            doc: self,
            id: NodeId(0),
        }
    }

    /// Resolves a node id obtained from this document.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Element<'_> {
        Element { doc: self, id }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        (0..self.nodes.len()).map(|i| self.element(NodeId(i)))
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

fn push_node(
    nodes: &mut Vec<Node>,
    stack: &[NodeId],
    namespace: Option<String>,
    e: &BytesStart<'_>,
) -> Result<NodeId, DavError> {
    let name = std::str::from_utf8(e.local_name().as_ref())
        .map_err(|err| DavError::Xml(format!("UTF-8 error: {err}")))?
        .to_string();
    let prefix = e
        .name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());

    let parent = stack.last().copied();
    let id = NodeId(nodes.len());
    nodes.push(Node {
        namespace,
        prefix,
        name,
        text: String::new(),
        parent,
        children: Vec::new(),
    });
    if let Some(NodeId(p)) = parent {
        nodes[p].children.push(id);
    }
    Ok(id)
}

fn append_text(nodes: &mut [Node], stack: &[NodeId], text: &str) {
    if let Some(NodeId(id)) = stack.last() {
        nodes[*id].text.push_str(text);
    }
}

/// Borrowed handle to an element of a [`Document`].
#[derive(Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Element<'a> {
    /// Node id, stable for the lifetime of the document.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Local name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.doc.node(self.id).name
    }

    /// Resolved namespace URI.
    #[must_use]
    pub fn namespace(&self) -> Option<&'a str> {
        self.doc.node(self.id).namespace.as_deref()
    }

    /// Prefix as written in the document.
    #[must_use]
    pub fn prefix(&self) -> Option<&'a str> {
        self.doc.node(self.id).prefix.as_deref()
    }

    /// Text directly inside this element, not including descendants.
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.doc.node(self.id).text
    }

    /// Whether the element has neither children nor text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let node = self.doc.node(self.id);
        node.children.is_empty() && node.text.is_empty()
    }

    /// Whether this element has the given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name() == name && self.namespace() == Some(namespace)
    }

    /// Parent element.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.doc.node(self.id).parent.map(|id| self.doc.element(id))
    }

    /// Child elements in document order.
    pub fn children(self) -> impl Iterator<Item = Element<'a>> {
        let doc = self.doc;
        doc.node(self.id)
            .children
            .iter()
            .map(move |id| doc.element(*id))
    }

    /// Siblings after this element, in document order.
    pub fn following_siblings(self) -> impl Iterator<Item = Element<'a>> {
        let doc = self.doc;
        let id = self.id;
        let siblings: &'a [NodeId] = match doc.node(id).parent {
            Some(parent) => &doc.node(parent).children,
            None => &[],
        };
        siblings
            .iter()
            .skip_while(move |s| **s != id)
            .skip(1)
            .map(move |s| doc.element(*s))
    }

    /// All descendants in document order, excluding this element.
    #[must_use]
    pub fn descendants(&self) -> Vec<Element<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.doc.node(self.id).children.clone();
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(self.doc.element(id));
            stack.extend(self.doc.node(id).children.iter().rev().copied());
        }
        out
    }

    /// First child with the given namespace and local name.
    #[must_use]
    pub fn child(&self, namespace: &str, name: &str) -> Option<Self> {
        self.children().find(|c| c.is(namespace, name))
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("namespace", &self.namespace())
            .field("name", &self.name())
            .field("text", &self.text())
            .finish()
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}
