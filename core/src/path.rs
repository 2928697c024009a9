// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! A small `XPath` subset for addressing nodes of a response.
//!
//! Supported: `/` and `//` steps, the `child::`, `following-sibling::`,
//! `self::` axes (with `.` and `..` abbreviations), `prefix:local` and `*`
//! node tests, and `[n]` or `[.='text']` predicates.

use std::fmt;
use std::str::FromStr;

use davcheck_webdav::{Document, Element, NodeId};

use crate::error::Failure;
use crate::namespaces::Namespaces;

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPath {
    source: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    /// Preceded by `//`.
    recursive: bool,
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    FollowingSibling,
    SelfNode,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Any,
    Name {
        prefix: Option<String>,
        local: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Position(usize),
    TextEquals(String),
}

/// A node during evaluation, `None` being the document itself.
type Context = Option<NodeId>;

impl ItemPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidPath`] on syntax outside the supported subset.
    pub fn parse(path: &str) -> Result<Self, Failure> {
        let invalid = |reason: String| Failure::InvalidPath {
            path: path.to_string(),
            reason,
        };

        let mut steps = Vec::new();
        let mut rest = path.trim();
        if rest.is_empty() {
            return Err(invalid("empty path".to_string()));
        }

        while !rest.is_empty() {
            let recursive = if let Some(r) = rest.strip_prefix("//") {
                rest = r;
                true
            } else {
                rest = rest.strip_prefix('/').unwrap_or(rest);
                false
            };

            let end = step_end(rest).map_err(invalid)?;
            let (text, tail) = rest.split_at(end);
            if text.is_empty() {
                return Err(invalid("empty step".to_string()));
            }
            steps.push(parse_step(recursive, text).map_err(invalid)?);
            rest = tail;
        }

        Ok(Self {
            source: path.to_string(),
            steps,
        })
    }

    /// The expression as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluates the path, returning matches in document order.
    ///
    /// A prefix not bound in `namespaces` matches nothing.
    #[must_use]
    pub fn select<'a>(&self, doc: &'a Document, namespaces: &Namespaces) -> Vec<Element<'a>> {
        let mut contexts: Vec<Context> = vec![None];

        for step in &self.steps {
            let Some(test) = ResolvedTest::new(&step.test, namespaces) else {
                tracing::debug!(path = %self.source, "unbound namespace prefix");
                return Vec::new();
            };

            let bases: Vec<Context> = if step.recursive {
                let mut all = Vec::new();
                for ctx in &contexts {
                    all.push(*ctx);
                    all.extend(descendants(doc, *ctx).into_iter().map(Some));
                }
                sort_dedup(all)
            } else {
                contexts
            };

            let mut next = Vec::new();
            for base in bases {
                let candidates: Vec<Context> = axis_nodes(doc, base, step.axis)
                    .into_iter()
                    .filter(|ctx| test.matches(doc, *ctx))
                    .collect();
                next.extend(apply_predicates(doc, candidates, &step.predicates));
            }
            contexts = sort_dedup(next);
        }

        contexts
            .into_iter()
            .flatten()
            .map(|id| doc.element(id))
            .collect()
    }

    /// First match in document order.
    #[must_use]
    pub fn select_first<'a>(
        &self,
        doc: &'a Document,
        namespaces: &Namespaces,
    ) -> Option<Element<'a>> {
        self.select(doc, namespaces).into_iter().next()
    }
}

impl FromStr for ItemPath {
    type Err = Failure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Concatenated text of an element and its descendants.
#[must_use]
pub fn string_value(element: Element<'_>) -> String {
    let mut value = element.text().to_string();
    for d in element.descendants() {
        value.push_str(d.text());
    }
    value
}

/// Byte offset of the next step separator outside predicates and quotes.
fn step_end(s: &str) -> Result<usize, String> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ']'".to_string())?;
            }
            (None, '/') if depth == 0 => return Ok(i),
            _ => {}
        }
    }
    if quote.is_some() {
        return Err("unterminated string literal".to_string());
    }
    if depth != 0 {
        return Err("unterminated predicate".to_string());
    }
    Ok(s.len())
}

fn parse_step(recursive: bool, text: &str) -> Result<Step, String> {
    let (axis, rest) = if let Some(r) = text.strip_prefix("following-sibling::") {
        (Axis::FollowingSibling, r)
    } else if let Some(r) = text.strip_prefix("child::") {
        (Axis::Child, r)
    } else if let Some(r) = text.strip_prefix("self::") {
        (Axis::SelfNode, r)
    } else if let Some(r) = text.strip_prefix("..") {
        (Axis::Parent, if r.is_empty() { "*" } else { r })
    } else if let Some(r) = text.strip_prefix('.') {
        (Axis::SelfNode, if r.is_empty() { "*" } else { r })
    } else if text.contains("::") {
        return Err(format!("unsupported axis in \"{text}\""));
    } else {
        (Axis::Child, text)
    };

    let name_end = rest.find('[').unwrap_or(rest.len());
    let (name, mut preds) = rest.split_at(name_end);
    let test = parse_test(name)?;

    let mut predicates = Vec::new();
    while !preds.is_empty() {
        let inner = preds
            .strip_prefix('[')
            .ok_or_else(|| format!("unexpected \"{preds}\""))?;
        let close = predicate_end(inner)?;
        predicates.push(parse_predicate(&inner[..close])?);
        preds = &inner[close + 1..];
    }

    Ok(Step {
        recursive,
        axis,
        test,
        predicates,
    })
}

fn parse_test(name: &str) -> Result<NodeTest, String> {
    let name = name.trim();
    if name == "*" {
        return Ok(NodeTest::Any);
    }
    let (prefix, local) = match name.split_once(':') {
        Some((p, l)) => (Some(p.to_string()), l),
        None => (None, name),
    };
    let valid = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !valid(local) || prefix.as_deref().is_some_and(|p| !valid(p)) {
        return Err(format!("invalid node test \"{name}\""));
    }
    Ok(NodeTest::Name {
        prefix,
        local: local.to_string(),
    })
}

fn predicate_end(s: &str) -> Result<usize, String> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ']') => return Ok(i),
            _ => {}
        }
    }
    Err("unterminated predicate".to_string())
}

fn parse_predicate(s: &str) -> Result<Predicate, String> {
    let s = s.trim();
    if let Ok(n) = s.parse::<usize>() {
        return match n {
            0 => Err("positions start at 1".to_string()),
            n => Ok(Predicate::Position(n)),
        };
    }

    let rhs = s
        .strip_prefix("text()")
        .or_else(|| s.strip_prefix('.'))
        .and_then(|r| r.trim_start().strip_prefix('='))
        .map(str::trim)
        .ok_or_else(|| format!("unsupported predicate \"[{s}]\""))?;

    let literal = ['\'', '"']
        .iter()
        .find_map(|q| rhs.strip_prefix(*q).and_then(|r| r.strip_suffix(*q)))
        .ok_or_else(|| format!("expected a string literal in \"[{s}]\""))?;
    Ok(Predicate::TextEquals(literal.to_string()))
}

enum ResolvedTest<'n> {
    Any,
    Name {
        namespace: Option<&'n str>,
        local: &'n str,
    },
}

impl<'n> ResolvedTest<'n> {
    fn new(test: &'n NodeTest, namespaces: &'n Namespaces) -> Option<Self> {
        Some(match test {
            NodeTest::Any => Self::Any,
            NodeTest::Name { prefix, local } => Self::Name {
                namespace: match prefix {
                    Some(p) => Some(namespaces.resolve(p)?),
                    None => None,
                },
                local,
            },
        })
    }

    fn matches(&self, doc: &Document, ctx: Context) -> bool {
        let Some(id) = ctx else {
            return false;
        };
        let element = doc.element(id);
        match self {
            Self::Any => true,
            Self::Name { namespace, local } => {
                element.name() == *local && element.namespace() == *namespace
            }
        }
    }
}

fn children(doc: &Document, ctx: Context) -> Vec<NodeId> {
    match ctx {
        None => vec![doc.root().id()],
        Some(id) => doc.element(id).children().map(|c| c.id()).collect(),
    }
}

fn descendants(doc: &Document, ctx: Context) -> Vec<NodeId> {
    match ctx {
        None => doc.elements().map(|e| e.id()).collect(),
        Some(id) => doc
            .element(id)
            .descendants()
            .into_iter()
            .map(|e| e.id())
            .collect(),
    }
}

fn axis_nodes(doc: &Document, ctx: Context, axis: Axis) -> Vec<Context> {
    match axis {
        Axis::Child => children(doc, ctx).into_iter().map(Some).collect(),
        Axis::FollowingSibling => match ctx {
            None => Vec::new(),
            Some(id) => doc
                .element(id)
                .following_siblings()
                .map(|e| Some(e.id()))
                .collect(),
        },
        Axis::SelfNode => vec![ctx],
        Axis::Parent => match ctx {
            None => Vec::new(),
            Some(id) => vec![doc.element(id).parent().map(|p| p.id())],
        },
    }
}

fn apply_predicates(doc: &Document, mut nodes: Vec<Context>, preds: &[Predicate]) -> Vec<Context> {
    for pred in preds {
        nodes = match pred {
            Predicate::Position(n) => nodes.get(n - 1).copied().into_iter().collect(),
            Predicate::TextEquals(text) => nodes
                .into_iter()
                .filter(|ctx| ctx.is_some_and(|id| string_value(doc.element(id)) == *text))
                .collect(),
        };
    }
    nodes
}

fn sort_dedup(mut nodes: Vec<Context>) -> Vec<Context> {
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}
