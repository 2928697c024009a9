// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Checks of property values in a parsed multistatus document.
//!
//! Every check is a pure function of the document and its parameters.
//! Placeholder substitution happens before a check is called.

use davcheck_webdav::{Document, Element, Href, ns};
use regex::Regex;

use crate::address::PropertyAddress;
use crate::error::Failure;
use crate::namespaces::Namespaces;
use crate::path::ItemPath;

/// Locates a property under `d:prop`.
///
/// The first occurrence in document order is the one checked, so on a
/// listing it belongs to the requested resource rather than a child. A
/// property reported in a failed propstat, such as a 404 for an unset
/// property, counts as missing.
///
/// # Errors
///
/// Returns [`Failure::MissingProperty`] if nothing matches, including when a
/// prefix of the address is not bound.
pub fn find_property<'a>(
    doc: &'a Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
) -> Result<Element<'a>, Failure> {
    let missing = || Failure::MissingProperty {
        property: address.to_string(),
    };
    let found = address
        .to_path()?
        .select_first(doc, namespaces)
        .ok_or_else(missing)?;
    if found.name() == address.leaf_local() && in_successful_propstat(found) {
        Ok(found)
    } else {
        Err(missing())
    }
}

/// All reported properties at `address`, in document order.
fn select_properties<'a>(
    doc: &'a Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
) -> Result<Vec<Element<'a>>, Failure> {
    Ok(address
        .to_path()?
        .select(doc, namespaces)
        .into_iter()
        .filter(|e| in_successful_propstat(*e))
        .collect())
}

/// Whether the enclosing propstat, if any, has a 2xx status.
fn in_successful_propstat(element: Element<'_>) -> bool {
    let mut current = element.parent();
    while let Some(node) = current {
        if node.is(ns::DAV, "propstat") {
            return node.child(ns::DAV, "status").is_none_or(|status| {
                status
                    .text()
                    .split_whitespace()
                    .nth(1)
                    .is_some_and(|code| code.starts_with('2'))
            });
        }
        current = node.parent();
    }
    true
}

/// The property value matches `expected` or `alternative`, both as anchored
/// regular expressions.
///
/// # Errors
///
/// Fails if the property is missing, a pattern is invalid, or neither matches.
pub fn property_matches(
    doc: &Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
    expected: &str,
    alternative: &str,
) -> Result<(), Failure> {
    let value = find_property(doc, namespaces, address)?.text();
    let patterns = [expected, alternative];
    for pattern in patterns {
        if anchored(pattern)?.is_match(value) {
            return Ok(());
        }
    }
    Err(Failure::NotOneOf {
        path: address.to_string(),
        actual: value.to_string(),
        expected: patterns.iter().map(|p| format!("^{p}$")).collect(),
    })
}

/// The property value matches a regular expression, optionally written with
/// `/` delimiters.
///
/// # Errors
///
/// Fails if the property is missing, the pattern is invalid or does not match.
pub fn property_value_like(
    doc: &Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
    pattern: &str,
) -> Result<(), Failure> {
    let value = find_property(doc, namespaces, address)?.text();
    if delimited(pattern)?.is_match(value) {
        Ok(())
    } else {
        Err(Failure::PatternMismatch {
            path: address.to_string(),
            actual: value.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

/// The property value equals `expected` exactly, with `\"` read as `"`.
///
/// # Errors
///
/// Fails if the property is missing or has another value.
pub fn custom_property_value(
    doc: &Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
    expected: &str,
) -> Result<(), Failure> {
    let expected = expected.replace("\\\"", "\"");
    let value = find_property(doc, namespaces, address)?.text();
    if value == expected {
        Ok(())
    } else {
        Err(Failure::ValueMismatch {
            path: address.to_string(),
            actual: value.to_string(),
            expected,
        })
    }
}

/// Exactly one such property exists and it has no content.
///
/// # Errors
///
/// Fails if the property is missing, repeated, or not empty.
pub fn empty_property(
    doc: &Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
) -> Result<(), Failure> {
    let found = select_properties(doc, namespaces, address)?;
    let [property] = found.as_slice() else {
        return Err(Failure::MissingProperty {
            property: address.to_string(),
        });
    };
    if property.is_empty() {
        Ok(())
    } else {
        Err(Failure::NotEmpty {
            property: address.to_string(),
        })
    }
}

/// The property has (or lacks) a child property.
///
/// # Errors
///
/// Fails with [`Failure::MissingProperty`] or [`Failure::UnexpectedNode`].
pub fn child_property(
    doc: &Document,
    namespaces: &Namespaces,
    address: &PropertyAddress,
    child: &str,
    present: bool,
) -> Result<(), Failure> {
    let address = address.child(child)?;
    let found = !select_properties(doc, namespaces, &address)?.is_empty();
    match (present, found) {
        (true, false) => Err(Failure::MissingProperty {
            property: address.to_string(),
        }),
        (false, true) => Err(Failure::UnexpectedNode {
            path: address.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Text of the first node matching `path`.
///
/// # Errors
///
/// Fails with [`Failure::MissingNode`] if nothing matches.
pub fn item_text(doc: &Document, namespaces: &Namespaces, path: &str) -> Result<String, Failure> {
    ItemPath::parse(path)?
        .select_first(doc, namespaces)
        .map(|e| e.text().to_string())
        .ok_or_else(|| Failure::MissingNode {
            path: path.to_string(),
        })
}

/// The item equals `expected` exactly, after a leading `//` in `expected` is
/// reduced to `/`.
///
/// # Errors
///
/// Fails if the item is missing or has another value.
pub fn item_value(
    doc: &Document,
    namespaces: &Namespaces,
    path: &str,
    expected: &str,
) -> Result<(), Failure> {
    let expected = collapse_leading_slashes(expected);
    let value = item_text(doc, namespaces, path)?;
    if value == expected {
        Ok(())
    } else {
        Err(Failure::ValueMismatch {
            path: path.to_string(),
            actual: value,
            expected: expected.to_string(),
        })
    }
}

/// The item equals one of `expected`, each normalised like [`item_value`].
///
/// # Errors
///
/// Fails if the item is missing or equals none of them.
pub fn item_value_one_of(
    doc: &Document,
    namespaces: &Namespaces,
    path: &str,
    expected: &[&str],
) -> Result<(), Failure> {
    let expected: Vec<&str> = expected.iter().map(|e| collapse_leading_slashes(e)).collect();
    let value = item_text(doc, namespaces, path)?;
    if expected.contains(&value.as_str()) {
        Ok(())
    } else {
        Err(Failure::NotOneOf {
            path: path.to_string(),
            actual: value,
            expected: expected.into_iter().map(str::to_string).collect(),
        })
    }
}

/// The item matches a regular expression, optionally written with `/`
/// delimiters.
///
/// # Errors
///
/// Fails if the item is missing, the pattern is invalid or does not match.
pub fn item_matches(
    doc: &Document,
    namespaces: &Namespaces,
    path: &str,
    pattern: &str,
) -> Result<(), Failure> {
    let value = item_text(doc, namespaces, path)?;
    if delimited(pattern)?.is_match(&value) {
        Ok(())
    } else {
        Err(Failure::PatternMismatch {
            path: path.to_string(),
            actual: value,
            pattern: pattern.to_string(),
        })
    }
}

/// Nothing matches `path`.
///
/// # Errors
///
/// Fails with [`Failure::UnexpectedNode`] on any match.
pub fn item_absent(doc: &Document, namespaces: &Namespaces, path: &str) -> Result<(), Failure> {
    match ItemPath::parse(path)?.select_first(doc, namespaces) {
        Some(_) => Err(Failure::UnexpectedNode {
            path: path.to_string(),
        }),
        None => Ok(()),
    }
}

/// Re-roots an href pattern at `/{dav_root}/`.
///
/// A leading `/`, `^` and any `\` or `/` are dropped from the pattern body
/// first, so `/^\/dav\/files\/x$/` and `dav\/files\/x$` yield the same
/// anchored pattern.
#[must_use]
pub fn reroot_href_pattern(pattern: &str, dav_root: &str) -> String {
    let body = pattern.strip_prefix('/').unwrap_or(pattern);
    let body = body.strip_prefix('^').unwrap_or(body);
    let body = body.trim_start_matches(['\\', '/']);
    let root = dav_root.trim_end_matches('/');
    let mut out = String::from("/^\\/");
    if !root.is_empty() {
        out.push_str(&root.replace('/', "\\/"));
        out.push_str("\\/");
    }
    out.push_str(body);
    if pattern.starts_with('/') {
        out
    } else {
        // undelimited input: keep it undelimited
        out.split_off(1)
    }
}

/// Every share type listed is present in `oc:share-types`.
///
/// Rows hold numeric share types or the names `user`, `group` and `link`.
///
/// # Errors
///
/// Fails with [`Failure::MissingShareType`] for the first missing one.
pub fn share_types<S: AsRef<str>>(
    doc: &Document,
    namespaces: &Namespaces,
    expected: &[S],
) -> Result<(), Failure> {
    let path = ItemPath::parse("//d:prop/oc:share-types/oc:share-type")?;
    let present: Vec<&str> = path
        .select(doc, namespaces)
        .into_iter()
        .map(|e| e.text().trim())
        .collect();

    for share_type in expected {
        let share_type = share_type.as_ref().trim();
        let code = match share_type {
            "user" => "0",
            "group" => "1",
            "link" => "3",
            other => other,
        };
        if !present.contains(&code) {
            return Err(Failure::MissingShareType(share_type.to_string()));
        }
    }
    Ok(())
}

/// Base of a DAV href: everything up to `webdav`, or up to the segment after
/// `files` or `spaces`.
#[must_use]
pub fn base_dav_path(href: &str) -> String {
    let parts: Vec<&str> = href.split('/').collect();
    let position = |name: &str| parts.iter().position(|p| *p == name);
    let keep = position("webdav")
        .map(|i| i + 1)
        .or_else(|| position("files").map(|i| i + 2))
        .or_else(|| position("spaces").map(|i| i + 2))
        .unwrap_or(parts.len())
        .min(parts.len());
    parts[..keep].join("/")
}

/// One expected `(resource, property, value)` of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryProperty {
    /// Resource path below the base DAV path.
    pub resource: String,
    /// Property name, e.g. `oc:fileid`.
    pub property: String,
    /// Expected value.
    pub value: String,
}

/// Each entry has the expected property values.
///
/// The base path is taken from the first `d:href` of the document.
///
/// # Errors
///
/// Fails on the first missing or different value.
pub fn entries_have_properties(
    doc: &Document,
    namespaces: &Namespaces,
    rows: &[EntryProperty],
) -> Result<(), Failure> {
    let href = item_text(doc, namespaces, "//d:href")?;
    let base = base_dav_path(&href);

    for row in rows {
        let path = format!(
            "//d:href[.='{base}{}']/following-sibling::d:propstat//{}",
            row.resource, row.property
        );
        let actual = ItemPath::parse(&path)?
            .select_first(doc, namespaces)
            .map(|e| e.text().to_string())
            .ok_or_else(|| Failure::MissingNode { path: path.clone() })?;
        if actual != row.value {
            return Err(Failure::ValueMismatch {
                path,
                actual,
                expected: row.value.clone(),
            });
        }
    }
    Ok(())
}

/// Some response entry has an href ending in `expected`.
///
/// Each href is percent-decoded and compared from the first occurrence of
/// the expected href's first segment, skipping a match at the very start.
/// With `unescape_space_ids`, `\-`, `\$` and `\!` in `expected` are read as
/// the bare characters.
///
/// # Errors
///
/// Fails with [`Failure::NoMatchingHref`] when no entry matches.
pub fn entry_with_href(
    doc: &Document,
    expected: &str,
    unescape_space_ids: bool,
    user: &str,
) -> Result<(), Failure> {
    let wanted = if unescape_space_ids {
        expected
            .replace("\\-", "-")
            .replace("\\$", "$")
            .replace("\\!", "!")
    } else {
        expected.to_string()
    };
    let first = expected.split('/').next().unwrap_or_default();

    let found = doc
        .root()
        .children()
        .filter(|c| c.is(ns::DAV, "response"))
        .filter_map(|r| r.child(ns::DAV, "href"))
        .any(|href| {
            let decoded = Href::from(href.text().trim()).decoded();
            let parts: Vec<&str> = decoded.split('/').collect();
            match parts.iter().position(|p| *p == first) {
                Some(i) if i > 0 => parts[i..].join("/") == wanted,
                _ => false,
            }
        });

    if found {
        Ok(())
    } else {
        Err(Failure::NoMatchingHref {
            expected: expected.to_string(),
            user: user.to_string(),
        })
    }
}

/// Compiles `^(?:pattern)$`.
fn anchored(pattern: &str) -> Result<Regex, Failure> {
    compile(&format!("^(?:{pattern})$"), pattern)
}

/// Compiles a pattern, stripping `/` delimiters and honouring the `i`, `m`,
/// `s`, `x` and `u` flags.
fn delimited(pattern: &str) -> Result<Regex, Failure> {
    let Some((body, flags)) = pattern
        .strip_prefix('/')
        .and_then(|p| p.rsplit_once('/'))
        .filter(|(_, flags)| flags.chars().all(|c| c.is_ascii_alphabetic()))
    else {
        return compile(pattern, pattern);
    };

    let mut inline = String::new();
    for flag in flags.chars() {
        match flag {
            'i' | 'm' | 's' | 'x' => inline.push(flag),
            // unicode is always on
            'u' => {}
            other => {
                return Err(Failure::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("unsupported flag '{other}'"),
                });
            }
        }
    }
    if inline.is_empty() {
        compile(body, pattern)
    } else {
        compile(&format!("(?{inline}){body}"), pattern)
    }
}

fn compile(regex: &str, pattern: &str) -> Result<Regex, Failure> {
    Regex::new(regex).map_err(|e| Failure::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn collapse_leading_slashes(s: &str) -> &str {
    if s.starts_with("//") { &s[1..] } else { s }
}

#[cfg(test)]
mod tests {
    use davcheck_webdav::Namespace;

    use super::*;

    const LISTING: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:x1="http://whatever.org/ns">
  <d:response>
    <d:href>/remote.php/dav/files/alice/folder/</d:href>
    <d:propstat>
      <d:prop>
        <d:getetag>"5f1a"</d:getetag>
        <oc:permissions>RDNVCK</oc:permissions>
        <oc:share-types>
          <oc:share-type>0</oc:share-type>
          <oc:share-type>3</oc:share-type>
        </oc:share-types>
        <x1:testprop>"quoted" value</x1:testprop>
        <d:lockdiscovery/>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/remote.php/dav/files/alice/folder/C%2B%2B%20file.cpp</d:href>
    <d:propstat>
      <d:prop>
        <d:getetag>"77ab"</d:getetag>
        <oc:permissions>RDNVW</oc:permissions>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

    fn doc() -> Document {
        Document::parse(LISTING).unwrap()
    }

    fn address(s: &str) -> PropertyAddress {
        PropertyAddress::parse(s).unwrap()
    }

    #[test]
    fn finds_properties_of_first_entry() {
        let doc = doc();
        let ns = Namespaces::default();
        let etag = find_property(&doc, &ns, &address("d:getetag")).unwrap();
        assert_eq!(etag.text(), "\"5f1a\"");
        assert!(matches!(
            find_property(&doc, &ns, &address("oc:fileid")),
            Err(Failure::MissingProperty { .. })
        ));
    }

    #[test]
    fn unset_property_of_first_entry_ignores_children() {
        let xml = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:x1="http://whatever.org/ns">
  <d:response>
    <d:href>/remote.php/dav/files/alice/folder/</d:href>
    <d:propstat>
      <d:prop><x1:testprop/></d:prop>
      <d:status>HTTP/1.1 404 Not Found</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/remote.php/dav/files/alice/folder/child.txt</d:href>
    <d:propstat>
      <d:prop><x1:testprop>childvalue</x1:testprop></d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;
        let doc = Document::parse(xml).unwrap();
        let custom: Namespace = "x1='http://whatever.org/ns'".parse().unwrap();
        let ns = Namespaces::default().with(&custom);
        let prop = address("x1:testprop");

        assert!(matches!(
            find_property(&doc, &ns, &prop),
            Err(Failure::MissingProperty { .. })
        ));
        assert!(matches!(
            custom_property_value(&doc, &ns, &prop, "childvalue"),
            Err(Failure::MissingProperty { .. })
        ));
        assert!(property_matches(&doc, &ns, &prop, "childvalue", "childvalue").is_err());
        assert!(property_value_like(&doc, &ns, &prop, "child").is_err());
    }

    #[test]
    fn unbound_namespace_is_a_missing_property() {
        let doc = doc();
        let err = find_property(&doc, &Namespaces::default(), &address("x2:testprop")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot find property \"x2:testprop\"");

        let custom: Namespace = "x2='http://whatever.org/ns'".parse().unwrap();
        let ns = Namespaces::default().with(&custom);
        assert!(find_property(&doc, &ns, &address("x2:testprop")).is_ok());
    }

    #[test]
    fn value_matches_either_pattern() {
        let doc = doc();
        let ns = Namespaces::default();
        let perms = address("oc:permissions");
        assert!(property_matches(&doc, &ns, &perms, "RDNVCK", "RDNVCK").is_ok());
        assert!(property_matches(&doc, &ns, &perms, "RDNV", "RDNVCK").is_ok());
        assert!(property_matches(&doc, &ns, &perms, "R.*", "X").is_ok());
        // anchored: a prefix alone does not match
        let err = property_matches(&doc, &ns, &perms, "RDNV", "S|RDN").unwrap_err();
        assert!(matches!(err, Failure::NotOneOf { .. }));
        assert!(matches!(
            property_matches(&doc, &ns, &perms, "(", "x"),
            Err(Failure::InvalidPattern { .. })
        ));
    }

    #[test]
    fn value_like_accepts_delimited_patterns() {
        let doc = doc();
        let ns = Namespaces::default();
        let etag = address("d:getetag");
        assert!(property_value_like(&doc, &ns, &etag, r#"/^"[0-9a-f]+"$/"#).is_ok());
        assert!(property_value_like(&doc, &ns, &etag, r#"/^"5F1A"$/i"#).is_ok());
        assert!(property_value_like(&doc, &ns, &etag, "^\"[0-9]+\"$").is_err());
    }

    #[test]
    fn delimited_patterns_map_flags() {
        assert!(delimited("/^a.b$/s").unwrap().is_match("a\nb"));
        assert!(delimited("/^b$/m").unwrap().is_match("a\nb"));
        assert!(delimited("/^ü$/iu").unwrap().is_match("Ü"));
        assert!(delimited("/^a b$/x").unwrap().is_match("ab"));
        assert!(matches!(
            delimited("/a/g"),
            Err(Failure::InvalidPattern { .. })
        ));
        // not a flag suffix: the whole text is the pattern
        assert!(delimited("/a/1").unwrap().is_match("x/a/1"));
    }

    #[test]
    fn custom_value_unescapes_quotes() {
        let doc = doc();
        let custom: Namespace = "x1='http://whatever.org/ns'".parse().unwrap();
        let ns = Namespaces::default().with(&custom);
        let prop = address("x1:testprop");
        assert!(custom_property_value(&doc, &ns, &prop, r#"\"quoted\" value"#).is_ok());
        assert!(matches!(
            custom_property_value(&doc, &ns, &prop, "quoted value"),
            Err(Failure::ValueMismatch { .. })
        ));
    }

    #[test]
    fn empty_and_child_properties() {
        let doc = doc();
        let ns = Namespaces::default();
        assert!(empty_property(&doc, &ns, &address("d:lockdiscovery")).is_ok());
        assert!(matches!(
            empty_property(&doc, &ns, &address("oc:share-types")),
            Err(Failure::NotEmpty { .. })
        ));
        // two entries carry it
        assert!(matches!(
            empty_property(&doc, &ns, &address("d:getetag")),
            Err(Failure::MissingProperty { .. })
        ));

        let share_types = address("oc:share-types");
        assert!(child_property(&doc, &ns, &share_types, "oc:share-type", true).is_ok());
        assert!(child_property(&doc, &ns, &share_types, "oc:share-with", false).is_ok());
        assert!(child_property(&doc, &ns, &share_types, "oc:share-type", false).is_err());
    }

    #[test]
    fn item_values() {
        let doc = doc();
        let ns = Namespaces::default();
        let href = "//d:response[1]/d:href";
        assert!(item_value(&doc, &ns, href, "//remote.php/dav/files/alice/folder/").is_ok());
        assert!(item_value(&doc, &ns, href, "/remote.php/dav/files/alice/folder/").is_ok());
        assert!(item_value(&doc, &ns, href, "/remote.php/dav/files/alice/").is_err());
        assert!(matches!(
            item_value(&doc, &ns, "//d:response[5]/d:href", "x"),
            Err(Failure::MissingNode { .. })
        ));

        let etag = "//d:response[2]//d:getetag";
        assert!(item_value_one_of(&doc, &ns, etag, &["\"x\"", "\"77ab\""]).is_ok());
        assert!(item_value_one_of(&doc, &ns, etag, &["\"x\"", "\"y\""]).is_err());

        assert!(item_absent(&doc, &ns, "//oc:fileid").is_ok());
        assert!(matches!(
            item_absent(&doc, &ns, "//d:getetag"),
            Err(Failure::UnexpectedNode { .. })
        ));
    }

    #[test]
    fn href_patterns_are_rerooted() {
        assert_eq!(
            reroot_href_pattern(r"/^\/dav\/files\/alice\/$/", "remote.php"),
            r"/^\/remote.php\/dav\/files\/alice\/$/"
        );
        assert_eq!(
            reroot_href_pattern(r"dav\/files\/alice\/$", ""),
            r"^\/dav\/files\/alice\/$"
        );

        let doc = doc();
        let ns = Namespaces::default();
        let pattern = reroot_href_pattern(r"/^\/dav\/files\/alice\/folder\/$/", "remote.php");
        assert!(item_matches(&doc, &ns, "//d:response[1]/d:href", &pattern).is_ok());
    }

    #[test]
    fn share_types_by_name_or_number() {
        let doc = doc();
        let ns = Namespaces::default();
        assert!(share_types(&doc, &ns, &["user", "3"]).is_ok());
        assert_eq!(
            share_types(&doc, &ns, &["group"]).unwrap_err(),
            Failure::MissingShareType("group".to_string())
        );
    }

    #[test]
    fn base_paths() {
        assert_eq!(
            base_dav_path("/remote.php/webdav/folder/"),
            "/remote.php/webdav"
        );
        assert_eq!(
            base_dav_path("/remote.php/dav/files/alice/folder/"),
            "/remote.php/dav/files/alice"
        );
        assert_eq!(
            base_dav_path("/remote.php/dav/spaces/1$2/folder"),
            "/remote.php/dav/spaces/1$2"
        );
        assert_eq!(base_dav_path("/other/x"), "/other/x");
    }

    #[test]
    fn per_entry_properties() {
        let doc = doc();
        let ns = Namespaces::default();
        let row = |resource: &str, value: &str| EntryProperty {
            resource: resource.to_string(),
            property: "oc:permissions".to_string(),
            value: value.to_string(),
        };
        assert!(entries_have_properties(&doc, &ns, &[row("/folder/", "RDNVCK")]).is_ok());
        assert!(matches!(
            entries_have_properties(&doc, &ns, &[row("/folder/", "RDNVCK"), row("/folder/", "X")]),
            Err(Failure::ValueMismatch { .. })
        ));
        assert!(matches!(
            entries_have_properties(&doc, &ns, &[row("/nope", "X")]),
            Err(Failure::MissingNode { .. })
        ));
    }

    #[test]
    fn entries_by_decoded_href() {
        let doc = doc();
        assert!(entry_with_href(&doc, "dav/files/alice/folder/C++ file.cpp", false, "alice").is_ok());
        assert!(entry_with_href(&doc, "dav/files/alice/folder/", false, "alice").is_ok());
        let err = entry_with_href(&doc, "dav/files/alice/other", false, "alice").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot find any entry having href with value dav/files/alice/other in response to alice"
        );
    }

    #[test]
    fn properties_in_failed_propstats_are_missing() {
        let xml = r#"<d:multistatus xmlns:d="DAV:" xmlns:x1="http://whatever.org/ns">
          <d:response>
            <d:href>/remote.php/dav/files/alice/file.txt</d:href>
            <d:propstat>
              <d:prop><x1:testprop/></d:prop>
              <d:status>HTTP/1.1 404 Not Found</d:status>
            </d:propstat>
          </d:response>
        </d:multistatus>"#;
        let doc = Document::parse(xml).unwrap();
        let custom: Namespace = "x1='http://whatever.org/ns'".parse().unwrap();
        let ns = Namespaces::default().with(&custom);
        let prop = address("x1:testprop");
        assert!(matches!(
            custom_property_value(&doc, &ns, &prop, ""),
            Err(Failure::MissingProperty { .. })
        ));
        assert!(empty_property(&doc, &ns, &prop).is_err());
        // raw item paths still see it
        assert!(item_absent(&doc, &ns, "//x1:testprop").is_err());
    }

    #[test]
    fn space_ids_are_unescaped_when_asked() {
        let xml = r#"<d:multistatus xmlns:d="DAV:"><d:response>
            <d:href>/remote.php/dav/spaces/a-b$c!d/file.txt</d:href>
        </d:response></d:multistatus>"#;
        let doc = Document::parse(xml).unwrap();
        let expected = r"dav/spaces/a\-b\$c\!d/file.txt";
        assert!(entry_with_href(&doc, expected, true, "alice").is_ok());
        assert!(entry_with_href(&doc, expected, false, "alice").is_err());
    }
}
