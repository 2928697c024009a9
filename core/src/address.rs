// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::error::Failure;
use crate::path::ItemPath;

/// Location of a property inside a `d:prop` container.
///
/// Segments are `prefix:local` names separated by `/`; a bare name is taken
/// from the `DAV:` namespace. The last segment is the property itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyAddress {
    segments: Vec<String>,
}

impl PropertyAddress {
    /// Parses `oc:share-types/oc:share-type` style addresses.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidPath`] for empty addresses or segments.
    pub fn parse(address: &str) -> Result<Self, Failure> {
        let invalid = |reason: &str| Failure::InvalidPath {
            path: address.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = address.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(invalid("empty property address"));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            let segment = segment.trim();
            let qualified = match segment.split_once(':') {
                Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                    segment.to_string()
                }
                Some(_) => return Err(invalid("empty prefix or local name")),
                None if segment.is_empty() => return Err(invalid("empty segment")),
                None => format!("d:{segment}"),
            };
            segments.push(qualified);
        }
        Ok(Self { segments })
    }

    /// The leaf `prefix:local` name.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Local name of the leaf.
    #[must_use]
    pub fn leaf_local(&self) -> &str {
        let leaf = self.leaf();
        leaf.split_once(':').map_or(leaf, |(_, local)| local)
    }

    /// Segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Address of a property nested under this one.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidPath`] if `name` is not a valid segment.
    pub fn child(&self, name: &str) -> Result<Self, Failure> {
        let child = Self::parse(name)?;
        let mut segments = self.segments.clone();
        segments.extend(child.segments);
        Ok(Self { segments })
    }

    /// The `//d:prop/...` path selecting this property.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::InvalidPath`] if a segment is not a valid name.
    pub fn to_path(&self) -> Result<ItemPath, Failure> {
        ItemPath::parse(&format!("//d:prop/{}", self.segments.join("/")))
    }
}

impl FromStr for PropertyAddress {
    type Err = Failure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_are_dav() {
        let address = PropertyAddress::parse("getetag").unwrap();
        assert_eq!(address.leaf(), "d:getetag");
        assert_eq!(address.leaf_local(), "getetag");
        assert_eq!(address.to_path().unwrap().as_str(), "//d:prop/d:getetag");
    }

    #[test]
    fn nested_addresses() {
        let address = PropertyAddress::parse("oc:share-types").unwrap();
        let child = address.child("oc:share-type").unwrap();
        assert_eq!(child.to_string(), "oc:share-types/oc:share-type");
        assert_eq!(child.leaf(), "oc:share-type");
        assert_eq!(child.segments().len(), 2);
    }

    #[test]
    fn invalid_addresses() {
        assert!(PropertyAddress::parse("").is_err());
        assert!(PropertyAddress::parse("oc:").is_err());
        assert!(PropertyAddress::parse("a//b").is_err());
    }
}
