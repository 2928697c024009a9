// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fmt;

use davcheck_webdav::ETag;

use crate::error::Failure;

/// Whether an etag is expected to differ from its stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtagExpectation {
    /// The resource was modified.
    Changed,
    /// The resource was left alone.
    Unchanged,
}

impl EtagExpectation {
    /// `Changed` for `true`.
    #[must_use]
    pub const fn changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }
}

impl fmt::Display for EtagExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed => write!(f, "should have changed"),
            Self::Unchanged => write!(f, "should not have changed"),
        }
    }
}

/// Etags observed during a scenario, by user and path.
#[derive(Debug, Clone, Default)]
pub struct EtagStore {
    etags: HashMap<String, HashMap<String, ETag>>,
}

impl EtagStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an etag, replacing the previous one for the key.
    pub fn store(&mut self, user: &str, path: &str, etag: ETag) {
        tracing::debug!(user, path, %etag, "storing etag");
        self.etags
            .entry(user.to_string())
            .or_default()
            .insert(path.to_string(), etag);
    }

    /// The stored etag.
    ///
    /// # Errors
    ///
    /// Fails with [`Failure::NoStoredEtags`] if nothing was stored for the
    /// user, or [`Failure::NoStoredEtag`] if nothing was stored for the path.
    pub fn get(&self, user: &str, path: &str) -> Result<&ETag, Failure> {
        let by_path = self.etags.get(user).ok_or_else(|| Failure::NoStoredEtags {
            user: user.to_string(),
            path: path.to_string(),
        })?;
        by_path.get(path).ok_or_else(|| Failure::NoStoredEtag {
            user: user.to_string(),
            path: path.to_string(),
        })
    }

    /// The stored etag, which must not be empty.
    ///
    /// # Errors
    ///
    /// As [`Self::get`], or [`Failure::EmptyStoredEtag`].
    pub fn get_non_empty(&self, user: &str, path: &str) -> Result<&ETag, Failure> {
        let etag = self.get(user, path)?;
        if etag.is_empty() {
            return Err(Failure::EmptyStoredEtag {
                user: user.to_string(),
                path: path.to_string(),
            });
        }
        Ok(etag)
    }

    /// Compares a current etag with the stored one.
    ///
    /// # Errors
    ///
    /// Fails if nothing is stored or the expectation does not hold.
    pub fn check(
        &self,
        user: &str,
        path: &str,
        current: &ETag,
        expectation: EtagExpectation,
    ) -> Result<(), Failure> {
        let stored = self.get(user, path)?;
        let changed = stored != current;
        match (expectation, changed) {
            (EtagExpectation::Unchanged, true) => Err(Failure::EtagChanged {
                user: user.to_string(),
                path: path.to_string(),
                stored: stored.to_string(),
                current: current.to_string(),
            }),
            (EtagExpectation::Changed, false) => Err(Failure::EtagUnchanged {
                user: user.to_string(),
                path: path.to_string(),
                stored: stored.to_string(),
                current: current.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Compares many current etags, reporting every violation at once.
    ///
    /// Each item is `(user, path, current etag)`.
    ///
    /// # Errors
    ///
    /// Fails on the first missing stored etag, or with
    /// [`Failure::EtagViolations`] listing all violations.
    pub fn check_all<'a, I>(&self, items: I, expectation: EtagExpectation) -> Result<(), Failure>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a ETag)>,
    {
        let mut violations = Vec::new();
        for (user, path, current) in items {
            let stored = self.get(user, path)?;
            match (expectation, stored != current) {
                (EtagExpectation::Unchanged, true) => violations.push(format!(
                    "The etag '{stored}' of element '{path}' of user '{user}' changed to '{current}'."
                )),
                (EtagExpectation::Changed, false) => violations.push(format!(
                    "The etag '{stored}' of element '{path}' of user '{user}' did not change."
                )),
                _ => {}
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Failure::EtagViolations(violations))
        }
    }
}
