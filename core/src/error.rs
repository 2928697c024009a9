// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use davcheck_webdav::DavError;

/// A failed check.
///
/// Every variant ends the current scenario only; batch checks collect their
/// violations into a single failure.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// No node matched a path.
    #[error("Cannot find item with xpath \"{path}\"")]
    MissingNode {
        /// The path that was evaluated.
        path: String,
    },

    /// A property is not in the response.
    #[error("Cannot find property \"{property}\"")]
    MissingProperty {
        /// The property address.
        property: String,
    },

    /// A node exists that should not.
    #[error("Found item with xpath \"{path}\" but it should not exist")]
    UnexpectedNode {
        /// The path that matched.
        path: String,
    },

    /// A value differs from the single expected value.
    #[error("item \"{path}\" found with value \"{actual}\", expected \"{expected}\"")]
    ValueMismatch {
        /// Path or property address.
        path: String,
        /// Value found.
        actual: String,
        /// Value expected.
        expected: String,
    },

    /// A value is none of the acceptable values or patterns.
    #[error("Property \"{path}\" found with value \"{actual}\", expected {}", quoted_alternatives(.expected))]
    NotOneOf {
        /// Path or property address.
        path: String,
        /// Value found.
        actual: String,
        /// Acceptable values or patterns.
        expected: Vec<String>,
    },

    /// A value does not match a regular expression.
    #[error("item \"{path}\" found with value \"{actual}\", expected to match regex pattern: \"{pattern}\"")]
    PatternMismatch {
        /// Path or property address.
        path: String,
        /// Value found.
        actual: String,
        /// The pattern.
        pattern: String,
    },

    /// A pattern is not a valid regular expression.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A path or property address could not be parsed.
    #[error("invalid path \"{path}\": {reason}")]
    InvalidPath {
        /// The path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A property has content but should be empty.
    #[error("Property \"{property}\" is not empty")]
    NotEmpty {
        /// The property address.
        property: String,
    },

    /// No response entry has the expected href.
    #[error("Cannot find any entry having href with value {expected} in response to {user}")]
    NoMatchingHref {
        /// The expected href.
        expected: String,
        /// Who made the request.
        user: String,
    },

    /// A share type is missing from `oc:share-types`.
    #[error("cannot find share-type '{0}'")]
    MissingShareType(String),

    /// No etag was stored for the user at all.
    #[error(
        "Trying to check etag of element {path} of user {user} but the user does not have any stored etags"
    )]
    NoStoredEtags {
        /// The user.
        user: String,
        /// The element.
        path: String,
    },

    /// No etag was stored for this element.
    #[error(
        "Trying to check etag of element {path} of user {user} but the user does not have a stored etag for the element"
    )]
    NoStoredEtag {
        /// The user.
        user: String,
        /// The element.
        path: String,
    },

    /// An etag was stored but is empty.
    #[error("Expected stored etag of element {path} of user {user} to be some string but found none")]
    EmptyStoredEtag {
        /// The user.
        user: String,
        /// The element.
        path: String,
    },

    /// The etag changed but should not have.
    #[error(
        "The etag of element '{path}' of user '{user}' was not expected to change. The stored etag was '{stored}' but got '{current}' from the response"
    )]
    EtagChanged {
        /// The user.
        user: String,
        /// The element.
        path: String,
        /// Stored value.
        stored: String,
        /// Current value.
        current: String,
    },

    /// The etag did not change but should have.
    #[error(
        "The etag of element '{path}' of user '{user}' was expected to change. The stored etag was '{stored}' and also got '{current}' from the response"
    )]
    EtagUnchanged {
        /// The user.
        user: String,
        /// The element.
        path: String,
        /// Stored value.
        stored: String,
        /// Current value.
        current: String,
    },

    /// Aggregated etag violations of a batch check, one line each.
    #[error("{}", .0.join("\n"))]
    EtagViolations(Vec<String>),

    /// The response has no valid etag.
    #[error("getetag not found in response or not valid: {0:?}")]
    InvalidEtag(Option<String>),

    /// The HTTP status differs from the expected one.
    #[error("HTTP status code {actual} is not the expected value {expected}")]
    Status {
        /// Expected status.
        expected: u16,
        /// Actual status.
        actual: u16,
    },

    /// No request has been made yet.
    #[error("no response to check, make a request first")]
    NoResponse,

    /// A table has the wrong shape.
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

fn quoted_alternatives(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Errors of scenario operations.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be made.
    #[error(transparent)]
    Dav(#[from] DavError),

    /// A check failed.
    #[error(transparent)]
    Failure(#[from] Failure),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
