// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `WebDAV` client for listing and patching resource properties (RFC 4918).

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod client;
mod config;
mod error;
mod http;
mod request;
mod response;
mod types;
mod xml;

pub use crate::client::{Actor, DavClient, PropertyQuery};
pub use crate::config::{AuthMethod, DavConfig, DavPathVersion};
pub use crate::error::DavError;
pub use crate::request::{PropFindRequest, PropPatchRequest, prop_names};
pub use crate::response::{DavResponse, MultiStatusResponse, PropStat, PropValue, ResponseItem};
pub use crate::types::{Depth, ETag, Href};
pub use crate::xml::{Document, Element, Namespace, NodeId, PropName, ns};
