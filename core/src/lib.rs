// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Checks of `WebDAV` property responses: values, hrefs, share types and
//! etag changes across requests.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc, clippy::too_many_arguments)]

mod actors;
mod address;
pub mod check;
mod config;
mod error;
mod etag;
mod namespaces;
mod path;
mod scenario;
mod share;
pub mod substitute;
mod table;

pub use crate::actors::{ADMIN, Actors};
pub use crate::address::PropertyAddress;
pub use crate::config::{APP_NAME, Config, SharingConfig, UserConfig};
pub use crate::error::{Error, Failure};
pub use crate::etag::{EtagExpectation, EtagStore};
pub use crate::namespaces::Namespaces;
pub use crate::path::{ItemPath, string_value};
pub use crate::scenario::Scenario;
pub use crate::share::ShareTokens;
pub use crate::substitute::Substitutions;
pub use crate::table::Table;
