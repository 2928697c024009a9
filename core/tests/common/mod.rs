// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! Multistatus bodies, scenarios wired to a mock server, and PROPFIND mocks.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{
    Entry, etag_entry, mock_propfind, mock_propfind_once, multistatus, scenario,
    scenario_with_config, table,
};
