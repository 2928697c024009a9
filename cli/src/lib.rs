// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command line front end of davcheck.

mod arg;
mod cli;
mod cmd_check;
mod cmd_etag;
mod cmd_propfind;
mod cmd_proppatch;
mod config;
mod table;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_check::{CmdCheck, CmdHref};
pub use crate::cmd_etag::CmdEtag;
pub use crate::cmd_propfind::CmdPropfind;
pub use crate::cmd_proppatch::CmdProppatch;
pub use crate::config::parse_config;
