// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn path() -> Arg {
        arg!(path: <PATH> "Resource path below the user's DAV root")
    }

    pub fn get_path(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("path")
            .expect("path is required")
            .clone()
    }

    pub fn user(required: bool) -> Arg {
        arg!(-u --user <USER> "User to act as, `%admin%` for the configured admin")
            .required(required)
    }

    pub fn get_user(matches: &ArgMatches) -> Option<String> {
        matches.get_one("user").cloned()
    }

    pub fn namespace() -> Arg {
        arg!(-n --namespace <NAMESPACE> "Extra namespace binding, e.g. x1='http://whatever.org/ns'")
    }

    pub fn get_namespace(matches: &ArgMatches) -> Option<String> {
        matches.get_one("namespace").cloned()
    }

    pub fn space_id() -> Arg {
        arg!(--"space-id" <ID> "Space id, overriding the configured one")
    }

    pub fn get_space_id(matches: &ArgMatches) -> Option<String> {
        matches.get_one("space-id").cloned()
    }

    pub fn raw() -> Arg {
        arg!(--raw "Print the response body as received")
    }

    pub fn get_raw(matches: &ArgMatches) -> bool {
        matches.get_flag("raw")
    }
}
