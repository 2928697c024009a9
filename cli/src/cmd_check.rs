// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use davcheck_core::Scenario;
use davcheck_webdav::{Depth, Namespace, PropName};

use crate::arg::CommonArgs;

/// Checks one property of a resource.
#[derive(Debug, Clone)]
pub struct CmdCheck {
    pub path: String,
    pub user: String,
    pub property: String,
    pub expected: Option<String>,
    pub alternative: Option<String>,
    pub namespace: Option<String>,
    pub like: bool,
}

impl CmdCheck {
    pub const NAME: &str = "check";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check a property value of a resource")
            .long_about(
                "\
Check a property value of a resource. Without EXPECTED only its presence is checked. \
EXPECTED and --alternative are anchored regular expressions after placeholder \
substitution, e.g. %username%; with --like, EXPECTED is an unanchored pattern.",
            )
            .arg(CommonArgs::path())
            .arg(arg!(property: <PROPERTY> "Property to check, e.g. oc:fileid"))
            .arg(arg!(expected: [EXPECTED] "Expected value"))
            .arg(CommonArgs::user(true))
            .arg(
                arg!(-a --alternative <VALUE> "Value accepted instead of the expected one")
                    .requires("expected")
                    .conflicts_with("like"),
            )
            .arg(arg!(--like "Match EXPECTED as an unanchored regular expression").requires("expected"))
            .arg(CommonArgs::namespace())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: CommonArgs::get_path(matches),
            user: CommonArgs::get_user(matches).expect("user is required"),
            property: matches
                .get_one::<String>("property")
                .expect("property is required")
                .clone(),
            expected: matches.get_one("expected").cloned(),
            alternative: matches.get_one("alternative").cloned(),
            namespace: CommonArgs::get_namespace(matches),
            like: matches.get_flag("like"),
        }
    }

    pub async fn run(self, scenario: &mut Scenario) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking property...");
        scenario
            .get_custom_property(
                &self.user,
                &self.property,
                self.namespace.as_deref(),
                &self.path,
            )
            .await?;
        // a bare name was requested under the namespace prefix
        let property = match &self.namespace {
            Some(namespace) => {
                scenario.register_namespace(namespace)?;
                let namespace: Namespace = namespace.parse()?;
                PropName::with_namespace(&self.property, &namespace)?.qualified()
            }
            None => self.property.clone(),
        };

        match (&self.expected, self.like) {
            (None, _) => scenario.response_should_contain_property(&property, None)?,
            (Some(pattern), true) => {
                scenario.single_response_should_contain_property_like(&property, pattern)?;
            }
            (Some(expected), false) => scenario.single_response_should_contain_property_with_value(
                &property,
                expected,
                self.alternative.as_deref(),
                Some(&self.user),
            )?,
        }

        println!("{} {} of {}", "OK".green(), property, self.path);
        Ok(())
    }
}

/// Checks that a listing contains an entry with a given href.
#[derive(Debug, Clone)]
pub struct CmdHref {
    pub path: String,
    pub user: String,
    pub href: String,
    pub depth: Depth,
}

impl CmdHref {
    pub const NAME: &str = "href";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check that a listing contains an entry with the given href")
            .arg(CommonArgs::path())
            .arg(arg!(href: <HREF> "Expected href below the DAV root, e.g. dav/files/%username%/a.txt"))
            .arg(CommonArgs::user(true))
            .arg(
                arg!(-d --depth <DEPTH> "Depth of the listing: 0, 1 or infinity")
                    .value_parser(value_parser!(String))
                    .default_value("1"),
            )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let depth = matches
            .get_one::<String>("depth")
            .map_or(Ok(Depth::One), |d| d.parse::<Depth>())?;
        Ok(Self {
            path: CommonArgs::get_path(matches),
            user: CommonArgs::get_user(matches).expect("user is required"),
            href: matches
                .get_one::<String>("href")
                .expect("href is required")
                .clone(),
            depth,
        })
    }

    pub async fn run(self, scenario: &mut Scenario) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "looking up href...");
        scenario
            .get_properties(&self.user, &self.path, self.depth)
            .await?;
        scenario.entry_with_href_should_exist(&self.href, &self.user)?;
        println!("{} {} found", "OK".green(), self.href);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check() {
        let cmd = Command::new("test").subcommand(CmdCheck::command());
        let matches = cmd
            .try_get_matches_from([
                "test",
                "check",
                "/file.txt",
                "oc:permissions",
                "RDNVW",
                "-u",
                "alice",
                "-a",
                "SRDNVW",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdCheck::NAME).unwrap();
        let parsed = CmdCheck::from(sub_matches);
        assert_eq!(parsed.property, "oc:permissions");
        assert_eq!(parsed.expected.as_deref(), Some("RDNVW"));
        assert_eq!(parsed.alternative.as_deref(), Some("SRDNVW"));
        assert!(!parsed.like);
    }

    #[test]
    fn like_conflicts_with_alternative() {
        let cmd = Command::new("test").subcommand(CmdCheck::command());
        let result = cmd.try_get_matches_from([
            "test", "check", "/f", "oc:id", "1", "-u", "a", "-a", "2", "--like",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_href() {
        let cmd = Command::new("test").subcommand(CmdHref::command());
        let matches = cmd
            .try_get_matches_from(["test", "href", "/", "dav/files/%username%/a.txt", "-u", "alice"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdHref::NAME).unwrap();
        let parsed = CmdHref::from(sub_matches).unwrap();
        assert_eq!(parsed.href, "dav/files/%username%/a.txt");
        assert_eq!(parsed.depth, Depth::One);
    }

    #[test]
    fn rejects_bad_href_depth() {
        let cmd = Command::new("test").subcommand(CmdHref::command());
        let matches = cmd
            .try_get_matches_from(["test", "href", "/", "a", "-u", "alice", "-d", "7"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdHref::NAME).unwrap();
        assert!(CmdHref::from(sub_matches).is_err());
    }
}
