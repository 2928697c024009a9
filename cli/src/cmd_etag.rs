// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use davcheck_core::{Actors, EtagExpectation, Scenario};
use davcheck_webdav::ETag;

use crate::arg::CommonArgs;

#[derive(Debug, Clone)]
pub struct CmdEtag {
    pub path: String,
    pub user: String,
    pub since: Option<String>,
    pub expectation: EtagExpectation,
}

impl CmdEtag {
    pub const NAME: &str = "etag";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the etag of a resource, or compare it with an earlier one")
            .arg(CommonArgs::path())
            .arg(CommonArgs::user(true))
            .arg(arg!(--since <ETAG> "Etag observed earlier, including its quotes"))
            .arg(
                arg!(--expect <EXPECT> "Whether the etag should differ from --since")
                    .value_parser(["changed", "unchanged"])
                    .default_value("changed")
                    .requires("since"),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let changed = matches
            .get_one::<String>("expect")
            .is_none_or(|e| e == "changed");
        Self {
            path: CommonArgs::get_path(matches),
            user: CommonArgs::get_user(matches).expect("user is required"),
            since: matches.get_one("since").cloned(),
            expectation: EtagExpectation::changed(changed),
        }
    }

    pub async fn run(self, scenario: &mut Scenario) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "looking up etag...");
        match self.since {
            Some(since) => {
                let user = Actors::from_config(scenario.config()).actual_username(&self.user);
                scenario
                    .etags_mut()
                    .store(&user, &self.path, ETag::new(since));
                scenario
                    .etag_should_have_changed(&self.path, &user, self.expectation)
                    .await?;
                println!("{} etag of {} {}", "OK".green(), self.path, self.expectation);
            }
            None => {
                let etag = scenario
                    .store_etag(&self.user, &self.path, None, None)
                    .await?;
                println!("{etag}");
                if !etag.is_valid() {
                    println!("{} not a quoted etag", "Warning:".yellow());
                }
            }
        }
        Ok(())
    }
}
