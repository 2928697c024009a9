// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgAction, ArgMatches, Command, arg};
use colored::Colorize;
use davcheck_core::{Scenario, Table};

use crate::arg::CommonArgs;
use crate::cmd_propfind::print_response;

#[derive(Debug, Clone)]
pub struct CmdProppatch {
    pub path: String,
    pub user: String,
    pub set: Vec<(String, String)>,
    pub namespace: Option<String>,
    pub raw: bool,
}

impl CmdProppatch {
    pub const NAME: &str = "proppatch";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("set")
            .about("Set properties of a resource, expecting 207 Multi-Status")
            .arg(CommonArgs::path())
            .arg(CommonArgs::user(true))
            .arg(
                arg!(-s --set <ASSIGNMENT> "Property to set, as NAME=VALUE")
                    .value_parser(parse_assignment)
                    .action(ArgAction::Append)
                    .required(true),
            )
            .arg(CommonArgs::namespace())
            .arg(CommonArgs::raw())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: CommonArgs::get_path(matches),
            user: CommonArgs::get_user(matches).expect("user is required"),
            set: matches
                .get_many::<(String, String)>("set")
                .expect("set is required")
                .cloned()
                .collect(),
            namespace: CommonArgs::get_namespace(matches),
            raw: CommonArgs::get_raw(matches),
        }
    }

    pub async fn run(self, scenario: &mut Scenario) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "setting properties...");
        if let [(name, value)] = self.set.as_slice() {
            scenario
                .set_property(
                    &self.user,
                    name,
                    self.namespace.as_deref(),
                    &self.path,
                    value,
                )
                .await?;
        } else {
            let table = Table::new(
                std::iter::once(["propertyName".to_string(), "propertyValue".to_string()])
                    .chain(self.set.iter().map(|(n, v)| [n.clone(), v.clone()])),
            )?;
            if self.namespace.is_some() {
                tracing::warn!("--namespace only applies to a single assignment");
            }
            scenario
                .has_set_properties(&self.user, &self.path, &table)
                .await?;
            println!("{} {} properties set", "OK".green(), self.set.len());
            return Ok(());
        }

        print_response(scenario, scenario.last_response()?, self.raw)?;
        scenario.status_should_be(207)?;
        Ok(())
    }
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty property name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
