// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgGroup, ArgMatches, Command, arg};
use colored::Colorize;
use davcheck_core::{Actors, Scenario};
use davcheck_webdav::{
    Actor, DavClient, DavResponse, Depth, Namespace, PropertyQuery, prop_names,
};

use crate::arg::CommonArgs;
use crate::table::{PropertyRow, Table};

#[derive(Debug, Clone)]
pub struct CmdPropfind {
    pub path: String,
    pub user: Option<String>,
    pub public: Option<String>,
    pub link_password: Option<String>,
    pub depth: Depth,
    pub properties: Vec<String>,
    pub namespace: Option<String>,
    pub space_id: Option<String>,
    pub raw: bool,
}

impl CmdPropfind {
    pub const NAME: &str = "propfind";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List properties of a resource")
            .arg(CommonArgs::path())
            .arg(CommonArgs::user(false))
            .arg(arg!(--public <TOKEN> "Query through a public link token instead of a user"))
            .arg(
                arg!(--"link-password" <PASSWORD> "Password of the public link")
                    .requires("public"),
            )
            .group(
                ArgGroup::new("actor")
                    .args(["user", "public"])
                    .required(true),
            )
            .arg(
                arg!(-d --depth <DEPTH> "Depth of the listing: 0, 1 or infinity")
                    .value_parser(str::parse::<Depth>)
                    .default_value("1"),
            )
            .arg(
                arg!(-p --property <PROPERTY> "Property to request, all when omitted")
                    .action(clap::ArgAction::Append),
            )
            .arg(CommonArgs::namespace())
            .arg(CommonArgs::space_id())
            .arg(CommonArgs::raw())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: CommonArgs::get_path(matches),
            user: CommonArgs::get_user(matches),
            public: matches.get_one("public").cloned(),
            link_password: matches.get_one("link-password").cloned(),
            depth: matches.get_one("depth").copied().unwrap_or(Depth::One),
            properties: matches
                .get_many::<String>("property")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            namespace: CommonArgs::get_namespace(matches),
            space_id: CommonArgs::get_space_id(matches),
            raw: CommonArgs::get_raw(matches),
        }
    }

    pub async fn run(self, scenario: &mut Scenario) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing properties...");
        let config = scenario.config();
        let actor = match (&self.public, &self.user) {
            (Some(token), _) => Actor::Public {
                token: token.clone(),
                password: self.link_password.clone(),
            },
            (None, Some(user)) => Actors::from_config(config).actor(user)?,
            (None, None) => return Err("either --user or --public is required".into()),
        };
        let space_id = match (&self.space_id, &self.user) {
            (Some(id), _) => Some(id.clone()),
            (None, Some(user)) => Actors::from_config(config).space_id(user),
            (None, None) => None,
        };

        let namespace = self
            .namespace
            .as_deref()
            .map(str::parse::<Namespace>)
            .transpose()?;
        let query = PropertyQuery::new(actor, self.path.as_str())
            .depth(self.depth)
            .properties(prop_names(&self.properties, namespace.as_ref())?)
            .space_id(space_id);

        let client = DavClient::new(config.server.clone())?;
        let response = client.propfind(&query).await?;

        if let Some(namespace) = &self.namespace {
            scenario.register_namespace(namespace)?;
        }
        print_response(scenario, &response, self.raw)?;
        scenario.set_last_response(response);
        Ok(())
    }
}

/// Prints the status line and, for a multistatus, one row per property.
pub fn print_response(
    scenario: &Scenario,
    response: &DavResponse,
    raw: bool,
) -> Result<(), Box<dyn Error>> {
    let status = response.status.to_string();
    if response.status.is_success() {
        println!("{}", status.green());
    } else {
        println!("{}", status.red());
    }

    if raw || response.status.as_u16() != 207 {
        println!("{}", response.body);
        return Ok(());
    }

    let multistatus = response.multistatus()?;
    let rows = PropertyRow::collect(&multistatus, scenario.namespaces());
    Table::new(&rows).write_to(&mut io::stdout())?;
    Ok(())
}
