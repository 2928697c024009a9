// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use davcheck_core::{APP_NAME, Scenario};
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_check::{CmdCheck, CmdHref};
use crate::cmd_etag::CmdEtag;
use crate::cmd_propfind::CmdPropfind;
use crate::cmd_proppatch::CmdProppatch;
use crate::config::parse_config;

const DAVCHECK_LOG_ENV: &str = "DAVCHECK_LOG";

/// Run the davcheck command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("{} {}", "Error:".red(), e);
            std::process::exit(2);
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(DAVCHECK_LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Log requests and responses
    pub verbose: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Query WebDAV properties and check them against expectations.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $DAVCHECK_CONFIG, then \
$XDG_CONFIG_HOME/davcheck/config.toml on Linux and MacOS, \
%APPDATA%/davcheck/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(
                arg!(-v --verbose "Log requests and responses, unless DAVCHECK_LOG is set")
                    .global(true),
            )
            .subcommand(CmdPropfind::command())
            .subcommand(CmdProppatch::command())
            .subcommand(CmdCheck::command())
            .subcommand(CmdHref::command())
            .subcommand(CmdEtag::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdPropfind::NAME, matches)) => Propfind(CmdPropfind::from(matches)),
            Some((CmdProppatch::NAME, matches)) => Proppatch(CmdProppatch::from(matches)),
            Some((CmdCheck::NAME, matches)) => Check(CmdCheck::from(matches)),
            Some((CmdHref::NAME, matches)) => Href(CmdHref::from(matches)?),
            Some((CmdEtag::NAME, matches)) => Etag(CmdEtag::from(matches)),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        let verbose = matches.get_flag("verbose");
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List properties of a resource
    Propfind(CmdPropfind),

    /// Set properties of a resource
    Proppatch(CmdProppatch),

    /// Check a property value
    Check(CmdCheck),

    /// Look up an entry by href
    Href(CmdHref),

    /// Print or compare an etag
    Etag(CmdEtag),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Propfind(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            Proppatch(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            Check(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            Href(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            Etag(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Scenario) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut scenario = Scenario::new(config)?;
        f(&mut scenario).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use davcheck_webdav::Depth;

    #[test]
    fn test_parse_config() {
        let args = vec!["test", "-c", "/tmp/config.toml", "etag", "/a", "-u", "alice"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Etag(_)));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = vec!["test", "etag", "/a", "-u", "alice", "-v", "-c", "/tmp/c.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(vec!["test"]).is_err());
    }

    #[test]
    fn test_parse_propfind() {
        let args = vec!["test", "propfind", "/folder", "-u", "alice", "-d", "infinity"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Propfind(cmd) => {
                assert_eq!(cmd.path, "/folder");
                assert_eq!(cmd.depth, Depth::Infinity);
            }
            _ => panic!("Expected Propfind command"),
        }
    }

    #[test]
    fn test_parse_ls_alias() {
        let cli = Cli::try_parse_from(vec!["test", "ls", "/", "-u", "alice"]).unwrap();
        assert!(matches!(cli.command, Commands::Propfind(_)));
    }

    #[test]
    fn test_parse_proppatch() {
        let args = vec!["test", "set", "/f", "-u", "alice", "-s", "oc:favorite=1"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Proppatch(_)));
    }

    #[test]
    fn test_parse_check() {
        let args = vec!["test", "check", "/f", "d:getetag", "-u", "alice"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Check(cmd) => {
                assert_eq!(cmd.property, "d:getetag");
                assert!(cmd.expected.is_none());
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_parse_href() {
        let args = vec!["test", "href", "/", "dav/files/alice/", "-u", "alice"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Href(_)));
    }
}
