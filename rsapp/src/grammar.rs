// SPDX-License-Identifier: GPL-3.0-or-later

//! Defines the accepted command line forms and turns them into a [`Mode`].
//!
//! Exactly one of `run`, `-h`/`--help` or `-v`/`--version` may be given. clap's own help
//! and version handling is disabled so the dispatcher decides where that output goes.

use std::ffi::OsString;

use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::{app::AppInfo, mode::Mode};

/// Layout of the generated help page. The title line is `<name> <version>`.
const HELP_TEMPLATE: &str = "\
{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}";

/// Defines command line arguments.
#[derive(Parser, Debug)]
#[command(name = "rsapp")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
#[command(args_conflicts_with_subcommands = true)]
#[command(group(
    ArgGroup::new("info")
        .args(["help", "version"])
))]
struct Grammar {
    /// Selected subcommand, if any.
    #[command(subcommand)]
    command: Option<Command>,

    /// Print this help message and exit
    #[arg(short, long)]
    help: bool,

    /// Show version information and exit
    #[arg(short, long)]
    version: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the application
    #[command(disable_help_flag = true)]
    Run,
}

impl From<Grammar> for Mode {
    fn from(grammar: Grammar) -> Self {
        match grammar {
            Grammar {
                command: Some(Command::Run),
                ..
            } => Mode::Run,
            Grammar { version: true, .. } => Mode::Version,
            _ => Mode::Help,
        }
    }
}

/// Builds the clap command for the given application.
pub fn command(info: &AppInfo) -> clap::Command {
    Grammar::command()
        .name(info.name)
        .bin_name(info.name)
        .version(info.version)
        .about(info.description)
        .override_usage(format!("{0} run\n       {0} [-h | -v]", info.name))
        .help_template(HELP_TEMPLATE)
}

/// Parses a full argument vector, program name included.
///
/// # Errors
///
/// Returns the clap error if the arguments match none of the accepted forms.
pub fn parse<I, T>(info: &AppInfo, args: I) -> Result<Mode, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(info).try_get_matches_from(args)?;
    let grammar = Grammar::from_arg_matches(&matches)?;
    Ok(grammar.into())
}

/// Renders the help page, without trailing whitespace.
pub fn usage(info: &AppInfo) -> String {
    command(info).render_help().to_string().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const INFO: AppInfo = AppInfo {
        name: "demo",
        version: "1.2.3",
        description: "Demo application",
        homepage: "https://example.com/demo",
    };

    #[test]
    fn verify_cli() {
        command(&INFO).debug_assert();
    }

    #[rstest]
    #[case(&["demo", "run"], Mode::Run)]
    #[case(&["demo"], Mode::Help)]
    #[case(&["demo", "-h"], Mode::Help)]
    #[case(&["demo", "--help"], Mode::Help)]
    #[case(&["demo", "-v"], Mode::Version)]
    #[case(&["demo", "--version"], Mode::Version)]
    fn resolves_mode(#[case] args: &[&str], #[case] expected: Mode) {
        let mode = parse(&INFO, args.iter().copied()).unwrap();
        assert_eq!(mode, expected);
    }

    #[rstest]
    #[case(&["demo", "--bogus"])]
    #[case(&["demo", "-x"])]
    #[case(&["demo", "bogus"])]
    #[case(&["demo", "help"])]
    #[case(&["demo", "run", "extra"])]
    #[case(&["demo", "run", "-v"])]
    #[case(&["demo", "run", "--help"])]
    #[case(&["demo", "-v", "run"])]
    #[case(&["demo", "-h", "-v"])]
    fn rejects_anything_else(#[case] args: &[&str]) {
        assert!(parse(&INFO, args.iter().copied()).is_err());
    }

    #[test]
    fn usage_lists_every_form() {
        let usage = usage(&INFO);
        assert!(usage.starts_with("demo 1.2.3\nDemo application"));
        assert!(usage.contains("Usage: demo run\n       demo [-h | -v]"));
        assert!(usage.contains("-h, --help"));
        assert!(usage.contains("-v, --version"));
        assert!(usage.contains("Print this help message and exit"));
        assert!(usage.contains("Show version information and exit"));
    }
}
