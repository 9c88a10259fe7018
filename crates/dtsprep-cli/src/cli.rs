//! Command-line surface

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Parsed command-line flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Report missing files instead of stopping
    pub ignore_errors: bool,
    /// Number of `-v` flags
    pub verbosity: u8,
}

impl CliArgs {
    /// Extract flags from matches produced by [`command`]
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            ignore_errors: matches.get_flag("ignore-errors"),
            verbosity: matches.get_count("verbose"),
        }
    }
}

/// Command definition
#[must_use]
pub fn command() -> Command {
    Command::new("dtsprep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check device-tree sources, rewrite pl.dtsi into mod_pl.dtsi and build the DTB")
        .arg(
            Arg::new("ignore-errors")
                .short('i')
                .long("ignore-errors")
                .action(ArgAction::SetTrue)
                .help("Report missing files and malformed blocks instead of stopping"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase diagnostic logging (repeatable)"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::from_matches(&command().try_get_matches_from(argv).unwrap())
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&["dtsprep"]), CliArgs::default());
    }

    #[test]
    fn ignore_errors_short_and_long() {
        assert!(parse(&["dtsprep", "-i"]).ignore_errors);
        assert!(parse(&["dtsprep", "--ignore-errors"]).ignore_errors);
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["dtsprep", "-vv"]).verbosity, 2);
        assert_eq!(parse(&["dtsprep", "-i", "-v", "-v", "-v"]).verbosity, 3);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(command().try_get_matches_from(["dtsprep", "--force"]).is_err());
    }

    #[test]
    fn command_is_consistent() {
        command().debug_assert();
    }
}
