// SPDX-License-Identifier: GPL-3.0-or-later

//! The top level behavior selected for one invocation.

use std::fmt;

/// What the program does once arguments have been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Run the application proper.
    Run,

    /// Print the name and version.
    Version,

    /// Print the generated help page. Selected when no arguments are given.
    #[default]
    Help,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Run => "run",
            Mode::Version => "version",
            Mode::Help => "help",
        })
    }
}
