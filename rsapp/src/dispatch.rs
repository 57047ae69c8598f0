// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns the process arguments into a [`Mode`] and produces its output.

use std::{
    error::Error as StdError,
    ffi::OsString,
    io::{self, Write},
};

use thiserror::Error;
use tracing::{debug, info, span, Level};

use crate::{app::AppInfo, grammar, logging::NOTICE_TARGET, mode::Mode};

/// Error returned by the application behavior behind [`Mode::Run`].
pub type RunError = Box<dyn StdError + Send + Sync>;

/// Errors that may occur when dispatching.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Occurs when the arguments match none of the accepted forms.
    ///
    /// The diagnostics and help page have already been written when this is returned.
    #[error("invalid arguments ({0})")]
    InvalidArguments(#[source] clap::Error),

    /// Occurs when writing output fails.
    #[error(transparent)]
    Output(#[from] io::Error),

    /// Occurs when the application behavior fails.
    #[error("application failed ({0})")]
    Run(#[source] RunError),
}

/// Selects and performs the behavior for one invocation.
pub struct Dispatcher {
    /// Identity used in the banner, version line and help page.
    info: AppInfo,
}

impl Dispatcher {
    /// Creates a dispatcher for the given application.
    pub fn new(info: AppInfo) -> Self {
        Self { info }
    }

    /// Logs the two line welcome banner. It is shown whatever the log filter.
    pub fn banner(&self) {
        info!(target: NOTICE_TARGET, "Welcome to {}!", self.info.name);
        info!(target: NOTICE_TARGET, "Please visit us at {}", self.info.homepage);
    }

    /// Runs one invocation.
    ///
    /// # Arguments
    ///
    /// * `args` - The full argument vector, program name first.
    /// * `out` - Receives help, version and application output. Generally, stdout.
    /// * `err` - Receives diagnostics when the arguments are invalid. Generally, stderr.
    /// * `run` - The application behavior, called only for [`Mode::Run`].
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, if writing fails, or if `run` fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rsapp::{app::AppInfo, dispatch::Dispatcher, mode::Mode};
    ///
    /// let info = AppInfo {
    ///     name: "demo",
    ///     version: "1.0.0",
    ///     description: "Demo",
    ///     homepage: "https://example.com",
    /// };
    ///
    /// let mut out = Vec::new();
    /// let mode = Dispatcher::new(info)
    ///     .dispatch(["demo", "-v"], &mut out, &mut std::io::sink(), |_| Ok(()))
    ///     .unwrap();
    ///
    /// assert_eq!(mode, Mode::Version);
    /// assert_eq!(out, b"demo 1.0.0\n");
    /// ```
    pub fn dispatch<I, T, R>(
        &self,
        args: I,
        out: &mut impl Write,
        err: &mut impl Write,
        run: R,
    ) -> Result<Mode, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
        R: FnOnce(&mut dyn Write) -> Result<(), RunError>,
    {
        let _span = span!(Level::DEBUG, "dispatch").entered();

        self.banner();

        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = args
            .first()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.info.name.to_string());

        let mode = match grammar::parse(&self.info, args) {
            Ok(mode) => mode,
            Err(e) => {
                debug!(error = %e, "argument parsing failed");
                self.report_invalid(&program, err)?;
                return Err(DispatchError::InvalidArguments(e));
            }
        };
        debug!(%mode, "resolved mode");

        match mode {
            Mode::Run => run(out).map_err(DispatchError::Run)?,
            Mode::Version => writeln!(out, "{} {}", self.info.name, self.info.version)?,
            Mode::Help => writeln!(out, "{}", grammar::usage(&self.info))?,
        }
        out.flush()?;

        Ok(mode)
    }

    /// Writes the diagnostics for arguments that failed to parse.
    fn report_invalid(&self, program: &str, err: &mut impl Write) -> io::Result<()> {
        writeln!(err, "Invalid arguments")?;
        writeln!(err, "Try '{program} --help' for more information")?;
        writeln!(err, "{}", grammar::usage(&self.info))?;
        err.flush()
    }
}
