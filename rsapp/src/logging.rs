// SPDX-License-Identifier: GPL-3.0-or-later

//! Installs the global log subscriber.
//!
//! Logs always go to stderr so stdout only ever carries help, version or application output.
//! Verbosity is controlled with `<PREFIX>_LOG` (e.g. `RSAPP_LOG=debug`), which takes
//! [`EnvFilter`] directives and defaults to `info`. Events logged under [`NOTICE_TARGET`]
//! and errors are always shown, whatever the filter says.

use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing::{subscriber::SetGlobalDefaultError, Level, Metadata, Subscriber};
use tracing_subscriber::{
    filter::filter_fn, fmt, fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Layer,
};

use crate::app::AppInfo;

/// Target for events that must reach the user regardless of the log filter.
pub const NOTICE_TARGET: &str = "rsapp::notice";

/// Errors that may occur when setting up logging.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Occurs when a global subscriber has already been installed.
    #[error("failed to install log subscriber ({0})")]
    Install(#[from] SetGlobalDefaultError),
}

/// Name of the variable holding the filter directives, e.g. `RSAPP_LOG`.
pub fn env_var(info: &AppInfo) -> String {
    format!("{}_LOG", info.env_prefix())
}

/// Reads the filter from [`env_var`], falling back to `info` when unset or unparsable.
pub fn env_filter(info: &AppInfo) -> EnvFilter {
    EnvFilter::try_from_env(env_var(info)).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Whether an event bypasses the filter.
fn always_shown(metadata: &Metadata<'_>) -> bool {
    metadata.target() == NOTICE_TARGET || *metadata.level() == Level::ERROR
}

/// Builds the subscriber: one layer for filtered logs, one for notices and errors.
pub fn subscriber<W>(
    filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    let logs = fmt::layer()
        .with_writer(writer.clone())
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .with_filter(filter)
        .with_filter(filter_fn(|metadata| !always_shown(metadata)));

    let notices = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .with_filter(filter_fn(always_shown));

    tracing_subscriber::registry().with(logs).with(notices)
}

/// Installs a stderr subscriber configured from the environment as the global default.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init(info: &AppInfo) -> Result<(), LoggingError> {
    let subscriber = subscriber(env_filter(info), io::stderr, io::stderr().is_terminal());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    use rstest::rstest;
    use tracing::{error, info, warn};

    /// Shared buffer standing in for stderr.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn log_with(directives: &str) -> String {
        let captured = Captured::default();
        let subscriber = subscriber(EnvFilter::new(directives), captured.clone(), false);
        tracing::subscriber::with_default(subscriber, || {
            info!(target: NOTICE_TARGET, "notice line");
            info!("info line");
            warn!("warn line");
            error!("error line");
        });
        captured.contents()
    }

    #[test]
    fn env_var_uses_prefix() {
        let info = AppInfo {
            name: "my-app",
            version: "0.0.0",
            description: "",
            homepage: "",
        };
        assert_eq!(env_var(&info), "MY_APP_LOG");
    }

    #[test]
    fn default_level_shows_everything_once() {
        let logs = log_with("info");
        for line in ["notice line", "info line", "warn line", "error line"] {
            assert_eq!(logs.matches(line).count(), 1, "{line} in {logs:?}");
        }
    }

    #[rstest]
    #[case("warn")]
    #[case("error")]
    #[case("off")]
    fn notices_and_errors_survive_quiet_filters(#[case] directives: &str) {
        let logs = log_with(directives);
        assert_eq!(logs.matches("notice line").count(), 1);
        assert_eq!(logs.matches("error line").count(), 1);
        assert!(!logs.contains("info line"));
    }

    #[test]
    fn off_drops_ordinary_warnings() {
        let logs = log_with("off");
        assert!(!logs.contains("warn line"));
    }
}
