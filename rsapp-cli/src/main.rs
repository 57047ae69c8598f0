// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line interface for rsapp.
//! A starting point for command line applications.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use rsapp::{
    dispatch::{DispatchError, Dispatcher, RunError},
    logging,
};

use tracing::{debug, error};

use std::{
    env,
    io::{self, Write},
    process,
};

fn main() {
    let info = rsapp::app_info!();

    if let Err(e) = logging::init(&info) {
        eprintln!("{e}");
    }

    let result = Dispatcher::new(info).dispatch(
        env::args_os(),
        &mut io::stdout(),
        &mut io::stderr(),
        run,
    );

    match result {
        Ok(_) => {}
        Err(DispatchError::InvalidArguments(_)) => process::exit(1),
        Err(e) => {
            error!(error = format!("{}", e), "dispatch failed");
            process::exit(1);
        }
    }
}

/// The application itself. Replace the body with real behavior.
fn run(_output: &mut dyn Write) -> Result<(), RunError> {
    debug!("nothing to run yet");
    Ok(())
}
