// SPDX-License-Identifier: GPL-3.0-or-later

//! Library for rsapp-cli.
//! A starting point for command line applications: mode selection, help and version output.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod app;
pub mod dispatch;
pub mod grammar;
pub mod logging;
pub mod mode;
