// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Convert structured test execution results into JUnit XML reports.
//!
//! `testsum junit` reads an execution summary as JSON and writes one `<testsuite>` per package.
//! The report itself is produced by the [`testsum_junit`] crate.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{Color, LOG_ENV, OutputContext, OutputWriter, StderrStyles};
