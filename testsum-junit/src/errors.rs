// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{io, process::ExitStatus};
use thiserror::Error;

/// An error that occurs while writing a JUnit report.
///
/// Returned by [`write`](crate::write), [`Report::serialize`](crate::Report::serialize) and
/// [`Report::to_string`](crate::Report::to_string). The XML declaration may already have been
/// written to the output when this is returned.
#[derive(Debug, Error)]
#[error("failed to write JUnit XML")]
pub struct WriteJunitError {
    #[from]
    inner: quick_xml::Error,
}

/// An error that occurs while looking up the rustc version.
///
/// This never escapes report generation: it is logged and the version falls back to
/// [`UNKNOWN_TOOLCHAIN_VERSION`](crate::UNKNOWN_TOOLCHAIN_VERSION).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolchainLookupError {
    /// The rustc process could not be spawned.
    #[error("error spawning `{command}`")]
    Spawn {
        /// The command that was executed.
        command: String,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The rustc process exited unsuccessfully.
    #[error("`{command}` failed with {status}")]
    Failed {
        /// The command that was executed.
        command: String,

        /// The exit status of the process.
        status: ExitStatus,

        /// Standard error produced by the process, lossily converted to UTF-8.
        stderr: String,
    },
}
