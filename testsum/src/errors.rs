// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use testsum_junit::WriteJunitError;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Documented exit codes for `testsum` failures.
pub enum TestsumExitCode {}

impl TestsumExitCode {
    /// No errors occurred and testsum exited normally.
    pub const OK: i32 = 0;

    /// The execution results could not be read.
    pub const INPUT_READ_FAILED: i32 = 102;

    /// The execution results could not be parsed.
    pub const INPUT_PARSE_FAILED: i32 = 103;

    /// Writing the report failed.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that testsum reports to the user, as opposed to a bug.
#[derive(Debug, Error)]
pub enum ExpectedError {
    #[error("failed to read execution results")]
    InputReadError {
        path: Option<Utf8PathBuf>,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to parse execution results")]
    InputParseError {
        path: Option<Utf8PathBuf>,
        #[source]
        err: serde_path_to_error::Error<serde_json::Error>,
    },
    #[error("failed to create JUnit report directory")]
    OutputDirCreateError {
        dir: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to create JUnit report file")]
    OutputFileCreateError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to write JUnit report")]
    JunitWriteError {
        path: Option<Utf8PathBuf>,
        #[source]
        err: WriteJunitError,
    },
    #[error("failed to flush JUnit report")]
    OutputFlushError {
        path: Option<Utf8PathBuf>,
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::InputReadError { .. } => TestsumExitCode::INPUT_READ_FAILED,
            Self::InputParseError { .. } => TestsumExitCode::INPUT_PARSE_FAILED,
            Self::OutputDirCreateError { .. }
            | Self::OutputFileCreateError { .. }
            | Self::JunitWriteError { .. }
            | Self::OutputFlushError { .. } => TestsumExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr, followed by its chain of causes.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let (heading, source): (String, Option<&(dyn Error + 'static)>) = match self {
            Self::InputReadError { path, err } => (
                format!(
                    "failed to read execution results from {}",
                    input_name(path.as_ref()).style(styles.bold)
                ),
                Some(err),
            ),
            // serde_path_to_error's message includes the path within the document.
            Self::InputParseError { path, err } => (
                format!(
                    "failed to parse execution results from {}: {err}",
                    input_name(path.as_ref()).style(styles.bold)
                ),
                None,
            ),
            Self::OutputDirCreateError { dir, err } => (
                format!(
                    "failed to create JUnit report directory {}",
                    dir.style(styles.bold)
                ),
                Some(err),
            ),
            Self::OutputFileCreateError { path, err } => (
                format!(
                    "failed to create JUnit report file {}",
                    path.style(styles.bold)
                ),
                Some(err),
            ),
            Self::JunitWriteError { path, err } => (
                format!(
                    "failed to write JUnit report to {}",
                    output_name(path.as_ref()).style(styles.bold)
                ),
                err.source(),
            ),
            Self::OutputFlushError { path, err } => (
                format!(
                    "failed to flush JUnit report to {}",
                    output_name(path.as_ref()).style(styles.bold)
                ),
                Some(err),
            ),
        };

        error!("{heading}{}", caused_by(source));
    }
}

fn caused_by(source: Option<&(dyn Error + 'static)>) -> String {
    std::iter::successors(source, |&err| err.source())
        .map(|err| format!("\nCaused by:\n  {err}"))
        .collect()
}

fn input_name(path: Option<&Utf8PathBuf>) -> String {
    match path {
        Some(path) => path.to_string(),
        None => "standard input".to_owned(),
    }
}

fn output_name(path: Option<&Utf8PathBuf>) -> String {
    match path {
        Some(path) => path.to_string(),
        None => "standard output".to_owned(),
    }
}
