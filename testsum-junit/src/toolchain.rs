// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::ToolchainLookupError;
use std::{borrow::Cow, path::PathBuf};
use tracing::{debug, trace, warn};

/// The environment variable that overrides the toolchain version recorded in reports.
///
/// If set, its value is used verbatim and rustc is not executed.
pub static TOOLCHAIN_VERSION_ENV: &str = "TESTSUM_RUSTC_VERSION";

/// The toolchain version recorded when rustc could not be queried.
pub static UNKNOWN_TOOLCHAIN_VERSION: &str = "unknown";

static RUSTC_VERSION_PREFIX: &str = "rustc ";

/// Returns the version of the rustc that tests are built with, as reported by `rustc --version`.
///
/// This is not necessarily the version testsum itself was built with. The binary is taken from
/// the `RUSTC` environment variable, defaulting to `rustc` on `PATH`. To skip executing rustc,
/// set [`TOOLCHAIN_VERSION_ENV`].
///
/// Never fails: if rustc cannot be executed, a warning is logged and
/// [`UNKNOWN_TOOLCHAIN_VERSION`] is returned.
pub fn resolve_toolchain_version() -> String {
    let version_override = std::env::var_os(TOOLCHAIN_VERSION_ENV)
        .map(|version| version.to_string_lossy().into_owned());
    resolve_toolchain_version_with(version_override, rustc_path())
}

/// Like [`resolve_toolchain_version`], but with the override and rustc binary passed in rather
/// than read from the environment.
pub fn resolve_toolchain_version_with(
    version_override: Option<String>,
    rustc_path: impl Into<PathBuf>,
) -> String {
    if let Some(version) = version_override {
        return version;
    }

    let cli = RustcCli::version(rustc_path);
    match cli.read() {
        Ok(stdout) => parse_rustc_version(&String::from_utf8_lossy(&stdout)),
        Err(error) => {
            warn!("failed to look up rustc version for JUnit XML: {error}");
            UNKNOWN_TOOLCHAIN_VERSION.to_owned()
        }
    }
}

/// Returns the rustc binary to query: `RUSTC` if set, otherwise `rustc`.
pub fn rustc_path() -> PathBuf {
    match std::env::var_os("RUSTC") {
        Some(rustc_path) => PathBuf::from(rustc_path),
        None => PathBuf::from("rustc"),
    }
}

fn parse_rustc_version(stdout: &str) -> String {
    let trimmed = stdout.trim();
    trimmed
        .strip_prefix(RUSTC_VERSION_PREFIX)
        .unwrap_or(trimmed)
        .to_owned()
}

/// A rustc CLI call.
#[derive(Clone, Debug)]
struct RustcCli<'a> {
    rustc_path: PathBuf,
    args: Vec<Cow<'a, str>>,
}

impl<'a> RustcCli<'a> {
    fn new(rustc_path: impl Into<PathBuf>) -> Self {
        Self {
            rustc_path: rustc_path.into(),
            args: vec![],
        }
    }

    /// `rustc --version`.
    fn version(rustc_path: impl Into<PathBuf>) -> Self {
        let mut cli = Self::new(rustc_path);
        cli.add_arg("--version");
        cli
    }

    fn add_arg(&mut self, arg: impl Into<Cow<'a, str>>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    fn to_expression(&self) -> duct::Expression {
        // Passed as a string so that a bare program name is looked up on PATH.
        duct::cmd(
            self.rustc_path.as_os_str(),
            self.args.iter().map(|arg| &**arg),
        )
    }

    fn command_string(&self) -> String {
        let mut command = self.rustc_path.display().to_string();
        for arg in &self.args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }

    /// Executes the command and returns its standard output.
    fn read(&self) -> Result<Vec<u8>, ToolchainLookupError> {
        let expression = self.to_expression();
        debug!("exec: {}", self.command_string());
        trace!("executing command: {:?}", expression);
        let output = expression
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|error| ToolchainLookupError::Spawn {
                command: self.command_string(),
                error,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!("stderr:\n{stderr}");
            return Err(ToolchainLookupError::Failed {
                command: self.command_string(),
                status: output.status,
                stderr,
            });
        }
        Ok(output.stdout)
    }
}
