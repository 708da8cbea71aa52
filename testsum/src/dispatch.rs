// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, TestsumExitCode,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
};
use testsum_junit::{Execution, JunitConfig, generate};
use tracing::{debug, info};

/// Summarize structured test execution results for CI systems.
#[derive(Debug, Parser)]
#[command(version, max_term_width = 100)]
pub struct TestsumApp {
    #[command(flatten)]
    output: OutputOpts,

    #[command(subcommand)]
    command: Command,
}

impl TestsumApp {
    /// Initializes logging and color support for this invocation.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the exit code on success.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Junit(opts) => opts.exec(output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a JUnit XML report for execution results.
    ///
    /// Each package becomes a test suite. Package names are turned into `.`-separated JUnit
    /// names: `.` becomes `-` and `/` becomes `.`, so `github.com/foo/bar` is reported as
    /// `github-com.foo.bar`.
    Junit(JunitOpts),
}

#[derive(Debug, Args)]
struct JunitOpts {
    /// Execution results to read, as JSON [default: standard input]
    #[arg(long, value_name = "PATH")]
    input: Option<Utf8PathBuf>,

    /// File to write the JUnit XML report to [default: standard output]
    #[arg(long, value_name = "PATH")]
    junit_file: Option<Utf8PathBuf>,

    /// Number of leading path segments to strip from package names
    #[arg(long, value_name = "N", default_value_t = 0)]
    strip: usize,

    /// Path prepended to package names, after stripping
    #[arg(long, value_name = "PREFIX", default_value = "")]
    prefix: String,

    /// Name every test suite NAME; an empty NAME uses package names [env: TESTSUM_JUNIT_SUITE]
    #[arg(long, value_name = "NAME")]
    suite_name: Option<String>,

    /// Toolchain version to record instead of querying rustc [env: TESTSUM_RUSTC_VERSION]
    #[arg(long, value_name = "VERSION")]
    toolchain_version: Option<String>,
}

impl JunitOpts {
    fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        let execution = read_execution(self.input.as_deref())?;

        // Environment overrides apply first, so that explicit flags win.
        let mut config = JunitConfig::from_env(self.strip, self.prefix);
        if let Some(suite_name) = self.suite_name {
            config.set_suite_name(suite_name);
        }
        if let Some(version) = self.toolchain_version {
            config.set_toolchain_version(version);
        }
        debug!("JUnit config: {config:?}");

        let report = generate(&execution, &config);

        match &self.junit_file {
            Some(path) => {
                let writer = create_junit_file(path)?;
                write_report(&report, writer, Some(path))?;
                info!(
                    "wrote JUnit report to {path} ({} tests, {} failures)",
                    report.tests, report.failures
                );
            }
            None => {
                write_report(&report, output_writer.stdout_writer(), None)?;
            }
        }

        Ok(TestsumExitCode::OK)
    }
}

fn read_execution(path: Option<&Utf8Path>) -> Result<Execution> {
    let input = match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input).map(|_| input)
        }
    }
    .map_err(|err| ExpectedError::InputReadError {
        path: path.map(Utf8Path::to_path_buf),
        err,
    })?;

    let mut deserializer = serde_json::Deserializer::from_str(&input);
    let execution: Execution =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            ExpectedError::InputParseError {
                path: path.map(Utf8Path::to_path_buf),
                err,
            }
        })?;
    debug!("read {} packages", execution.packages().len());
    Ok(execution)
}

fn create_junit_file(path: &Utf8Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|err| ExpectedError::OutputDirCreateError {
            dir: dir.to_path_buf(),
            err,
        })?;
    }
    let file = File::create(path).map_err(|err| ExpectedError::OutputFileCreateError {
        path: path.to_path_buf(),
        err,
    })?;
    Ok(BufWriter::new(file))
}

fn write_report(
    report: &testsum_junit::Report,
    mut writer: impl Write,
    path: Option<&Utf8PathBuf>,
) -> Result<()> {
    report
        .serialize(&mut writer)
        .map_err(|err| ExpectedError::JunitWriteError {
            path: path.cloned(),
            err,
        })?;
    writer
        .flush()
        .map_err(|err| ExpectedError::OutputFlushError {
            path: path.cloned(),
            err,
        })
}
