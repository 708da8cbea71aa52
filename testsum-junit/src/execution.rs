// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The structured test execution results a report is generated from.
//!
//! These types are produced upstream, by whatever parses the raw output of the test runner, and
//! are only read here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The results of one test run, grouped by package.
///
/// Packages are kept in insertion order, which is also the order of the test suites in the
/// generated report.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Execution {
    #[serde(default)]
    packages: IndexMap<String, Package>,
}

impl Execution {
    /// Creates a new, empty `Execution`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the results for a package, replacing any earlier results with the same name.
    pub fn add_package(&mut self, name: impl Into<String>, package: Package) -> &mut Self {
        self.packages.insert(name.into(), package);
        self
    }

    /// Returns the names of all packages, in order.
    pub fn packages(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.packages.keys().map(|name| name.as_str())
    }

    /// Returns the results for the given package.
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Iterates over package names and their results, in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Package)> + '_ {
        self.packages
            .iter()
            .map(|(name, package)| (name.as_str(), package))
    }
}

/// Aggregate results for a single package.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Package {
    total: usize,

    #[serde(with = "humantime_serde")]
    elapsed: Duration,

    /// Set if the package's test binary itself failed to start or run to completion.
    #[serde(default)]
    driver_failed: bool,

    #[serde(default)]
    failed: Vec<ExecutedTest>,

    #[serde(default)]
    skipped: Vec<ExecutedTest>,

    #[serde(default)]
    passed: Vec<ExecutedTest>,

    /// Captured output keyed by test name. The empty key holds the output of the whole package.
    #[serde(default)]
    output: IndexMap<String, String>,
}

impl Package {
    /// Creates a new `Package` with the given total test count and elapsed time.
    pub fn new(total: usize, elapsed: Duration) -> Self {
        Self {
            total,
            elapsed,
            ..Default::default()
        }
    }

    /// Marks the package's test binary as having failed to run.
    pub fn set_driver_failed(&mut self, driver_failed: bool) -> &mut Self {
        self.driver_failed = driver_failed;
        self
    }

    /// Adds a failed test.
    pub fn add_failed(&mut self, test: ExecutedTest) -> &mut Self {
        self.failed.push(test);
        self
    }

    /// Adds a skipped test.
    pub fn add_skipped(&mut self, test: ExecutedTest) -> &mut Self {
        self.skipped.push(test);
        self
    }

    /// Adds a passed test.
    pub fn add_passed(&mut self, test: ExecutedTest) -> &mut Self {
        self.passed.push(test);
        self
    }

    /// Sets the captured output for a test. Pass `""` as the test name to set the output of the
    /// whole package.
    pub fn set_output(&mut self, test: impl Into<String>, output: impl Into<String>) -> &mut Self {
        self.output.insert(test.into(), output.into());
        self
    }

    /// The number of tests that ran in this package.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The time the package took to run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the package's test binary failed to run.
    pub fn driver_failed(&self) -> bool {
        self.driver_failed
    }

    /// Tests that failed, in the order they were reported.
    pub fn failed(&self) -> &[ExecutedTest] {
        &self.failed
    }

    /// Tests that were skipped, in the order they were reported.
    pub fn skipped(&self) -> &[ExecutedTest] {
        &self.skipped
    }

    /// Tests that passed, in the order they were reported.
    pub fn passed(&self) -> &[ExecutedTest] {
        &self.passed
    }

    /// Returns the output captured for `test`, or the output of the whole package if `test` is
    /// empty.
    ///
    /// Returns an empty string if nothing was captured.
    pub fn output(&self, test: &str) -> &str {
        self.output.get(test).map_or("", |output| output.as_str())
    }
}

/// A single test that ran.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExecutedTest {
    /// The path-style name of the package the test belongs to.
    pub package: String,

    /// The name of the test.
    pub test: String,

    /// The time the test took to run.
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl ExecutedTest {
    /// Creates a new `ExecutedTest`.
    pub fn new(package: impl Into<String>, test: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            package: package.into(),
            test: test.into(),
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn deserialize_execution() {
        let input = indoc! {r#"
            {
                "packages": {
                    "example.com/app/cmd": {
                        "total": 0,
                        "elapsed": "300ms",
                        "driver-failed": true,
                        "output": { "": "thread 'main' panicked\n" }
                    },
                    "example.com/app/lib": {
                        "total": 2,
                        "elapsed": "1s 500ms",
                        "failed": [
                            { "package": "example.com/app/lib", "test": "broken", "elapsed": "10ms" }
                        ],
                        "passed": [
                            { "package": "example.com/app/lib", "test": "works", "elapsed": "2ms" }
                        ],
                        "output": { "broken": "assertion failed\n" }
                    }
                }
            }
        "#};

        let execution: Execution = serde_json::from_str(input).expect("input is valid");
        assert_eq!(
            execution.packages().collect::<Vec<_>>(),
            ["example.com/app/cmd", "example.com/app/lib"],
            "package order is preserved"
        );

        let cmd = execution
            .package("example.com/app/cmd")
            .expect("cmd package exists");
        assert!(cmd.driver_failed());
        assert_eq!(cmd.output(""), "thread 'main' panicked\n");
        assert!(cmd.failed().is_empty());

        let lib = execution
            .package("example.com/app/lib")
            .expect("lib package exists");
        assert!(!lib.driver_failed());
        assert_eq!(lib.total(), 2);
        assert_eq!(lib.elapsed(), Duration::from_millis(1500));
        assert_eq!(
            lib.failed(),
            [ExecutedTest::new(
                "example.com/app/lib",
                "broken",
                Duration::from_millis(10)
            )]
        );
        assert!(lib.skipped().is_empty());
        assert_eq!(lib.output("broken"), "assertion failed\n");
        assert_eq!(lib.output("works"), "", "missing output is empty");
        assert_eq!(lib.output(""), "");
    }
}
