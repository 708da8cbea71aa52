// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code to generate JUnit reports from test execution results.

use crate::{
    ExecutedTest, Execution, JunitConfig, Package, Report, TestCase, TestCaseStatus, TestSuite,
    WriteJunitError,
};
use std::{io, time::Duration};
use tracing::debug;

/// The name of the test case recorded when a package's test binary failed to run.
pub static DRIVER_FAILURE_TEST_NAME: &str = "main";

/// The name of the property holding the toolchain version.
pub static TOOLCHAIN_VERSION_PROPERTY: &str = "toolchain.version";

static FAILURE_MESSAGE: &str = "Failed";

/// Writes a JUnit report for `execution` to `out`.
///
/// Package names are normalized with [`normalize_package_name`](crate::normalize_package_name)
/// using `strip` and `prefix`. Overrides are read from the environment, as described in
/// [`JunitConfig::from_env`].
pub fn write(
    out: impl io::Write,
    execution: &Execution,
    strip: usize,
    prefix: &str,
) -> Result<(), WriteJunitError> {
    write_with_config(out, execution, &JunitConfig::from_env(strip, prefix))
}

/// Writes a JUnit report for `execution` to `out`, using the given configuration.
pub fn write_with_config(
    out: impl io::Write,
    execution: &Execution,
    config: &JunitConfig,
) -> Result<(), WriteJunitError> {
    generate(execution, config).serialize(out)
}

/// Builds a JUnit report for `execution`: one test suite per package, in order.
pub fn generate(execution: &Execution, config: &JunitConfig) -> Report {
    let version = config.resolve_toolchain_version();
    let mut report = Report::new();
    for (package_name, package) in execution.iter() {
        report.add_test_suite(package_test_suite(package_name, package, &version, config));
    }
    report
}

fn package_test_suite(
    package_name: &str,
    package: &Package,
    version: &str,
    config: &JunitConfig,
) -> TestSuite {
    let mut test_suite = TestSuite::new(config.suite_name_for(package_name));
    test_suite
        .set_time(package.elapsed())
        .add_property((TOOLCHAIN_VERSION_PROPERTY, version))
        .add_test_cases(package_test_cases(package_name, package, config));

    // The test count comes from the package aggregate, plus the synthetic driver failure.
    let tests = package.total() + usize::from(package.driver_failed());
    if tests != test_suite.test_cases.len() {
        debug!(
            "package {package_name} reports {tests} tests but has {} test cases",
            test_suite.test_cases.len(),
        );
    }
    test_suite.tests = tests;
    test_suite
}

fn package_test_cases(
    package_name: &str,
    package: &Package,
    config: &JunitConfig,
) -> Vec<TestCase> {
    let mut test_cases = Vec::with_capacity(
        usize::from(package.driver_failed())
            + package.failed().len()
            + package.skipped().len()
            + package.passed().len(),
    );

    if package.driver_failed() {
        let mut status = TestCaseStatus::failure();
        status
            .set_message(FAILURE_MESSAGE)
            .set_description(package.output(""));
        let mut test_case = TestCase::new(DRIVER_FAILURE_TEST_NAME, status);
        test_case
            .set_classname(config.normalize(package_name))
            .set_time(Duration::ZERO);
        test_cases.push(test_case);
    }

    for test in package.failed() {
        let mut status = TestCaseStatus::failure();
        status
            .set_message(FAILURE_MESSAGE)
            .set_description(package.output(&test.test));
        test_cases.push(new_test_case(test, status, config));
    }

    for test in package.skipped() {
        let mut status = TestCaseStatus::skipped();
        status.set_message(package.output(&test.test));
        test_cases.push(new_test_case(test, status, config));
    }

    for test in package.passed() {
        test_cases.push(new_test_case(test, TestCaseStatus::success(), config));
    }

    test_cases
}

fn new_test_case(test: &ExecutedTest, status: TestCaseStatus, config: &JunitConfig) -> TestCase {
    let mut test_case = TestCase::new(test.test.as_str(), status);
    test_case
        .set_classname(config.normalize(&test.package))
        .set_time(test.elapsed);
    test_case
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XmlString;
    use pretty_assertions::assert_eq;

    static PACKAGE: &str = "github.com/acme/widgets";

    fn test_config() -> JunitConfig {
        let mut config = JunitConfig::new(0, "");
        config.set_toolchain_version("1.85.0 (test)");
        config
    }

    fn test(name: &str, millis: u64) -> ExecutedTest {
        ExecutedTest::new(PACKAGE, name, Duration::from_millis(millis))
    }

    fn mixed_package() -> Package {
        let mut package = Package::new(5, Duration::from_secs(2));
        package
            .add_passed(test("passes_first", 1))
            .add_failed(test("fails_first", 2))
            .add_skipped(test("skips", 0))
            .add_passed(test("passes_second", 3))
            .add_failed(test("fails_second", 4))
            .set_output("fails_first", "first failure\n")
            .set_output("fails_second", "second failure\n")
            .set_output("skips", "skipped: needs network\n");
        package
    }

    fn names(test_suite: &TestSuite) -> Vec<&str> {
        test_suite
            .test_cases
            .iter()
            .map(|test_case| test_case.name.as_str())
            .collect()
    }

    #[test]
    fn groups_in_order() {
        let mut execution = Execution::new();
        execution.add_package(PACKAGE, mixed_package());

        let report = generate(&execution, &test_config());
        assert_eq!(report.test_suites.len(), 1);
        let test_suite = &report.test_suites[0];

        assert_eq!(test_suite.name, "github-com.acme.widgets");
        assert_eq!(test_suite.tests, 5);
        assert_eq!(test_suite.failures, 2);
        assert_eq!(test_suite.time, Duration::from_secs(2));
        assert_eq!(
            names(test_suite),
            [
                "fails_first",
                "fails_second",
                "skips",
                "passes_first",
                "passes_second"
            ],
            "failed, then skipped, then passed, each in source order"
        );

        let test_case = &test_suite.test_cases[0];
        assert_eq!(test_case.classname, "github-com.acme.widgets");
        assert_eq!(test_case.time, Duration::from_millis(2));
        assert_eq!(
            test_case.status,
            TestCaseStatus::Failure {
                message: Some(XmlString::new("Failed")),
                description: Some(XmlString::new("first failure\n")),
            }
        );
        assert_eq!(
            test_suite.test_cases[2].status,
            TestCaseStatus::Skipped {
                message: Some(XmlString::new("skipped: needs network\n")),
            }
        );
        assert_eq!(test_suite.test_cases[3].status, TestCaseStatus::Success);
    }

    #[test]
    fn driver_failure_comes_first() {
        let mut package = mixed_package();
        package
            .set_driver_failed(true)
            .set_output("", "thread 'main' panicked at src/lib.rs:1:1\n");
        let mut execution = Execution::new();
        execution.add_package(PACKAGE, package);

        let report = generate(&execution, &test_config());
        let test_suite = &report.test_suites[0];

        assert_eq!(test_suite.tests, 6, "the synthetic test case is counted");
        assert_eq!(test_suite.tests, test_suite.test_cases.len());
        assert_eq!(test_suite.failures, 3);
        assert_eq!(names(test_suite)[0], DRIVER_FAILURE_TEST_NAME);

        let test_case = &test_suite.test_cases[0];
        assert_eq!(test_case.classname, "github-com.acme.widgets");
        assert_eq!(test_case.time, Duration::ZERO);
        assert_eq!(
            test_case.status,
            TestCaseStatus::Failure {
                message: Some(XmlString::new("Failed")),
                description: Some(XmlString::new(
                    "thread 'main' panicked at src/lib.rs:1:1\n"
                )),
            }
        );
    }

    #[test]
    fn suites_follow_package_order() {
        let mut execution = Execution::new();
        for name in ["z/last", "a/first", "m/middle"] {
            execution.add_package(name, Package::new(0, Duration::ZERO));
        }

        let report = generate(&execution, &test_config());
        let suite_names: Vec<_> = report
            .test_suites
            .iter()
            .map(|test_suite| test_suite.name.as_str())
            .collect();
        assert_eq!(suite_names, ["z.last", "a.first", "m.middle"]);
    }

    #[test]
    fn strip_prefix_and_override() {
        let mut execution = Execution::new();
        execution.add_package(PACKAGE, mixed_package());

        let mut config = JunitConfig::new(2, "corp/ci");
        config.set_toolchain_version("1.85.0 (test)");
        let report = generate(&execution, &config);
        let test_suite = &report.test_suites[0];
        assert_eq!(test_suite.name, "corp.ci.widgets");
        assert!(
            test_suite
                .test_cases
                .iter()
                .all(|test_case| test_case.classname == "corp.ci.widgets"),
            "classnames are normalized the same way"
        );

        config.set_suite_name("nightly");
        let report = generate(&execution, &config);
        let test_suite = &report.test_suites[0];
        assert_eq!(test_suite.name, "nightly");
        assert_eq!(
            test_suite.test_cases[0].classname, "corp.ci.widgets",
            "the suite name override does not affect classnames"
        );
    }

    #[test]
    fn toolchain_version_property() {
        let mut execution = Execution::new();
        execution
            .add_package("a", Package::new(0, Duration::ZERO))
            .add_package("b", Package::new(0, Duration::ZERO));

        let report = generate(&execution, &test_config());
        for test_suite in &report.test_suites {
            assert_eq!(
                test_suite.properties,
                [crate::Property::new("toolchain.version", "1.85.0 (test)")]
            );
        }
    }

    #[test]
    fn write_starts_with_declaration() {
        let mut execution = Execution::new();
        execution.add_package(PACKAGE, mixed_package());

        let mut out = Vec::new();
        write_with_config(&mut out, &execution, &test_config()).expect("writing succeeds");
        let xml = String::from_utf8(out).expect("output is UTF-8");
        assert!(
            xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            "document starts with the XML declaration: {xml}"
        );
    }
}
