// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{WriteJunitError, XmlString, serialize::serialize_report};
use std::{io, time::Duration};

/// The root element of a JUnit report.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// The total number of tests from all test suites.
    ///
    /// This is not serialized; it is kept for callers that want to summarize the report.
    pub tests: usize,

    /// The total number of failures from all test suites.
    ///
    /// This is not serialized either.
    pub failures: usize,

    /// The test suites contained in this report.
    pub test_suites: Vec<TestSuite>,
}

impl Report {
    /// Creates a new, empty `Report`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new test suite and updates the `tests` and `failures` counts.
    ///
    /// When generating a new report, use of this method is recommended over adding to
    /// `self.test_suites` directly.
    pub fn add_test_suite(&mut self, test_suite: TestSuite) -> &mut Self {
        self.tests += test_suite.tests;
        self.failures += test_suite.failures;
        self.test_suites.push(test_suite);
        self
    }

    /// Adds several test suites and updates the `tests` and `failures` counts.
    pub fn add_test_suites(
        &mut self,
        test_suites: impl IntoIterator<Item = TestSuite>,
    ) -> &mut Self {
        for test_suite in test_suites {
            self.add_test_suite(test_suite);
        }
        self
    }

    /// Serialize this report to the given writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<(), WriteJunitError> {
        serialize_report(self, writer).map_err(WriteJunitError::from)
    }

    /// Serialize this report to a string.
    pub fn to_string(&self) -> Result<String, WriteJunitError> {
        let mut buf: Vec<u8> = vec![];
        self.serialize(&mut buf)?;
        String::from_utf8(buf).map_err(|utf8_err| {
            quick_xml::Error::NonDecodable(Some(utf8_err.utf8_error())).into()
        })
    }
}

/// Represents a single test suite: in this crate, one package.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct TestSuite {
    /// The name of this test suite.
    pub name: XmlString,

    /// The total number of tests in this test suite.
    pub tests: usize,

    /// The total number of tests in this suite that failed.
    pub failures: usize,

    /// The overall time taken by the test suite.
    pub time: Duration,

    /// Metadata about the environment the tests ran in.
    pub properties: Vec<Property>,

    /// The test cases that form this test suite.
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    /// Creates a new `TestSuite`.
    pub fn new(name: impl Into<XmlString>) -> Self {
        Self {
            name: name.into(),
            tests: 0,
            failures: 0,
            time: Duration::ZERO,
            properties: vec![],
            test_cases: vec![],
        }
    }

    /// Sets the time taken for the test suite.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = time;
        self
    }

    /// Adds a property to this test suite.
    pub fn add_property(&mut self, property: impl Into<Property>) -> &mut Self {
        self.properties.push(property.into());
        self
    }

    /// Adds a test case to this test suite and updates the counts.
    ///
    /// When generating a new report, use of this method is recommended over adding to
    /// `self.test_cases` directly.
    pub fn add_test_case(&mut self, test_case: TestCase) -> &mut Self {
        self.tests += 1;
        if matches!(test_case.status, TestCaseStatus::Failure { .. }) {
            self.failures += 1;
        }
        self.test_cases.push(test_case);
        self
    }

    /// Adds several test cases to this test suite and updates the counts.
    pub fn add_test_cases(&mut self, test_cases: impl IntoIterator<Item = TestCase>) -> &mut Self {
        for test_case in test_cases {
            self.add_test_case(test_case);
        }
        self
    }
}

/// Represents a single test case.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct TestCase {
    /// The name of the test case.
    pub name: XmlString,

    /// The "classname" of the test case.
    ///
    /// This is the normalized name of the package the test belongs to. CI systems render it as a
    /// `.`-separated hierarchy.
    pub classname: XmlString,

    /// The time it took to execute this test case.
    pub time: Duration,

    /// The status of this test.
    pub status: TestCaseStatus,
}

impl TestCase {
    /// Creates a new test case.
    pub fn new(name: impl Into<XmlString>, status: TestCaseStatus) -> Self {
        Self {
            name: name.into(),
            classname: XmlString::default(),
            time: Duration::ZERO,
            status,
        }
    }

    /// Sets the classname of the test.
    pub fn set_classname(&mut self, classname: impl Into<XmlString>) -> &mut Self {
        self.classname = classname.into();
        self
    }

    /// Sets the time taken for the test case.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = time;
        self
    }
}

/// The outcome of a test case.
///
/// A test case carries at most one outcome annotation: `Success` has none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestCaseStatus {
    /// This test case passed.
    Success,

    /// This test case failed.
    Failure {
        /// The failure message, serialized as the `message` attribute.
        message: Option<XmlString>,

        /// The output captured for the failing test.
        ///
        /// This is serialized as the text node of the element.
        description: Option<XmlString>,
    },

    /// This test case was not run.
    Skipped {
        /// The skip message.
        message: Option<XmlString>,
    },
}

impl TestCaseStatus {
    /// Creates a new `TestCaseStatus` that represents a successful test.
    pub fn success() -> Self {
        TestCaseStatus::Success
    }

    /// Creates a new `TestCaseStatus` that represents a failed test.
    pub fn failure() -> Self {
        TestCaseStatus::Failure {
            message: None,
            description: None,
        }
    }

    /// Creates a new `TestCaseStatus` that represents a skipped test.
    pub fn skipped() -> Self {
        TestCaseStatus::Skipped { message: None }
    }

    /// Sets the message. No-op if this is a success case.
    pub fn set_message(&mut self, message: impl Into<XmlString>) -> &mut Self {
        let message_mut = match self {
            TestCaseStatus::Success => return self,
            TestCaseStatus::Failure { message, .. } => message,
            TestCaseStatus::Skipped { message } => message,
        };
        *message_mut = Some(message.into());
        self
    }

    /// Sets the description (text node). No-op unless this is a failure.
    pub fn set_description(&mut self, description: impl Into<XmlString>) -> &mut Self {
        if let TestCaseStatus::Failure {
            description: description_mut,
            ..
        } = self
        {
            *description_mut = Some(description.into());
        }
        self
    }
}

/// Custom properties set during test execution, e.g. the toolchain version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    /// The name of the property.
    pub name: XmlString,

    /// The value of the property.
    pub value: XmlString,
}

impl Property {
    /// Creates a new `Property` instance.
    pub fn new(name: impl Into<XmlString>, value: impl Into<XmlString>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<T, U> From<(T, U)> for Property
where
    T: Into<XmlString>,
    U: Into<XmlString>,
{
    fn from((k, v): (T, U)) -> Self {
        Property::new(k, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_statuses() {
        let mut failure = TestCaseStatus::failure();
        failure.set_message("Failed").set_description("boom");
        let mut skipped = TestCaseStatus::skipped();
        skipped.set_message("not today");

        let mut test_suite = TestSuite::new("suite");
        test_suite.add_test_cases([
            TestCase::new("a", failure),
            TestCase::new("b", skipped),
            TestCase::new("c", TestCaseStatus::success()),
        ]);
        assert_eq!(test_suite.tests, 3);
        assert_eq!(test_suite.failures, 1);

        let mut other = TestSuite::new("other");
        other.add_test_case(TestCase::new("d", TestCaseStatus::failure()));

        let mut report = Report::new();
        report.add_test_suites([test_suite, other]);
        assert_eq!(report.tests, 4);
        assert_eq!(report.failures, 2);
    }

    #[test]
    fn set_description_only_applies_to_failures() {
        let mut skipped = TestCaseStatus::skipped();
        skipped.set_description("ignored");
        assert_eq!(skipped, TestCaseStatus::Skipped { message: None });

        let mut success = TestCaseStatus::success();
        success.set_message("ignored").set_description("ignored");
        assert_eq!(success, TestCaseStatus::Success);
    }
}
