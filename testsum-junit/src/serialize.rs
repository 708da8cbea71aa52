// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `Report`.

use crate::{Property, Report, TestCase, TestCaseStatus, TestSuite};
use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
    name::QName,
};
use std::{borrow::Cow, io, time::Duration};

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static PROPERTIES_TAG: &str = "properties";
static PROPERTY_TAG: &str = "property";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";

pub(crate) fn serialize_report(report: &Report, writer: impl io::Write) -> quick_xml::Result<()> {
    let mut writer = Writer::new_with_indent(writer, b'\t', 1);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    serialize_report_impl(report, &mut writer)?;

    // Add a trailing newline.
    writer.write_indent()
}

fn serialize_report_impl(
    report: &Report,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // The counts on the report are for callers; the root element carries no attributes.
    let Report {
        tests: _,
        failures: _,
        test_suites,
    } = report;

    serialize_empty_start_tag(TESTSUITES_TAG, writer)?;
    for test_suite in test_suites {
        serialize_test_suite(test_suite, writer)?;
    }
    serialize_end_tag(TESTSUITES_TAG, writer)
}

fn serialize_test_suite(
    test_suite: &TestSuite,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let TestSuite {
        name,
        tests,
        failures,
        time,
        properties,
        test_cases,
    } = test_suite;

    let mut test_suite_tag = BytesStart::new(TESTSUITE_TAG);
    test_suite_tag.extend_attributes([
        attribute("tests", &tests.to_string()),
        attribute("failures", &failures.to_string()),
        attribute("time", &serialize_time(time)),
        attribute("name", name),
    ]);
    writer.write_event(Event::Start(test_suite_tag))?;

    if !properties.is_empty() {
        serialize_empty_start_tag(PROPERTIES_TAG, writer)?;
        for property in properties {
            serialize_property(property, writer)?;
        }
        serialize_end_tag(PROPERTIES_TAG, writer)?;
    }

    for test_case in test_cases {
        serialize_test_case(test_case, writer)?;
    }

    serialize_end_tag(TESTSUITE_TAG, writer)
}

fn serialize_property(
    property: &Property,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut property_tag = BytesStart::new(PROPERTY_TAG);
    property_tag.extend_attributes([
        attribute("name", &property.name),
        attribute("value", &property.value),
    ]);

    writer.write_event(Event::Empty(property_tag))
}

fn serialize_test_case(
    test_case: &TestCase,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let TestCase {
        name,
        classname,
        time,
        status,
    } = test_case;

    let mut test_case_tag = BytesStart::new(TESTCASE_TAG);
    test_case_tag.extend_attributes([
        attribute("classname", classname),
        attribute("name", name),
        attribute("time", &serialize_time(time)),
    ]);

    match status {
        TestCaseStatus::Success => {
            return writer.write_event(Event::Empty(test_case_tag));
        }
        TestCaseStatus::Failure {
            message,
            description,
        } => {
            writer.write_event(Event::Start(test_case_tag))?;

            let mut tag = BytesStart::new(FAILURE_TAG);
            if let Some(message) = message {
                tag.push_attribute(attribute("message", message));
            }
            // The failure element always has a text node, even if nothing was captured.
            writer.write_event(Event::Start(tag))?;
            let description = description.as_deref().unwrap_or_default();
            writer.write_event(Event::Text(BytesText::new(description)))?;
            serialize_end_tag(FAILURE_TAG, writer)?;
        }
        TestCaseStatus::Skipped { message } => {
            writer.write_event(Event::Start(test_case_tag))?;

            let mut tag = BytesStart::new(SKIPPED_TAG);
            if let Some(message) = message {
                tag.push_attribute(attribute("message", message));
            }
            writer.write_event(Event::Empty(tag))?;
        }
    }

    serialize_end_tag(TESTCASE_TAG, writer)
}

fn serialize_empty_start_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let tag = BytesStart::new(tag_name);
    writer.write_event(Event::Start(tag))
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let end_tag = BytesEnd::new(tag_name);
    writer.write_event(Event::End(end_tag))
}

// Attribute values are escaped like text, and additionally keep their whitespace: parsers
// normalize literal newlines and tabs in attributes to spaces.
fn attribute<'a>(key: &'a str, value: &'a str) -> Attribute<'a> {
    let escaped = match escape(value) {
        Cow::Borrowed(escaped) if !escaped.contains(&['\n', '\r', '\t'][..]) => {
            Cow::Borrowed(escaped.as_bytes())
        }
        escaped => Cow::Owned(
            escaped
                .replace('\n', "&#10;")
                .replace('\r', "&#13;")
                .replace('\t', "&#9;")
                .into_bytes(),
        ),
    };
    Attribute {
        key: QName(key.as_bytes()),
        value: escaped,
    }
}

// Serialize time as seconds with 6 decimal points.
pub(crate) fn serialize_time(time: &Duration) -> String {
    format!("{:.6}", time.as_secs_f64())
}
