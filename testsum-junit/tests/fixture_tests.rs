// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use goldenfile::Mint;
use pretty_assertions::assert_eq;
use std::time::Duration;
use testsum_junit::{ExecutedTest, Execution, JunitConfig, Package};

static FIXTURE: &str = include_str!("fixtures/junit_report.xml");

#[test]
fn fixtures() {
    let mut mint = Mint::new("tests/fixtures");

    let f = mint
        .new_goldenfile("junit_report.xml")
        .expect("creating new goldenfile succeeds");

    testsum_junit::write_with_config(f, &basic_execution(), &config(0, ""))
        .expect("writing basic_execution succeeds");
}

#[test]
fn strip() {
    let xml = render(&config(2, ""));
    // Replacement is anchored with " to avoid substitution in output text.
    let expected = FIXTURE.replace(r#""github-com.acme."#, r#"""#);
    assert_eq!(xml, expected);
}

#[test]
fn prefix() {
    let xml = render(&config(0, "a/b/c"));
    let expected = FIXTURE.replace(r#""github-com.acme."#, r#""a.b.c.github-com.acme."#);
    assert_eq!(xml, expected);
}

#[test]
fn suite_name_override() {
    let mut config = config(0, "");
    config.set_suite_name("nightly");
    let xml = render(&config);

    let expected = FIXTURE
        .replace(
            r#"name="github-com.acme.widgets.parser">"#,
            r#"name="nightly">"#,
        )
        .replace(
            r#"name="github-com.acme.widgets.cmd">"#,
            r#"name="nightly">"#,
        )
        .replace(r#"name="github-com.acme.widgets">"#, r#"name="nightly">"#);
    assert_eq!(xml, expected);
}

fn render(config: &JunitConfig) -> String {
    let mut out = Vec::new();
    testsum_junit::write_with_config(&mut out, &basic_execution(), config)
        .expect("writing basic_execution succeeds");
    String::from_utf8(out).expect("output is valid UTF-8")
}

fn config(strip: usize, prefix: &str) -> JunitConfig {
    let mut config = JunitConfig::new(strip, prefix);
    config.set_toolchain_version("1.85.0 (test)");
    config
}

fn basic_execution() -> Execution {
    let mut execution = Execution::new();

    let parser = "github.com/acme/widgets/parser";
    let mut package = Package::new(4, Duration::from_millis(1500));
    package
        .add_failed(ExecutedTest::new(
            parser,
            "parse_error",
            Duration::from_millis(10),
        ))
        .add_skipped(ExecutedTest::new(parser, "slow_fuzz", Duration::ZERO))
        .add_passed(ExecutedTest::new(
            parser,
            "parses_empty",
            Duration::from_millis(200),
        ))
        .add_passed(ExecutedTest::new(
            parser,
            "parses_nested",
            Duration::from_millis(1),
        ))
        .set_output(
            "parse_error",
            "parser.rs:12: expected <none>, got \"EOF\"\n",
        )
        .set_output("slow_fuzz", "ignored: slow\n");
    execution.add_package(parser, package);

    let mut package = Package::new(0, Duration::from_millis(300));
    package
        .set_driver_failed(true)
        .set_output("", "\x1b[1;31merror\x1b[0m: test binary crashed\n");
    execution.add_package("github.com/acme/widgets/cmd", package);

    let root = "github.com/acme/widgets";
    let mut package = Package::new(1, Duration::from_millis(5));
    package.add_passed(ExecutedTest::new(
        root,
        "version_is_set",
        Duration::from_millis(5),
    ));
    execution.add_package(root, package);

    execution
}
