// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generate JUnit XML reports from structured test execution results.
//!
//! The input is an [`Execution`]: an ordered set of packages, each with its failed, skipped and
//! passed tests and the output captured while they ran. [`write`] turns it into a JUnit document
//! with one `<testsuite>` per package, the format consumed by Jenkins and most other CI systems.
//!
//! ```
//! use std::time::Duration;
//! use testsum_junit::{Execution, ExecutedTest, JunitConfig, Package};
//!
//! let mut package = Package::new(1, Duration::from_millis(20));
//! package.add_passed(ExecutedTest::new(
//!     "example.com/widgets",
//!     "parses_empty_input",
//!     Duration::from_millis(5),
//! ));
//! let mut execution = Execution::new();
//! execution.add_package("example.com/widgets", package);
//!
//! let mut config = JunitConfig::new(0, "");
//! config.set_toolchain_version("1.85.0");
//!
//! let mut out = Vec::new();
//! testsum_junit::write_with_config(&mut out, &execution, &config).unwrap();
//! let xml = String::from_utf8(out).unwrap();
//! assert!(xml.contains(r#"name="example-com.widgets""#));
//! ```

mod config;
mod errors;
mod execution;
mod generate;
mod normalize;
mod report;
mod serialize;
mod toolchain;
mod xml_string;

pub use config::*;
pub use errors::*;
pub use execution::*;
pub use generate::*;
pub use normalize::*;
pub use report::*;
pub use toolchain::*;
pub use xml_string::*;
