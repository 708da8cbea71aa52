// Copyright (c) The testsum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    TOOLCHAIN_VERSION_ENV, normalize_package_name, resolve_toolchain_version_with, rustc_path,
};

/// The environment variable that overrides the name of every test suite in the report.
///
/// Ignored if empty.
pub static SUITE_NAME_ENV: &str = "TESTSUM_JUNIT_SUITE";

/// Settings for generating a JUnit report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JunitConfig {
    strip: usize,
    prefix: String,
    suite_name: Option<String>,
    toolchain_version: Option<String>,
}

impl JunitConfig {
    /// Creates a new `JunitConfig` that strips `strip` leading segments from package names and
    /// prepends `prefix` to them.
    ///
    /// The environment is not consulted; see [`Self::from_env`].
    pub fn new(strip: usize, prefix: impl Into<String>) -> Self {
        Self {
            strip,
            prefix: prefix.into(),
            suite_name: None,
            toolchain_version: None,
        }
    }

    /// Creates a new `JunitConfig`, reading overrides from [`SUITE_NAME_ENV`] and
    /// [`TOOLCHAIN_VERSION_ENV`].
    pub fn from_env(strip: usize, prefix: impl Into<String>) -> Self {
        let mut config = Self::new(strip, prefix);
        if let Some(suite_name) = std::env::var_os(SUITE_NAME_ENV) {
            config.set_suite_name(suite_name.to_string_lossy());
        }
        if let Some(version) = std::env::var_os(TOOLCHAIN_VERSION_ENV) {
            config.set_toolchain_version(version.to_string_lossy());
        }
        config
    }

    /// Uses `suite_name` as the name of every test suite instead of the normalized package name.
    ///
    /// An empty name clears the override.
    pub fn set_suite_name(&mut self, suite_name: impl Into<String>) -> &mut Self {
        let suite_name = suite_name.into();
        self.suite_name = (!suite_name.is_empty()).then_some(suite_name);
        self
    }

    /// Records `version` as the toolchain version instead of querying rustc.
    ///
    /// Any value is used verbatim, including an empty one.
    pub fn set_toolchain_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.toolchain_version = Some(version.into());
        self
    }

    /// The number of leading package name segments to strip.
    pub fn strip(&self) -> usize {
        self.strip
    }

    /// The prefix prepended to package names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The suite name override, if any.
    pub fn suite_name(&self) -> Option<&str> {
        self.suite_name.as_deref()
    }

    /// The toolchain version override, if any.
    pub fn toolchain_version(&self) -> Option<&str> {
        self.toolchain_version.as_deref()
    }

    /// Normalizes a package name with this config's strip count and prefix.
    pub fn normalize(&self, package_name: &str) -> String {
        normalize_package_name(package_name, self.strip, &self.prefix)
    }

    /// Returns the name of the test suite for `package_name`.
    pub fn suite_name_for(&self, package_name: &str) -> String {
        match &self.suite_name {
            Some(suite_name) => suite_name.clone(),
            None => self.normalize(package_name),
        }
    }

    /// Returns the toolchain version override, or queries rustc if there is none.
    pub fn resolve_toolchain_version(&self) -> String {
        resolve_toolchain_version_with(self.toolchain_version.clone(), rustc_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_name_override() {
        let mut config = JunitConfig::new(2, "ci");
        assert_eq!(config.suite_name_for("github.com/org/pkg"), "ci.pkg");

        config.set_suite_name("integration");
        assert_eq!(config.suite_name(), Some("integration"));
        assert_eq!(
            config.suite_name_for("github.com/org/pkg"),
            "integration",
            "the override ignores strip and prefix"
        );

        config.set_suite_name("");
        assert_eq!(config.suite_name(), None, "empty clears the override");
        assert_eq!(config.suite_name_for("github.com/org/pkg"), "ci.pkg");
    }

    #[test]
    fn toolchain_version_override() {
        let mut config = JunitConfig::new(0, "");
        assert_eq!(config.toolchain_version(), None);

        config.set_toolchain_version("");
        assert_eq!(config.toolchain_version(), Some(""));
        assert_eq!(config.resolve_toolchain_version(), "");

        config.set_toolchain_version("1.85.0 (test)");
        assert_eq!(config.resolve_toolchain_version(), "1.85.0 (test)");
    }
}
