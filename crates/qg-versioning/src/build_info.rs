//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Build metadata combined with the product version."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use serde::Serialize;

use crate::table::{PRODUCT_NAME, PRODUCT_VERSION_STR};

const UNKNOWN: &str = "UNKNOWN";
/// Placeholder vergen emits when a value cannot be determined.
const IDEMPOTENT_MARKER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

fn build_value(value: Option<&'static str>) -> String {
    value
        .filter(|v| !v.is_empty() && *v != IDEMPOTENT_MARKER)
        .unwrap_or(UNKNOWN)
        .to_owned()
}

/// Compile-time build metadata captured via `vergen`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Product version from the version table.
    pub product_version: String,
    /// Semantic version of the crate that produced the binary.
    pub crate_version: String,
    /// Git commit hash captured at build time.
    pub git_sha: String,
    /// Build timestamp from the compilation environment.
    pub build_timestamp: String,
    /// Target triple used for the build.
    pub target: String,
    /// Cargo profile used during compilation.
    pub profile: String,
}

impl BuildInfo {
    /// Construct a new [`BuildInfo`] from the build environment.
    #[must_use]
    pub fn current() -> Self {
        Self {
            product_version: PRODUCT_VERSION_STR.to_owned(),
            crate_version: env!("CARGO_PKG_VERSION").to_owned(),
            git_sha: build_value(option_env!("VERGEN_GIT_SHA")),
            build_timestamp: build_value(option_env!("VERGEN_BUILD_TIMESTAMP")),
            target: build_value(option_env!("VERGEN_CARGO_TARGET_TRIPLE")),
            profile: build_value(option_env!("VERGEN_CARGO_PROFILE")),
        }
    }

    /// Human readable banner used in logging surfaces.
    #[must_use]
    pub fn banner(&self) -> String {
        format!(
            "{PRODUCT_NAME} {} (git {})",
            self.product_version, self.git_sha
        )
    }

    /// Extended string containing build metadata suitable for `--version` flags.
    #[must_use]
    pub fn extended(&self) -> String {
        format!(
            "{banner}\nBuilt: {built}\nTarget: {target}\nProfile: {profile}\nTooling: {tooling}",
            banner = self.banner(),
            built = self.build_timestamp,
            target = self.target,
            profile = self.profile,
            tooling = self.crate_version
        )
    }
}

/// Helper for Clap commands to print the extended version string.
#[must_use]
pub fn clap_long_version() -> String {
    BuildInfo::current().extended()
}
