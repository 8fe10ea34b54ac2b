//! ---
//! qg_section: "03-configuration"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Shared configuration for the version tooling."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
//! Shared configuration for the version tooling. Logging types are re-exported
//! so binaries only need this crate to load and apply their settings.

pub mod config;

pub use config::{AppConfig, LoadedAppConfig, PcsConfig, RenderConfig};
pub use qg_logging::{init_tracing, LogFormat, LoggingConfig};
