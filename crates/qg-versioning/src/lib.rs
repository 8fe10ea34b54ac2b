//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Version table and release metadata for Quote Generation."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
//! Core crate exposing the compile-time version table of the Quote Generation
//! components, consistency checks over it, and renderers that embed it into
//! resource scripts, headers and manifests.

pub mod build_info;
pub mod check;
pub mod component;
pub mod error;
pub mod file_version;
pub mod pcs;
pub mod resource;
pub mod table;

pub use build_info::BuildInfo;
pub use check::{verify, ConsistencyReport};
pub use component::{Component, ComponentKind};
pub use error::{TableError, VersionError};
pub use file_version::FileVersion;
pub use pcs::PcsApiVersion;
pub use resource::{render, RenderOptions, ResourceFormat};
pub use table::{entries, lookup, VersionEntry, VersionName, VersionValue};
