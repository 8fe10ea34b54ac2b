//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Typed catalogue of versioned Quote Generation components."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::VersionError;
use crate::file_version::FileVersion;
use crate::table::VersionName;

/// Broad category of a versioned component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComponentKind {
    /// Untrusted host library.
    Library,
    /// Shim loading an enclave on behalf of its callers.
    Wrapper,
    /// Signed enclave or attestation agent binary.
    Enclave,
}

/// Components whose versions the table records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Component {
    Qpl,
    QuoteVerifier,
    QuoteLoader,
    TdqeWrapper,
    PceWrapper,
    Qe3,
    Qve,
    Ide,
    Tdqe,
    Qae,
}

impl Component {
    /// Short slug used on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        self.into()
    }

    /// Table name holding this component's version.
    #[must_use]
    pub const fn version_name(self) -> VersionName {
        match self {
            Component::Qpl => VersionName::DefaultQplVersion,
            Component::QuoteVerifier => VersionName::QuoteVerifierVersion,
            Component::QuoteLoader => VersionName::QuoteLoaderVersion,
            Component::TdqeWrapper => VersionName::TdqeWrapperVersion,
            Component::PceWrapper => VersionName::PceWrapperVersion,
            Component::Qe3 => VersionName::Qe3Version,
            Component::Qve => VersionName::QveVersion,
            Component::Ide => VersionName::IdeVersion,
            Component::Tdqe => VersionName::TdqeVersion,
            Component::Qae => VersionName::QaeVersion,
        }
    }

    #[must_use]
    pub const fn kind(self) -> ComponentKind {
        match self {
            Component::Qpl | Component::QuoteVerifier | Component::QuoteLoader => {
                ComponentKind::Library
            }
            Component::TdqeWrapper | Component::PceWrapper => ComponentKind::Wrapper,
            Component::Qe3 | Component::Qve | Component::Ide | Component::Tdqe | Component::Qae => {
                ComponentKind::Enclave
            }
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Component::Qpl => "Default quote provider library",
            Component::QuoteVerifier => "Quote verification library",
            Component::QuoteLoader => "Quote loading library",
            Component::TdqeWrapper => "TD quoting enclave wrapper",
            Component::PceWrapper => "Provisioning certification enclave wrapper",
            Component::Qe3 => "Quoting enclave v3",
            Component::Qve => "Quote verification enclave",
            Component::Ide => "IDE enclave",
            Component::Tdqe => "TD quoting enclave",
            Component::Qae => "Quoting attestation engine",
        }
    }

    /// Version string exactly as recorded in the table.
    #[must_use]
    pub fn version_str(self) -> String {
        self.version_name().value().to_string()
    }

    /// Parsed numeric version.
    pub fn version(self) -> Result<FileVersion, VersionError> {
        self.version_name().value().as_file_version()
    }

    /// All components in table order.
    pub fn all() -> impl Iterator<Item = Component> {
        Component::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_component_version_parses() {
        for component in Component::all() {
            component
                .version()
                .unwrap_or_else(|err| panic!("{}: {err}", component.slug()));
        }
    }

    #[test]
    fn slugs_round_trip_through_from_str() {
        assert_eq!("pce-wrapper".parse::<Component>(), Ok(Component::PceWrapper));
        assert_eq!("QE3".parse::<Component>(), Ok(Component::Qe3));
        assert!("qe4".parse::<Component>().is_err());
        assert_eq!(Component::QuoteVerifier.slug(), "quote-verifier");
    }

    #[test]
    fn enclaves_share_a_release_train() {
        let expected = FileVersion::new(1, 22, 100, 1);
        for component in Component::all().filter(|c| c.kind() == ComponentKind::Enclave) {
            assert_eq!(component.version(), Ok(expected));
        }
    }

    #[test]
    fn wrappers_point_at_wrapper_entries() {
        assert_eq!(
            Component::TdqeWrapper.version_name(),
            VersionName::TdqeWrapperVersion
        );
        assert_eq!(Component::TdqeWrapper.version_str(), "1.14.110.0");
        assert_eq!(ComponentKind::Wrapper.to_string(), "wrapper");
    }
}
