//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Compile-time version constants and name lookup."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
//! The version table shared by every Quote Generation artifact.
//!
//! Each value is available twice: as a Rust constant, so an unknown name is a
//! build error, and through [`VersionName`] for runtime lookup by the
//! canonical identifier (`STRFILEVER`, `QE3_VERSION`, ...).

use std::fmt;

use serde::{Serialize, Serializer};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::VersionError;
use crate::file_version::FileVersion;

/// Declares the numeric and string form of one version family from a single
/// set of literals so the two cannot drift apart.
macro_rules! version_family {
    (
        $(#[$tuple_meta:meta])* $tuple:ident,
        $(#[$text_meta:meta])* $text:ident = $major:literal, $minor:literal, $revision:literal, $build:literal
    ) => {
        $(#[$tuple_meta])*
        pub const $tuple: FileVersion = FileVersion::new($major, $minor, $revision, $build);
        $(#[$text_meta])*
        pub const $text: &str = concat!($major, ".", $minor, ".", $revision, ".", $build);
    };
}

version_family!(
    /// Overall file version (`FILEVER`).
    FILE_VERSION,
    /// Overall file version as a display string (`STRFILEVER`).
    FILE_VERSION_STR = 1, 23, 100, 0
);

version_family!(
    /// Overall product version (`PRODUCTVER`).
    PRODUCT_VERSION,
    /// Overall product version as a display string (`STRPRODUCTVER`).
    PRODUCT_VERSION_STR = 1, 23, 100, 0
);

pub const COPYRIGHT: &str = "Copyright (C) 2025 Intel Corporation";
pub const COMPANY_NAME: &str = "Intel Corporation";
pub const PRODUCT_NAME: &str = "Intel® Software Guard Extensions";

pub const DEFAULT_QPL_VERSION: &str = "1.13.110.0";
pub const QUOTE_VERIFIER_VERSION: &str = "1.13.103.0";
pub const QUOTE_LOADER_VERSION: &str = "1.11.110.0";
pub const TDQE_WRAPPER_VERSION: &str = "1.14.110.0";
pub const PCE_WRAPPER_VERSION: &str = "1.14.110.0";

pub const QE3_VERSION: &str = "1.22.100.1";
pub const QVE_VERSION: &str = "1.22.100.1";
pub const IDE_VERSION: &str = "1.22.100.1";
pub const TDQE_VERSION: &str = "1.22.100.1";
pub const QAE_VERSION: &str = "1.22.100.1";

/// Version families exposed in both numeric and string form, as
/// `(tuple, string)` pairs.
pub const VERSION_FAMILIES: [(VersionName, VersionName); 2] = [
    (VersionName::FileVer, VersionName::StrFileVer),
    (VersionName::ProductVer, VersionName::StrProductVer),
];

/// Canonical identifiers of the table, in declaration order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    EnumCount,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum VersionName {
    #[strum(serialize = "STRFILEVER")]
    StrFileVer,
    #[strum(serialize = "COPYRIGHT")]
    Copyright,
    #[strum(serialize = "FILEVER")]
    FileVer,
    #[strum(serialize = "PRODUCTVER")]
    ProductVer,
    #[strum(serialize = "STRPRODUCTVER")]
    StrProductVer,
    #[strum(serialize = "COMPANYNAME")]
    CompanyName,
    #[strum(serialize = "PRODUCTNAME")]
    ProductName,
    #[strum(serialize = "DEFAULT_QPL_VERSION")]
    DefaultQplVersion,
    #[strum(serialize = "QUOTE_VERIFIER_VERSION")]
    QuoteVerifierVersion,
    #[strum(serialize = "QUOTE_LOADER_VERSION")]
    QuoteLoaderVersion,
    #[strum(serialize = "TDQE_WRAPPER_VERSION")]
    TdqeWrapperVersion,
    #[strum(serialize = "PCE_WRAPPER_VERSION")]
    PceWrapperVersion,
    #[strum(serialize = "QE3_VERSION")]
    Qe3Version,
    #[strum(serialize = "QVE_VERSION")]
    QveVersion,
    #[strum(serialize = "IDE_VERSION")]
    IdeVersion,
    #[strum(serialize = "TDQE_VERSION")]
    TdqeVersion,
    #[strum(serialize = "QAE_VERSION")]
    QaeVersion,
}

impl VersionName {
    /// Canonical upper-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Literal value bound to this name.
    #[must_use]
    pub const fn value(self) -> VersionValue {
        use VersionValue::{Text, Tuple};
        match self {
            VersionName::StrFileVer => Text(FILE_VERSION_STR),
            VersionName::Copyright => Text(COPYRIGHT),
            VersionName::FileVer => Tuple(FILE_VERSION),
            VersionName::ProductVer => Tuple(PRODUCT_VERSION),
            VersionName::StrProductVer => Text(PRODUCT_VERSION_STR),
            VersionName::CompanyName => Text(COMPANY_NAME),
            VersionName::ProductName => Text(PRODUCT_NAME),
            VersionName::DefaultQplVersion => Text(DEFAULT_QPL_VERSION),
            VersionName::QuoteVerifierVersion => Text(QUOTE_VERIFIER_VERSION),
            VersionName::QuoteLoaderVersion => Text(QUOTE_LOADER_VERSION),
            VersionName::TdqeWrapperVersion => Text(TDQE_WRAPPER_VERSION),
            VersionName::PceWrapperVersion => Text(PCE_WRAPPER_VERSION),
            VersionName::Qe3Version => Text(QE3_VERSION),
            VersionName::QveVersion => Text(QVE_VERSION),
            VersionName::IdeVersion => Text(IDE_VERSION),
            VersionName::TdqeVersion => Text(TDQE_VERSION),
            VersionName::QaeVersion => Text(QAE_VERSION),
        }
    }

    /// Entry pairing this name with its value.
    #[must_use]
    pub const fn entry(self) -> VersionEntry {
        VersionEntry {
            name: self,
            value: self.value(),
        }
    }

    /// Whether the name carries a version rather than descriptive metadata.
    #[must_use]
    pub const fn is_version(self) -> bool {
        !matches!(
            self,
            VersionName::Copyright | VersionName::CompanyName | VersionName::ProductName
        )
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VersionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Value held by a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionValue {
    /// Display string or descriptive metadata.
    Text(&'static str),
    /// Numeric `(major, minor, revision, build)` tuple.
    Tuple(FileVersion),
}

impl VersionValue {
    /// Interpret the value as a numeric version, parsing text when needed.
    pub fn as_file_version(&self) -> Result<FileVersion, VersionError> {
        match self {
            VersionValue::Text(text) => text.parse(),
            VersionValue::Tuple(version) => Ok(*version),
        }
    }

    /// Borrow the text form, if this is a text value.
    #[must_use]
    pub const fn as_text(&self) -> Option<&'static str> {
        match self {
            VersionValue::Text(text) => Some(*text),
            VersionValue::Tuple(_) => None,
        }
    }

    /// Value as written in a version resource: tuples comma separated, text as is.
    #[must_use]
    pub fn resource_form(&self) -> String {
        match self {
            VersionValue::Text(text) => (*text).to_owned(),
            VersionValue::Tuple(version) => version.resource_tuple(),
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionValue::Text(text) => f.write_str(text),
            VersionValue::Tuple(version) => version.fmt(f),
        }
    }
}

impl Serialize for VersionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single `name -> value` mapping of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// Canonical identifier.
    pub name: VersionName,
    /// Literal value.
    pub value: VersionValue,
}

/// Every entry of the table in declaration order.
pub fn entries() -> impl Iterator<Item = VersionEntry> {
    VersionName::iter().map(VersionName::entry)
}

/// Number of entries in the table.
pub const ENTRY_COUNT: usize = VersionName::COUNT;

/// Look up an entry by its canonical identifier (ASCII case-insensitive).
#[must_use]
pub fn lookup(name: &str) -> Option<VersionEntry> {
    name.trim().parse::<VersionName>().ok().map(VersionName::entry)
}
