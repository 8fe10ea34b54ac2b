//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Consistency checks over the version table."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use std::collections::HashSet;

use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::file_version::FileVersion;
use crate::table::{VersionName, VersionValue, VERSION_FAMILIES};

/// A string/tuple pair confirmed to describe the same version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedFamily {
    pub tuple: VersionName,
    pub text: VersionName,
    pub version: FileVersion,
}

/// Outcome of a successful [`verify`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    /// Families whose two representations agree.
    pub families: Vec<CheckedFamily>,
    /// Version entries that parsed as four-part versions.
    pub versions_checked: usize,
    /// Distinct canonical names.
    pub names_checked: usize,
}

/// Check that the table is internally consistent.
///
/// Stops at the first failure.
pub fn verify() -> TableResult<ConsistencyReport> {
    let names_checked = check_unique_names(VersionName::iter())?;
    let mut families = Vec::with_capacity(VERSION_FAMILIES.len());
    for (tuple, text) in VERSION_FAMILIES {
        families.push(check_family(tuple, tuple.value(), text, text.value())?);
    }

    let mut versions_checked = 0;
    for name in VersionName::iter().filter(|n| n.is_version()) {
        name.value()
            .as_file_version()
            .map_err(|source| TableError::InvalidComponent { name, source })?;
        versions_checked += 1;
    }

    Ok(ConsistencyReport {
        families,
        versions_checked,
        names_checked,
    })
}

/// Compare the tuple and string forms of one version family.
pub fn check_family(
    tuple: VersionName,
    tuple_value: VersionValue,
    text: VersionName,
    text_value: VersionValue,
) -> TableResult<CheckedFamily> {
    let VersionValue::Tuple(version) = tuple_value else {
        return Err(TableError::UnexpectedKind(tuple, "tuple"));
    };
    let Some(expected) = text_value.as_text() else {
        return Err(TableError::UnexpectedKind(text, "string"));
    };
    let formatted = version.to_string();
    if formatted != expected {
        return Err(TableError::Mismatch {
            tuple,
            text,
            formatted,
            expected: expected.to_owned(),
        });
    }
    debug!(%tuple, %text, version = %formatted, "version family consistent");
    Ok(CheckedFamily {
        tuple,
        text,
        version,
    })
}

/// Ensure no two names share a canonical identifier; returns the distinct count.
pub fn check_unique_names<I>(names: I) -> TableResult<usize>
where
    I: IntoIterator<Item = VersionName>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(TableError::DuplicateName(name));
        }
    }
    Ok(seen.len())
}
