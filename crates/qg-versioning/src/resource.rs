//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Renders the version table into embeddable artifacts."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
//! Rendering of the version table for the build steps that embed it.
//!
//! * [`ResourceFormat::Rc`] produces a `VERSIONINFO` resource script block.
//! * [`ResourceFormat::Header`] produces `#define` lines for C consumers.
//! * [`ResourceFormat::Json`] produces an ordered `name -> value` manifest.

use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::table::{
    self, VersionValue, COMPANY_NAME, COPYRIGHT, FILE_VERSION, FILE_VERSION_STR, PRODUCT_NAME,
    PRODUCT_VERSION, PRODUCT_VERSION_STR,
};

const HEADER_GUARD: &str = "QG_SE_VERSION_H";
const STRING_TABLE_LANG: &str = "040904b0";
/// Tells rc.exe the script is UTF-8.
const RC_CODE_PAGE: &str = "#pragma code_page(65001)";

/// Output formats understood by [`render`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceFormat {
    /// Windows resource script `VERSIONINFO` block.
    #[default]
    Rc,
    /// C preprocessor definitions.
    Header,
    /// JSON manifest.
    Json,
}

impl ResourceFormat {
    /// Conventional file extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ResourceFormat::Rc => "rc",
            ResourceFormat::Header => "h",
            ResourceFormat::Json => "json",
        }
    }
}

/// Binary type stamped into the `FILETYPE` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    App,
    #[default]
    Dll,
}

impl FileType {
    const fn code(self) -> u32 {
        match self {
            FileType::App => 0x1,
            FileType::Dll => 0x2,
        }
    }
}

/// Knobs for [`render`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// `FileDescription` string; defaults to the product name.
    pub description: Option<String>,
    pub file_type: FileType,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialise version manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to format resource output: {0}")]
    Fmt(#[from] fmt::Error),
}

/// Render the table in the requested format.
pub fn render(format: ResourceFormat, options: &RenderOptions) -> Result<String, RenderError> {
    match format {
        ResourceFormat::Rc => Ok(render_rc(options)?),
        ResourceFormat::Header => Ok(render_header()?),
        ResourceFormat::Json => render_json(),
    }
}

fn render_rc(options: &RenderOptions) -> Result<String, fmt::Error> {
    let description = options.description.as_deref().unwrap_or(PRODUCT_NAME);
    let strings = [
        ("CompanyName", COMPANY_NAME),
        ("FileDescription", description),
        ("FileVersion", FILE_VERSION_STR),
        ("LegalCopyright", COPYRIGHT),
        ("ProductName", PRODUCT_NAME),
        ("ProductVersion", PRODUCT_VERSION_STR),
    ];

    let mut out = String::new();
    writeln!(out, "{RC_CODE_PAGE}")?;
    writeln!(out)?;
    writeln!(out, "VS_VERSION_INFO VERSIONINFO")?;
    writeln!(out, " FILEVERSION {}", FILE_VERSION.resource_tuple())?;
    writeln!(out, " PRODUCTVERSION {}", PRODUCT_VERSION.resource_tuple())?;
    writeln!(out, " FILEFLAGSMASK 0x3fL")?;
    writeln!(out, " FILEFLAGS 0x0L")?;
    writeln!(out, " FILEOS 0x40004L")?;
    writeln!(out, " FILETYPE {:#x}L", options.file_type.code())?;
    writeln!(out, " FILESUBTYPE 0x0L")?;
    writeln!(out, "BEGIN")?;
    writeln!(out, "    BLOCK \"StringFileInfo\"")?;
    writeln!(out, "    BEGIN")?;
    writeln!(out, "        BLOCK \"{STRING_TABLE_LANG}\"")?;
    writeln!(out, "        BEGIN")?;
    for (key, value) in strings {
        writeln!(out, "            VALUE \"{key}\", \"{}\"", escape(value))?;
    }
    writeln!(out, "        END")?;
    writeln!(out, "    END")?;
    writeln!(out, "    BLOCK \"VarFileInfo\"")?;
    writeln!(out, "    BEGIN")?;
    writeln!(out, "        VALUE \"Translation\", 0x409, 1200")?;
    writeln!(out, "    END")?;
    writeln!(out, "END")?;
    Ok(out)
}

fn render_header() -> Result<String, fmt::Error> {
    let width = table::entries()
        .map(|e| e.name.as_str().len())
        .max()
        .unwrap_or_default()
        + 1;

    let mut out = String::new();
    writeln!(out, "#ifndef {HEADER_GUARD}")?;
    writeln!(out, "#define {HEADER_GUARD}")?;
    writeln!(out)?;
    for entry in table::entries() {
        let value = match entry.value {
            VersionValue::Text(text) => format!("\"{}\"", escape(text)),
            VersionValue::Tuple(version) => version.resource_tuple(),
        };
        writeln!(out, "#define {:<width$}{value}", entry.name.as_str())?;
    }
    writeln!(out)?;
    writeln!(out, "#endif /* {HEADER_GUARD} */")?;
    Ok(out)
}

fn render_json() -> Result<String, RenderError> {
    let manifest: IndexMap<&str, String> = table::entries()
        .map(|e| (e.name.as_str(), e.value.to_string()))
        .collect();
    Ok(serde_json::to_string_pretty(&manifest)?)
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_block_carries_tuples_and_strings() {
        let rc = render(ResourceFormat::Rc, &RenderOptions::default()).expect("render");
        assert!(rc.contains(" FILEVERSION 1,23,100,0\n"));
        assert!(rc.contains(" PRODUCTVERSION 1,23,100,0\n"));
        assert!(rc.contains(" FILETYPE 0x2L\n"));
        assert!(rc.contains("VALUE \"ProductName\", \"Intel® Software Guard Extensions\""));
        assert!(rc.contains("VALUE \"FileDescription\", \"Intel® Software Guard Extensions\""));
        assert!(rc.contains("VALUE \"FileVersion\", \"1.23.100.0\""));
        assert!(rc.trim_end().ends_with("END"));
    }

    #[test]
    fn rc_declares_utf8_code_page_before_version_block() {
        let rc = render(ResourceFormat::Rc, &RenderOptions::default()).expect("render");
        assert_eq!(rc.lines().next(), Some("#pragma code_page(65001)"));
        let pragma = rc.find("#pragma code_page(65001)").expect("pragma");
        let block = rc.find("VS_VERSION_INFO VERSIONINFO").expect("block");
        assert!(pragma < block);
    }

    #[test]
    fn rc_description_override_is_escaped() {
        let options = RenderOptions {
            description: Some("PCE \"wrapper\"".to_owned()),
            file_type: FileType::App,
        };
        let rc = render(ResourceFormat::Rc, &options).expect("render");
        assert!(rc.contains("VALUE \"FileDescription\", \"PCE \\\"wrapper\\\"\""));
        assert!(rc.contains(" FILETYPE 0x1L\n"));
    }

    #[test]
    fn header_quotes_strings_but_not_tuples() {
        let header = render(ResourceFormat::Header, &RenderOptions::default()).expect("render");
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.first(), Some(&"#ifndef QG_SE_VERSION_H"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("#define FILEVER ") && l.ends_with(" 1,23,100,0")));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("#define QE3_VERSION ") && l.ends_with(" \"1.22.100.1\"")));
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("#define ")).count(),
            table::ENTRY_COUNT + 1
        );
    }

    #[test]
    fn json_manifest_keeps_table_order() {
        let json = render(ResourceFormat::Json, &RenderOptions::default()).expect("render");
        let parsed: IndexMap<String, String> = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.len(), table::ENTRY_COUNT);
        assert_eq!(parsed.get_index(0).map(|(k, _)| k.as_str()), Some("STRFILEVER"));
        assert_eq!(parsed["FILEVER"], "1.23.100.0");
        assert_eq!(parsed["QAE_VERSION"], "1.22.100.1");
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("RC".parse::<ResourceFormat>(), Ok(ResourceFormat::Rc));
        assert_eq!(ResourceFormat::Header.to_string(), "header");
        assert_eq!(ResourceFormat::Json.extension(), "json");
    }
}
