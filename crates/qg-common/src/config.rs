//! ---
//! qg_section: "03-configuration"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Shared configuration for the version tooling."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use qg_logging::LoggingConfig;
use qg_versioning::pcs::{self, PcsApiVersion};
use qg_versioning::resource::{FileType, RenderOptions, ResourceFormat};
use serde::{Deserialize, Serialize};

fn default_api_version() -> u32 {
    PcsApiVersion::default().number()
}

/// Primary configuration object for the version tooling.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub pcs: PcsConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and defaults apply.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "QG_CONFIG";
    pub const DEFAULT_CANDIDATES: [&str; 2] = ["configs/qg-version.toml", "qg-version.toml"];

    /// Load configuration, respecting an explicit path and the `QG_CONFIG`
    /// override before falling back to `candidates`.
    pub fn load<P: AsRef<Path>>(explicit: Option<&Path>, candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(explicit, candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// An explicit path or `QG_CONFIG` must exist; candidates are optional and
    /// defaults are used when none of them exist.
    pub fn load_with_source<P: AsRef<Path>>(
        explicit: Option<&Path>,
        candidates: &[P],
    ) -> Result<LoadedAppConfig> {
        if let Some(path) = explicit {
            return Self::loaded_from(path.to_path_buf());
        }

        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                return Self::loaded_from(PathBuf::from(env_path));
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                return Self::loaded_from(candidate.as_ref().to_path_buf());
            }
        }

        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    fn loaded_from(path: PathBuf) -> Result<LoadedAppConfig> {
        let config = Self::from_path(&path)?;
        Ok(LoadedAppConfig {
            config,
            source: Some(path),
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.pcs.validate()?;
        self.render.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
    #[serde(default)]
    pub format: ResourceFormat,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_type: FileType,
    /// Directory for rendered files when no explicit output path is given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(anyhow!("render.description must not be blank"));
            }
        }
        Ok(())
    }

    /// Renderer options derived from this section.
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            description: self.description.clone(),
            file_type: self.file_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PcsConfig {
    #[serde(default = "default_api_version")]
    pub api_version: u32,
}

impl Default for PcsConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
        }
    }
}

impl PcsConfig {
    pub fn validate(&self) -> Result<()> {
        if !pcs::startup_check(self.api_version) {
            return Err(anyhow!(
                "pcs.api_version {} is not supported. Should be 3 or 4",
                self.api_version
            ));
        }
        Ok(())
    }

    /// Configured API version, validated.
    pub fn api_version(&self) -> Result<PcsApiVersion> {
        Ok(PcsApiVersion::try_from(self.api_version)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qg_logging::LogFormat;

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = "".parse().expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pcs.api_version().expect("v4"), PcsApiVersion::V4);
        assert_eq!(config.render.format, ResourceFormat::Rc);
    }

    #[test]
    fn parses_all_sections() {
        let config: AppConfig = r#"
            [logging]
            format = "structured-json"
            file_enabled = true

            [render]
            format = "header"
            description = "Quote provider library"
            file_type = "app"

            [pcs]
            api_version = 3
        "#
        .parse()
        .expect("valid config");
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert!(config.logging.file_enabled);
        assert_eq!(config.render.format, ResourceFormat::Header);
        assert_eq!(config.render.options().file_type, FileType::App);
        assert_eq!(config.pcs.api_version().expect("v3"), PcsApiVersion::V3);
    }

    #[test]
    fn rejects_unsupported_api_version() {
        let err = "[pcs]\napi_version = 2\n"
            .parse::<AppConfig>()
            .expect_err("v2 unsupported");
        assert!(err.to_string().contains("pcs.api_version 2"));
    }

    #[test]
    fn rejects_blank_description() {
        assert!("[render]\ndescription = \"  \"\n".parse::<AppConfig>().is_err());
    }

    #[test]
    fn explicit_path_takes_precedence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("qg.toml");
        fs::write(&path, "[render]\nformat = \"json\"\n").expect("write config");
        let loaded = AppConfig::load_with_source(Some(&path), &["does/not/exist.toml"])
            .expect("load");
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.render.format, ResourceFormat::Json);
    }

    #[test]
    fn first_existing_candidate_is_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("configs").join("qg-version.toml");
        let present = dir.path().join("qg-version.toml");
        fs::write(&present, "[pcs]\napi_version = 3\n").expect("write config");

        let loaded = AppConfig::load_with_source(None, &[&missing, &present]).expect("load");
        assert_eq!(loaded.source.as_deref(), Some(present.as_path()));
        assert_eq!(loaded.config.pcs.api_version, 3);
    }

    #[test]
    fn no_candidates_yield_defaults_without_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = AppConfig::load_with_source(None, &[dir.path().join("absent.toml")])
            .expect("defaults");
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config, AppConfig::default());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = AppConfig::load::<&str>(Some(Path::new("does/not/exist.toml")), &[])
            .expect_err("missing file");
        assert!(err.to_string().contains("unable to read config file"));
    }
}
