//! ---
//! qg_section: "04-interfaces"
//! qg_subsection: "binary"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Control CLI for querying and rendering the version table."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use qg_common::config::RenderConfig;
use qg_logging::{log_system_event, LogContext, SystemEventOutcome};
use qg_versioning::resource::{self, FileType, ResourceFormat};

const OUTPUT_STEM: &str = "se_version";

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Output format; defaults to the configured one.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Write to this file instead of stdout or the configured directory.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
    /// FileDescription string for resource scripts.
    #[arg(long, value_name = "TEXT")]
    description: Option<String>,
    /// Binary type stamped into resource scripts.
    #[arg(long = "file-type", value_enum)]
    file_type: Option<FileTypeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Rc,
    Header,
    Json,
}

impl From<FormatArg> for ResourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Rc => ResourceFormat::Rc,
            FormatArg::Header => ResourceFormat::Header,
            FormatArg::Json => ResourceFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FileTypeArg {
    App,
    Dll,
}

impl From<FileTypeArg> for FileType {
    fn from(value: FileTypeArg) -> Self {
        match value {
            FileTypeArg::App => FileType::App,
            FileTypeArg::Dll => FileType::Dll,
        }
    }
}

pub fn run(args: &RenderArgs, config: &RenderConfig) -> Result<()> {
    let format = args.format.map(ResourceFormat::from).unwrap_or(config.format);
    let mut options = config.options();
    if let Some(description) = &args.description {
        options.description = Some(description.clone());
    }
    if let Some(file_type) = args.file_type {
        options.file_type = file_type.into();
    }

    let rendered = resource::render(format, &options)?;

    let target = args.output.clone().or_else(|| {
        config
            .output_dir
            .as_ref()
            .map(|dir| dir.join(format!("{OUTPUT_STEM}.{}", format.extension())))
    });
    let Some(path) = target else {
        print!("{rendered}");
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("unable to create {}", parent.display()))?;
    }
    fs::write(&path, &rendered)
        .with_context(|| format!("unable to write {}", path.display()))?;

    let format_name = format.to_string();
    let ctx = LogContext::new().with_operation(&format_name);
    log_system_event(
        Some(&ctx),
        "render.write",
        &format!("rendered version table to {}", path.display()),
        SystemEventOutcome::Success,
    );
    Ok(())
}
