//! ---
//! qg_section: "04-interfaces"
//! qg_subsection: "binary"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Control CLI for querying and rendering the version table."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use anyhow::{anyhow, Result};
use clap::Args;
use indexmap::IndexMap;
use qg_logging::{log_system_event, qg_debug, LogContext, SystemEventOutcome};
use qg_versioning::{lookup, table, verify, Component, FileVersion, VersionValue};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Emit a JSON object instead of aligned text.
    #[arg(long)]
    json: bool,
    /// Skip descriptive metadata (copyright, company, product name).
    #[arg(long)]
    versions_only: bool,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Canonical name, e.g. QE3_VERSION (case-insensitive).
    #[arg(value_name = "NAME")]
    name: String,
    /// Print versions in the comma separated resource form.
    #[arg(long)]
    tuple: bool,
}

#[derive(Debug, Args)]
pub struct ComponentArgs {
    /// Component slug, e.g. qe3 or pce-wrapper. Lists all when omitted.
    #[arg(value_name = "SLUG")]
    slug: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Emit the consistency report as JSON.
    #[arg(long)]
    json: bool,
}

pub fn list(args: &ListArgs) -> Result<()> {
    let entries: Vec<_> = table::entries()
        .filter(|e| !args.versions_only || e.name.is_version())
        .collect();
    if args.json {
        let map: IndexMap<&str, String> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.to_string()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }
    let width = entries
        .iter()
        .map(|e| e.name.as_str().len())
        .max()
        .unwrap_or_default();
    for entry in entries {
        println!("{:<width$}  {}", entry.name.as_str(), entry.value);
    }
    Ok(())
}

pub fn get(args: &GetArgs) -> Result<()> {
    let entry = lookup(&args.name).ok_or_else(|| anyhow!("unknown version name: {}", args.name))?;
    let ctx = LogContext::new().with_operation("get");
    qg_debug!(context = ctx, "resolved {}", entry.name);
    let rendered = match (args.tuple, entry.value) {
        (false, value) => value.to_string(),
        (true, VersionValue::Tuple(version)) => version.resource_tuple(),
        (true, VersionValue::Text(text)) => text
            .parse::<FileVersion>()
            .map_err(|err| anyhow!("{} has no tuple form: {err}", entry.name))?
            .resource_tuple(),
    };
    println!("{rendered}");
    Ok(())
}

#[derive(Debug, Serialize)]
struct ComponentRow {
    component: Component,
    kind: String,
    name: &'static str,
    label: &'static str,
    version: FileVersion,
}

pub fn component(args: &ComponentArgs) -> Result<()> {
    let selected: Vec<Component> = match &args.slug {
        Some(slug) => vec![slug
            .parse::<Component>()
            .map_err(|_| anyhow!("unknown component: {slug}"))?],
        None => Component::all().collect(),
    };

    let mut rows = Vec::with_capacity(selected.len());
    for component in selected {
        rows.push(ComponentRow {
            component,
            kind: component.kind().to_string(),
            name: component.version_name().as_str(),
            label: component.label(),
            version: component.version()?,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in rows {
        println!(
            "{:<15} {:<8} {:<12} {}",
            row.component.slug(),
            row.kind,
            row.version.to_string(),
            row.label
        );
    }
    Ok(())
}

pub fn check(args: &CheckArgs) -> Result<()> {
    let ctx = LogContext::new().with_operation("check");
    match verify() {
        Ok(report) => {
            log_system_event(
                Some(&ctx),
                "table.check",
                "version table consistent",
                SystemEventOutcome::Success,
            );
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for family in &report.families {
                    println!("ok  {} == {} ({})", family.tuple, family.text, family.version);
                }
                println!(
                    "ok  {} names unique, {} versions well-formed",
                    report.names_checked, report.versions_checked
                );
            }
            Ok(())
        }
        Err(err) => {
            log_system_event(
                Some(&ctx),
                "table.check",
                &err.to_string(),
                SystemEventOutcome::Fault,
            );
            Err(err.into())
        }
    }
}
