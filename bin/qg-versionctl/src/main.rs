//! ---
//! qg_section: "04-interfaces"
//! qg_subsection: "binary"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Control CLI for querying and rendering the version table."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use qg_common::config::AppConfig;
use qg_versioning::build_info::clap_long_version;
use tracing::debug;

mod pcs;
mod query;
mod render;

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Quote Generation version table utility",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
    /// Configuration file (overrides QG_CONFIG and the default locations).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "List every entry of the version table")]
    List(query::ListArgs),
    #[command(about = "Print the value of a single entry")]
    Get(query::GetArgs),
    #[command(about = "Show component versions")]
    Component(query::ComponentArgs),
    #[command(about = "Verify the version table is consistent")]
    Check(query::CheckArgs),
    #[command(about = "Render the table as a resource script, header or manifest")]
    Render(render::RenderArgs),
    #[command(name = "pcs-api", about = "Resolve the PCS API version of a request URL")]
    PcsApi(pcs::PcsArgs),
    #[command(about = "Validate a CRL distribution point URI")]
    Crl(pcs::CrlArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", clap_long_version());
        return Ok(());
    }
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let loaded = AppConfig::load_with_source(cli.config.as_deref(), &AppConfig::DEFAULT_CANDIDATES)?;
    qg_common::init_tracing(env!("CARGO_PKG_NAME"), &loaded.config.logging)?;
    debug!(
        source = %loaded
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_owned()),
        "configuration loaded"
    );
    let config = loaded.config;

    match command {
        Commands::List(args) => query::list(&args)?,
        Commands::Get(args) => query::get(&args)?,
        Commands::Component(args) => query::component(&args)?,
        Commands::Check(args) => query::check(&args)?,
        Commands::Render(args) => render::run(&args, &config.render)?,
        Commands::PcsApi(args) => pcs::run(&args, &config.pcs)?,
        Commands::Crl(args) => pcs::run_crl(&args)?,
    }
    Ok(())
}
