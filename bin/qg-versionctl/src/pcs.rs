//! ---
//! qg_section: "04-interfaces"
//! qg_subsection: "binary"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Control CLI for querying and rendering the version table."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use anyhow::Result;
use clap::Args;
use qg_common::config::PcsConfig;
use qg_logging::{qg_info, LogContext};
use qg_versioning::pcs::{api_version_from_url, validate_crl_uri, EnclaveIdentity, UpdateType};
use qg_versioning::Component;

#[derive(Debug, Args)]
pub struct PcsArgs {
    /// Request URL or path; an empty value falls back to the configured version.
    #[arg(value_name = "URL")]
    url: String,
    /// Also print the identity path for this component (qe3, qve, tdqe).
    #[arg(long, value_name = "SLUG")]
    identity: Option<String>,
    /// Collateral update channel used for the identity path.
    #[arg(long, default_value = "standard")]
    update: String,
}

#[derive(Debug, Args)]
pub struct CrlArgs {
    /// CRL distribution point URI to validate.
    #[arg(value_name = "URI")]
    uri: String,
    /// Emit the accepted URI as JSON.
    #[arg(long)]
    json: bool,
}

pub fn run(args: &PcsArgs, config: &PcsConfig) -> Result<()> {
    let version = match api_version_from_url(&args.url)? {
        Some(version) => version,
        None => config.api_version()?,
    };
    println!("api-version: {version}");
    println!(
        "tcb-info-issuer-chain: {}",
        version.tcb_info_issuer_chain_header()
    );
    println!(
        "enclave-identity-issuer-chain: {}",
        version.enclave_identity_issuer_chain_header()
    );

    if let Some(slug) = &args.identity {
        let component: Component = slug
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown component: {slug}"))?;
        let identity = EnclaveIdentity::for_component(component)
            .ok_or_else(|| anyhow::anyhow!("{slug} has no published enclave identity"))?;
        let update: UpdateType = args.update.parse()?;
        println!("identity-path: {}", identity.path(version, update)?);
    }
    Ok(())
}

pub fn run_crl(args: &CrlArgs) -> Result<()> {
    let crl = validate_crl_uri(&args.uri)?;
    let ctx = LogContext::new().with_operation("crl");
    qg_info!(context = ctx, "accepted {} CRL uri", crl.kind);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&crl)?);
        return Ok(());
    }
    println!("crl-kind: {}", crl.kind);
    println!("uri: {}", crl.uri);
    if let Some(version) = crl.api_version {
        println!("api-version: v{version}");
    }
    Ok(())
}
