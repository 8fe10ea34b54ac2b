//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "build"
//! qg_type: "source"
//! qg_scope: "build"
//! qg_description: "Captures build metadata for version banners."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Outside a git checkout vergen emits VERGEN_IDEMPOTENT_OUTPUT for the
    // git values; BuildInfo maps that marker to UNKNOWN.
    EmitBuilder::builder()
        .build_timestamp()
        .all_cargo()
        .all_git()
        .emit()?;

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
