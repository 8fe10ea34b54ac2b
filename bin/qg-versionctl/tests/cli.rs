//! ---
//! qg_section: "05-testing"
//! qg_subsection: "integration-tests"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "End-to-end tests for the version control CLI."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use std::fs;

use assert_cmd::Command;

fn versionctl() -> Command {
    let mut cmd = Command::cargo_bin("qg-versionctl").expect("binary built");
    cmd.env_remove("QG_CONFIG").env("QG_LOG", "error");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("command runs");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn get_prints_component_version() {
    let out = stdout_of(versionctl().args(["get", "QE3_VERSION"]));
    assert_eq!(out, "1.22.100.1\n");
}

#[test]
fn get_tuple_form_of_product_version() {
    let out = stdout_of(versionctl().args(["get", "productver", "--tuple"]));
    assert_eq!(out, "1,23,100,0\n");
}

#[test]
fn get_unknown_name_fails() {
    let output = versionctl()
        .args(["get", "NOPE"])
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown version name: NOPE"), "{stderr}");
}

#[test]
fn list_json_contains_every_entry() {
    let out = stdout_of(versionctl().args(["list", "--json"]));
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("json output");
    let object = parsed.as_object().expect("object");
    assert_eq!(object.len(), qg_versioning::table::ENTRY_COUNT);
    assert_eq!(object["PRODUCTNAME"], "Intel® Software Guard Extensions");
}

#[test]
fn check_succeeds_on_shipped_table() {
    let out = stdout_of(versionctl().arg("check"));
    assert!(out.contains("ok  FILEVER == STRFILEVER (1.23.100.0)"));
    assert!(out.contains("ok  PRODUCTVER == STRPRODUCTVER (1.23.100.0)"));
}

#[test]
fn component_lookup_by_slug() {
    let out = stdout_of(versionctl().args(["component", "pce-wrapper"]));
    assert!(out.starts_with("pce-wrapper"));
    assert!(out.contains("1.14.110.0"));
}

#[test]
fn render_writes_resource_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out").join("version.rc");
    stdout_of(versionctl().args([
        "render",
        "--format",
        "rc",
        "--description",
        "Quote provider library",
        "--output",
        path.to_str().expect("utf8 path"),
    ]));
    let rc = fs::read_to_string(&path).expect("rc written");
    assert!(rc.contains(" FILEVERSION 1,23,100,0"));
    assert!(rc.contains("VALUE \"FileDescription\", \"Quote provider library\""));
}

#[test]
fn render_uses_configured_format_and_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = dir.path().join("generated");
    let config = dir.path().join("qg.toml");
    fs::write(
        &config,
        format!(
            "[render]\nformat = \"header\"\noutput_dir = {:?}\n",
            out_dir.to_str().expect("utf8 path")
        ),
    )
    .expect("config written");
    stdout_of(versionctl().args(["render", "--config", config.to_str().expect("utf8 path")]));
    let header = fs::read_to_string(out_dir.join("se_version.h")).expect("header written");
    assert!(header.contains("#define STRFILEVER"));
}

#[test]
fn config_path_from_environment_selects_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("env.toml");
    fs::write(&config, "[render]\nformat = \"json\"\n").expect("config written");
    let out = stdout_of(versionctl().env("QG_CONFIG", &config).arg("render"));
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(parsed["QE3_VERSION"], "1.22.100.1");
}

#[test]
fn blank_config_env_falls_back_to_candidate_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("qg-version.toml"),
        "[render]\nformat = \"header\"\n",
    )
    .expect("config written");
    let out = stdout_of(
        versionctl()
            .current_dir(dir.path())
            .env("QG_CONFIG", "  ")
            .arg("render"),
    );
    assert!(out.starts_with("#ifndef QG_SE_VERSION_H"), "{out}");
}

#[test]
fn missing_config_from_environment_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = versionctl()
        .env("QG_CONFIG", dir.path().join("absent.toml"))
        .arg("list")
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unable to read config file"), "{stderr}");
}

#[test]
fn pcs_api_resolves_issuer_chain_header() {
    let out = stdout_of(versionctl().args([
        "pcs-api",
        "https://localhost:8081/sgx/certification/v3/tcb?fmspc=00906ED50000",
    ]));
    assert!(out.contains("api-version: v3"));
    assert!(out.contains("tcb-info-issuer-chain: SGX-TCB-Info-Issuer-Chain"));
}

#[test]
fn pcs_api_empty_url_uses_configured_version() {
    let out = stdout_of(versionctl().args(["pcs-api", "", "--identity", "tdqe"]));
    assert!(out.contains("api-version: v4"));
    assert!(out.contains("identity-path: /tdx/certification/v4/qe/identity"));
}

#[test]
fn crl_accepts_intermediate_distribution_point() {
    let out = stdout_of(versionctl().args([
        "crl",
        "https://api.trustedservices.intel.com/sgx/certification/v4/pckcrl?ca=processor",
    ]));
    assert!(out.contains("crl-kind: intermediate"));
    assert!(out.contains("api-version: v4"));
}

#[test]
fn crl_json_for_root_ca() {
    let out = stdout_of(versionctl().args([
        "crl",
        "--json",
        "https://certificates.trustedservices.intel.com/IntelSGXRootCA.der",
    ]));
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(parsed["kind"], "root");
    assert!(parsed["api_version"].is_null());
}

#[test]
fn crl_rejects_foreign_host() {
    let output = versionctl()
        .args(["crl", "https://example.com/IntelSGXRootCA.der"])
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CRL uri is not valid"), "{stderr}");
}

#[test]
fn version_flag_prints_banner() {
    let out = stdout_of(versionctl().arg("-V"));
    assert!(out.starts_with("Intel® Software Guard Extensions 1.23.100.0"));
    assert_eq!(out.lines().count(), 5);
    assert!(!out.contains("VERGEN_IDEMPOTENT_OUTPUT"));
}

#[test]
fn configuration_source_is_logged_after_tracing_starts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("qg.toml");
    fs::write(&config, "[pcs]\napi_version = 4\n").expect("config written");
    let output = versionctl()
        .env("QG_LOG", "debug")
        .args(["list", "--config", config.to_str().expect("utf8 path")])
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration loaded"), "{stderr}");
    assert!(stderr.contains("qg.toml"), "{stderr}");
}
