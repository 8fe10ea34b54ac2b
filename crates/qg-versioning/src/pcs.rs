//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Provisioning certification service API versioning."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
//! Resolution of the provisioning certification service (PCS) API version a
//! request targets, and the version-dependent names that follow from it.
//!
//! Only `v3` and `v4` are served. Everything here is syntactic; no request
//! is ever issued.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use url::Url;

use crate::component::Component;

/// Issuer chain header for TCB info under the v3 API.
pub const SGX_TCB_INFO_ISSUER_CHAIN: &str = "SGX-TCB-Info-Issuer-Chain";
/// Issuer chain header for TCB info under the v4 API.
pub const TCB_INFO_ISSUER_CHAIN: &str = "TCB-Info-Issuer-Chain";
/// Issuer chain header for enclave identities, identical across versions.
pub const SGX_ENCLAVE_IDENTITY_ISSUER_CHAIN: &str = "SGX-Enclave-Identity-Issuer-Chain";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcsError {
    #[error("unsupported PCS API version in '{0}'")]
    UnsupportedApiVersion(String),
    #[error("PCS API version {0} is not supported, expected 3 or 4")]
    UnsupportedConfiguredVersion(u32),
    #[error("invalid update type '{0}', expected standard or early")]
    InvalidUpdateType(String),
    #[error("{0} identity requires PCS API v4")]
    IdentityRequiresV4(EnclaveIdentity),
    #[error("CRL uri is not valid: '{0}'")]
    InvalidCrlUri(String),
    #[error("CRL uri is {0} bytes long, the limit is {max}", max = MAX_URL_LENGTH)]
    CrlUriTooLong(usize),
}

/// Supported PCS API versions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum PcsApiVersion {
    V3,
    #[default]
    V4,
}

impl PcsApiVersion {
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            PcsApiVersion::V3 => 3,
            PcsApiVersion::V4 => 4,
        }
    }

    /// Header carrying the TCB info issuer chain for this version.
    #[must_use]
    pub const fn tcb_info_issuer_chain_header(self) -> &'static str {
        match self {
            PcsApiVersion::V3 => SGX_TCB_INFO_ISSUER_CHAIN,
            PcsApiVersion::V4 => TCB_INFO_ISSUER_CHAIN,
        }
    }

    /// Header carrying the enclave identity issuer chain for this version.
    #[must_use]
    pub const fn enclave_identity_issuer_chain_header(self) -> &'static str {
        SGX_ENCLAVE_IDENTITY_ISSUER_CHAIN
    }
}

impl TryFrom<u32> for PcsApiVersion {
    type Error = PcsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(PcsApiVersion::V3),
            4 => Ok(PcsApiVersion::V4),
            other => Err(PcsError::UnsupportedConfiguredVersion(other)),
        }
    }
}

impl From<PcsApiVersion> for u32 {
    fn from(value: PcsApiVersion) -> Self {
        value.number()
    }
}

impl fmt::Display for PcsApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Resolve the API version a request URL targets.
///
/// Accepts absolute URLs or bare paths. An empty input yields `Ok(None)`.
/// The first `/v<N>/` anywhere in the input decides, query text included;
/// a missing segment or any `N` other than 3 or 4 is an error.
pub fn api_version_from_url(input: &str) -> Result<Option<PcsApiVersion>, PcsError> {
    if input.is_empty() {
        return Ok(None);
    }
    let unsupported = || PcsError::UnsupportedApiVersion(input.to_owned());

    let pieces: Vec<&str> = input.split('/').collect();
    // A segment must sit between two slashes: skip the text before the first
    // slash and the text after the last one.
    let number = pieces
        .iter()
        .take(pieces.len().saturating_sub(1))
        .skip(1)
        .find_map(|piece| version_segment(piece))
        .ok_or_else(unsupported)?;

    number
        .parse::<u32>()
        .ok()
        .and_then(|n| PcsApiVersion::try_from(n).ok())
        .map(Some)
        .ok_or_else(unsupported)
}

fn version_segment(segment: &str) -> Option<&str> {
    let digits = segment.strip_prefix('v')?;
    let mut bytes = digits.bytes();
    match bytes.next() {
        Some(b'1'..=b'9') if bytes.all(|b| b.is_ascii_digit()) => Some(digits),
        _ => None,
    }
}

/// Validate the configured API version at startup, logging on failure.
pub fn startup_check(configured: u32) -> bool {
    match PcsApiVersion::try_from(configured) {
        Ok(_) => true,
        Err(err) => {
            error!(configured, "{err}");
            false
        }
    }
}

/// Collateral update channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    #[default]
    Standard,
    Early,
}

impl FromStr for UpdateType {
    type Err = PcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(UpdateType::Standard),
            "EARLY" => Ok(UpdateType::Early),
            _ => Err(PcsError::InvalidUpdateType(s.to_owned())),
        }
    }
}

/// Enclaves whose identity is published by the PCS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnclaveIdentity {
    Qe,
    Qve,
    TdQe,
}

impl EnclaveIdentity {
    /// Identity published for a component, if any.
    #[must_use]
    pub const fn for_component(component: Component) -> Option<Self> {
        match component {
            Component::Qe3 => Some(EnclaveIdentity::Qe),
            Component::Qve => Some(EnclaveIdentity::Qve),
            Component::Tdqe => Some(EnclaveIdentity::TdQe),
            _ => None,
        }
    }

    /// Request path for this identity.
    pub fn path(self, version: PcsApiVersion, update: UpdateType) -> Result<String, PcsError> {
        let base = match (self, version) {
            (EnclaveIdentity::Qe, _) => format!("/sgx/certification/{version}/qe/identity"),
            (EnclaveIdentity::Qve, _) => format!("/sgx/certification/{version}/qve/identity"),
            (EnclaveIdentity::TdQe, PcsApiVersion::V4) => {
                format!("/tdx/certification/{version}/qe/identity")
            }
            (EnclaveIdentity::TdQe, PcsApiVersion::V3) => {
                return Err(PcsError::IdentityRequiresV4(self));
            }
        };
        Ok(match update {
            UpdateType::Standard => base,
            UpdateType::Early => format!("{base}?update=early"),
        })
    }
}

impl fmt::Display for EnclaveIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnclaveIdentity::Qe => "QE",
            EnclaveIdentity::Qve => "QVE",
            EnclaveIdentity::TdQe => "TD_QE",
        })
    }
}

/// Longest CRL distribution point URI accepted.
pub const MAX_URL_LENGTH: usize = 2048;

const ROOT_CA_HOST_SUFFIX: &str = "certificates.trustedservices.intel.com";
const ROOT_CA_PROXY_HOST: &str = "certprx.adsdcsp.com";
const ROOT_CA_PATH_PREFIX: &str = "/IntelSGXRootCA.";
const PCS_HOST_SUFFIX: &str = "api.trustedservices.intel.com";
const PCS_PROXY_HOST_SUFFIXES: [&str; 2] = [".az.sgxprod.adsdcsp.com", ".az.sgxnp.adsdcsp.com"];

/// Which certificate authority a CRL distribution point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrlKind {
    /// Intel SGX root CA CRL.
    Root,
    /// PCK intermediate CA CRL served by the PCS.
    Intermediate,
}

impl fmt::Display for CrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CrlKind::Root => "root",
            CrlKind::Intermediate => "intermediate",
        })
    }
}

/// A CRL distribution point that passed [`validate_crl_uri`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrlUri {
    pub uri: Url,
    pub kind: CrlKind,
    /// `N` from `/sgx/certification/v<N>/pckcrl`; intermediate CRLs only.
    pub api_version: Option<u32>,
}

/// Check that `uri` names an Intel-operated CRL distribution point.
///
/// Two shapes are accepted, both over `https` with no port or credentials:
///
/// * root CA: `https://<label>certificates.trustedservices.intel.com/IntelSGXRootCA.<ext>`
///   or the same path on `certprx.adsdcsp.com`;
/// * intermediate CA: `https://[<label>.]api.trustedservices.intel.com/sgx/certification/v<N>/pckcrl?<query>`
///   or the same path on `<label>.az.sgx{prod,np}.adsdcsp.com`.
pub fn validate_crl_uri(uri: &str) -> Result<CrlUri, PcsError> {
    if uri.len() > MAX_URL_LENGTH {
        error!(length = uri.len(), "CRL uri is too long");
        return Err(PcsError::CrlUriTooLong(uri.len()));
    }
    let invalid = || {
        error!(uri, "CRL uri is not valid");
        PcsError::InvalidCrlUri(uri.to_owned())
    };
    if uri.is_empty() {
        return Err(invalid());
    }

    let parsed = Url::parse(uri).map_err(|_| invalid())?;
    if parsed.scheme() != "https"
        || parsed.port().is_some()
        || !parsed.username().is_empty()
        || parsed.password().is_some()
    {
        return Err(invalid());
    }
    let host = parsed.host_str().ok_or_else(invalid)?;

    if is_root_ca_host(host) && parsed.path().starts_with(ROOT_CA_PATH_PREFIX) {
        return Ok(CrlUri {
            uri: parsed,
            kind: CrlKind::Root,
            api_version: None,
        });
    }

    if is_pcs_host(host) && parsed.query().is_some() {
        if let Some(version) = pck_crl_version(parsed.path()) {
            return Ok(CrlUri {
                uri: parsed,
                kind: CrlKind::Intermediate,
                api_version: Some(version),
            });
        }
    }

    Err(invalid())
}

fn is_label(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_root_ca_host(host: &str) -> bool {
    host == ROOT_CA_PROXY_HOST || host.strip_suffix(ROOT_CA_HOST_SUFFIX).is_some_and(is_label)
}

fn is_pcs_host(host: &str) -> bool {
    if let Some(prefix) = host.strip_suffix(PCS_HOST_SUFFIX) {
        return is_label(prefix.strip_suffix('.').unwrap_or(prefix));
    }
    PCS_PROXY_HOST_SUFFIXES.iter().any(|suffix| {
        host.strip_suffix(suffix)
            .is_some_and(|label| !label.is_empty() && is_label(label))
    })
}

fn pck_crl_version(path: &str) -> Option<u32> {
    let version = path
        .strip_prefix("/sgx/certification/")?
        .strip_suffix("/pckcrl")?;
    version_segment(version)?.parse().ok()
}
