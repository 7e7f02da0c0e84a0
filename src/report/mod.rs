//! Resolver records returned by the leak test service and their text rendering.
//!
//! The service reports one record per observation, so a resolver that answered for
//! several probes shows up several times, sometimes with different or placeholder
//! metadata. [`merge`] folds those into one [`CanonicalResolverRecord`] per address and
//! [`render`] turns the result into the numbered list printed at the end of a run.

use crate::utils::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

pub mod merge;
pub mod render;

pub use merge::*;
pub use render::*;

/// Placeholder the service uses when it has no ISP for a resolver.
pub const UNKNOWN_ISP: &str = "Unknown isp";
/// Placeholder the service uses when it has no city for a resolver.
pub const UNKNOWN_CITY: &str = "Unknown city";
/// Placeholder the service uses when it has no country for a resolver.
pub const UNKNOWN_COUNTRY: &str = "Unknown country";
/// Hostname the service sends when the resolver has no reverse DNS entry.
pub const HOSTNAME_NONE: &str = "None";
/// Hostname shown for resolvers without a reverse DNS entry.
pub const NO_PTR: &str = "No PTR";

/// One observation as sent by the service.
///
/// The four metadata fields are `None` when the key is missing or null; an empty string
/// or the service's placeholder is kept as-is and classified by [`acceptable_value`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawResolverRecord {
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The merged view of one resolver address.
///
/// `isp`, `city` and `country` hold `Some("")` once the service has reported the field
/// without a usable value; `None` means it was never reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalResolverRecord {
    pub ip_address: String,
    pub isp: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub hostname: Option<String>,
    pub extra: Map<String, Value>,
}

impl CanonicalResolverRecord {
    pub fn new(ip_address: &str) -> Self {
        Self {
            ip_address: ip_address.to_string(),
            ..Default::default()
        }
    }

    pub fn isp(&self) -> Option<&str> {
        self.isp.as_deref().and_then(|v| acceptable_value(v, UNKNOWN_ISP))
    }

    pub fn city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .and_then(|v| acceptable_value(v, UNKNOWN_CITY))
    }

    pub fn country(&self) -> Option<&str> {
        self.country
            .as_deref()
            .and_then(|v| acceptable_value(v, UNKNOWN_COUNTRY))
    }

    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(NO_PTR)
    }
}

/// Returns `value` unless it is empty or equal to the service's `placeholder`.
pub fn acceptable_value<'a>(value: &'a str, placeholder: &str) -> Option<&'a str> {
    if value.is_empty() || value == placeholder {
        None
    } else {
        Some(value)
    }
}

/// Decodes the body of a `servers-for-result` response.
pub fn decode_records(body: &[u8]) -> Result<Vec<RawResolverRecord>> {
    Ok(serde_json::from_slice(body)?)
}
