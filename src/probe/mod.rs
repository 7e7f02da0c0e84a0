//! Probe identifiers.
//!
//! Every run registers a batch of random identifiers with the leak test service and
//! then resolves `<identifier>.<suffix>` for each of them. The service's authoritative
//! nameserver sees which recursive resolvers asked, keyed by identifier, so identifiers
//! must never collide with those of other users running the test at the same time.
//!
//! # Examples
//! ```rust
//! use dnsleak::probe;
//!
//! let batch = probe::generate(6).unwrap();
//! assert_eq!(batch.len(), 6);
//! assert_eq!(batch[0].as_str().len(), 36);
//! ```

use crate::utils::{LeakTestError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Lengths of the hyphen-separated hex groups.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// A 128-bit random token rendered as lowercase hex grouped 8-4-4-4-12.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProbeId(String);

impl ProbeId {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut id = String::with_capacity(36);
        let mut offset = 0;
        for (i, len) in GROUPS.iter().enumerate() {
            if i > 0 {
                id.push('-');
            }
            for byte in &bytes[offset..offset + len / 2] {
                id.push_str(&format!("{byte:02x}"));
            }
            offset += len / 2;
        }
        Self(id)
    }

    /// Draws a fresh identifier from `rng`, failing if the source cannot deliver.
    pub fn from_rng<R: RngCore>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 16];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| LeakTestError::Entropy(e.to_string()))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name whose resolution the leak test service observes for this probe.
    pub fn hostname(&self, domain_suffix: &str) -> String {
        format!("{}.{}", self.0, domain_suffix)
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProbeId {
    type Err = LeakTestError;

    fn from_str(s: &str) -> Result<Self> {
        let groups: Vec<&str> = s.split('-').collect();
        let well_formed = groups.len() == GROUPS.len()
            && groups.iter().zip(GROUPS).all(|(group, len)| {
                group.len() == len
                    && group
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            });

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(LeakTestError::InvalidProbeId(s.to_string()))
        }
    }
}

/// Generates `count` identifiers from the operating system's random source.
///
/// There is no fallback to a weaker generator: an identifier that collides with
/// another user's would mix their resolvers into this report.
pub fn generate(count: usize) -> Result<Vec<ProbeId>> {
    let mut rng = OsRng;
    (0..count).map(|_| ProbeId::from_rng(&mut rng)).collect()
}
