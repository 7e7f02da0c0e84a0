//! Concurrent probe resolution.
//!
//! The answers are irrelevant to the report: the point of each lookup is the query the
//! recursive resolver sends to the leak test service's nameserver on our behalf.

use crate::probe::ProbeId;
use crate::utils::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;

pub mod lookup;

pub use lookup::*;

pub const DEFAULT_DOMAIN_SUFFIX: &str = "test.dnsleaktest.com";

/// A way of resolving a name through the host's current network context.
pub trait ProbeLookup: Send + Sync + 'static {
    /// Resolves `name`, returning the number of addresses received.
    fn lookup(&self, name: String) -> impl Future<Output = Result<usize>> + Send;
}

/// Resolves `<probe>.<domain_suffix>` for every probe in `batch`, all at once.
///
/// `progress(completed, total)` is called with zero before any lookup is drained and
/// then once per finished lookup, from the calling task only. Failed lookups count as
/// finished. There is no timeout: a lookup that never returns stalls the call.
///
/// Returns the number of lookups drained, which always equals `batch.len()`.
pub async fn resolve_all<L, P>(
    batch: &[ProbeId],
    domain_suffix: &str,
    lookup: Arc<L>,
    mut progress: P,
) -> usize
where
    L: ProbeLookup,
    P: FnMut(usize, usize),
{
    let total = batch.len();
    progress(0, total);

    let mut tasks = JoinSet::new();
    for probe in batch {
        let name = probe.hostname(domain_suffix);
        let lookup = Arc::clone(&lookup);
        tasks.spawn(async move {
            match lookup.lookup(name.clone()).await {
                Ok(count) => log::debug!("{name} resolved to {count} address(es)"),
                Err(e) => log::debug!("{name} did not resolve: {e}"),
            }
        });
    }

    let mut completed = 0;
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            log::warn!("Probe lookup task aborted: {e}");
        }
        completed += 1;
        progress(completed, total);
    }

    completed
}
