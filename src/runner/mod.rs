use crate::api::LeakTestClient;
use crate::dns::{resolve_all, ProbeLookup, DEFAULT_DOMAIN_SUFFIX};
use crate::probe;
use crate::utils::{format_duration, measure_time, Result};
use std::sync::Arc;

pub const DEFAULT_NUM_RUNS: usize = 36;

/// One leak test run: register probes, resolve them, collect the resolvers seen.
///
/// The phases never overlap. The service matches DNS traffic against the identifiers it
/// was told about, so lookups must not start before registration has returned and
/// results must not be requested before every lookup has finished.
#[derive(Debug, Clone)]
pub struct LeakTest {
    pub num_runs: usize,
    pub domain_suffix: String,
}

impl Default for LeakTest {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_RUNS)
    }
}

impl LeakTest {
    pub fn new(num_runs: usize) -> Self {
        Self {
            num_runs,
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
        }
    }

    pub fn with_domain_suffix(mut self, domain_suffix: impl Into<String>) -> Self {
        self.domain_suffix = domain_suffix.into();
        self
    }

    /// Runs the test and returns the untouched `servers-for-result` body.
    pub async fn run<L, P>(
        &self,
        api: &LeakTestClient,
        lookup: Arc<L>,
        progress: P,
    ) -> Result<Vec<u8>>
    where
        L: ProbeLookup,
        P: FnMut(usize, usize),
    {
        let batch = probe::generate(self.num_runs)?;
        api.register(&batch).await?;

        let (duration, completed) =
            measure_time(|| resolve_all(&batch, &self.domain_suffix, lookup, progress)).await;
        log::info!(
            "Resolved {} probes under {} in {}",
            completed,
            self.domain_suffix,
            format_duration(duration)
        );

        api.servers_for_result(&batch).await
    }
}
