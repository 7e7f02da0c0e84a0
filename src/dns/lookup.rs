use super::ProbeLookup;
use crate::utils::{LeakTestError, Result};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf;
use hickory_resolver::TokioAsyncResolver;

/// Resolves through the operating system's resolver (`getaddrinfo`), the same path
/// any other application on the host takes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl ProbeLookup for SystemLookup {
    async fn lookup(&self, name: String) -> Result<usize> {
        let addrs = tokio::net::lookup_host((name.as_str(), 0))
            .await
            .map_err(|e| LeakTestError::DnsResolution(e.to_string()))?;
        Ok(addrs.count())
    }
}

/// Resolves with an in-process stub resolver that sends queries to the name servers
/// listed in the host's resolver configuration.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: TokioAsyncResolver,
}

impl HickoryLookup {
    pub fn from_system_conf() -> Self {
        let (system_config, opts) = match system_conf::read_system_conf() {
            Ok((config, opts)) => (config, opts),
            Err(e) => {
                log::warn!("Could not read system DNS config, using default: {e}");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        // Search domains would turn one probe into several differently named queries.
        let mut config = ResolverConfig::new();
        for name_server in system_config.name_servers() {
            log::info!("Probe name server: {}", name_server.socket_addr);
            config.add_name_server(name_server.clone());
        }
        if config.name_servers().is_empty() {
            config = ResolverConfig::default();
        }

        Self::new(config, opts)
    }

    pub fn new(config: ResolverConfig, mut opts: ResolverOpts) -> Self {
        opts.ndots = 0;
        // Every probe name is unique, caching would never hit.
        opts.cache_size = 0;
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

impl ProbeLookup for HickoryLookup {
    async fn lookup(&self, name: String) -> Result<usize> {
        let response = self
            .resolver
            .lookup_ip(name.as_str())
            .await
            .map_err(|e| LeakTestError::DnsResolution(e.to_string()))?;
        Ok(response.iter().count())
    }
}

/// The lookup backend selected on the command line.
#[derive(Clone)]
pub enum StubResolver {
    System(SystemLookup),
    Hickory(HickoryLookup),
}

impl ProbeLookup for StubResolver {
    async fn lookup(&self, name: String) -> Result<usize> {
        match self {
            StubResolver::System(lookup) => lookup.lookup(name).await,
            StubResolver::Hickory(lookup) => lookup.lookup(name).await,
        }
    }
}
