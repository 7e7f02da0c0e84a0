use crate::api::DEFAULT_API_URL;
use crate::dns::{HickoryLookup, StubResolver, SystemLookup, DEFAULT_DOMAIN_SUFFIX};
use crate::runner::DEFAULT_NUM_RUNS;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "dnsleak")]
#[command(about = "Find out which DNS resolvers answer on your behalf")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        default_value_t = DEFAULT_NUM_RUNS,
        help = "Number of probes to resolve (standard = 6; extended = 36)"
    )]
    pub num_runs: usize,

    #[arg(long, help = "Print the raw JSON returned by the test service")]
    pub json_output: bool,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "system", help = "How probe names are resolved")]
    pub resolver: ResolverArg,

    #[arg(long, default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_DOMAIN_SUFFIX, hide = true)]
    pub domain_suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolverArg {
    /// The operating system resolver
    System,
    /// A stub resolver using the name servers from the system configuration
    Hickory,
}

impl ResolverArg {
    pub fn to_lookup(self) -> StubResolver {
        match self {
            ResolverArg::System => StubResolver::System(SystemLookup),
            ResolverArg::Hickory => StubResolver::Hickory(HickoryLookup::from_system_conf()),
        }
    }
}
