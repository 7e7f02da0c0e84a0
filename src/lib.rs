pub mod api;
pub mod cli;
pub mod dns;
pub mod probe;
pub mod report;
pub mod runner;
pub mod utils;

pub use api::*;
pub use cli::*;
pub use dns::*;
pub use probe::*;
pub use report::*;
pub use runner::*;
pub use utils::*;
