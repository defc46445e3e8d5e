//! Utils

use clap::Parser;

/// Arguments for the marketplace demo
#[derive(Debug, Parser)]
pub struct ExampleMarketplaceArgs {
    /// Fixture set to seed the marketplace with
    #[clap(short, long, default_value = "market")]
    pub fixture: String,

    /// Only check out this buyer (by username)
    #[clap(short, long)]
    pub buyer: Option<String>,

    /// Log at debug level unless `RUST_LOG` is set
    #[clap(short, long)]
    pub verbose: bool,
}

impl ExampleMarketplaceArgs {
    /// Default tracing filter directive for these arguments.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
