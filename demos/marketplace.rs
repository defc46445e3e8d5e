//! Marketplace Example
//!
//! Loads a fixture set, prints every dashboard, checks out the buyers and prints the
//! dashboards again.
//!
//! Use `-f` to load a fixture set by name
//! Use `-b` to check out a single buyer by username
//! Use `-v` to log at debug level (`RUST_LOG` takes precedence)

use std::io::{self, Write};

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tindahan::{
    fixtures::Fixture,
    marketplace::Marketplace,
    users::User,
    utils::ExampleMarketplaceArgs,
};

/// Marketplace Example
pub fn main() -> Result<()> {
    let args = ExampleMarketplaceArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(args.log_directive())),
        )
        .with_writer(io::stderr)
        .init();

    let mut market = Fixture::from_set(&args.fixture)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    write_dashboards(&mut out, &market)?;

    let buyers: Vec<User> = match args.buyer.as_deref() {
        Some(username) => {
            let user = market
                .user(username)
                .ok_or_else(|| anyhow!("no user named {username}"))?;

            vec![user]
        }
        None => market.buyers().map(|buyer| User::Buyer(buyer.key())).collect(),
    };

    writeln!(out, "CHECKOUT")?;

    for user in buyers {
        let User::Buyer(buyer) = user else {
            return Err(anyhow!("only buyers can check out"));
        };

        let username = market
            .identity(user)
            .map(|identity| identity.username().to_string())
            .unwrap_or_default();

        match market.checkout(buyer) {
            Ok(Some(order)) => writeln!(
                out,
                "{username}: bought {} units, charged {}",
                order.units(),
                order.total()
            )?,
            Ok(None) => writeln!(out, "{username}: nothing to check out")?,
            Err(err) => writeln!(out, "{username}: {err}")?,
        }
    }

    writeln!(out)?;
    write_dashboards(&mut out, &market)?;

    Ok(())
}

fn write_dashboards(out: &mut impl Write, market: &Marketplace<'_>) -> Result<()> {
    for user in market.users() {
        writeln!(out, "{}", market.dashboard(user)?)?;
    }

    Ok(())
}
