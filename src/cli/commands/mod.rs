//! Command implementations for the COVID-19 processor CLI
//!
//! Each command lives in its own module and renders its report as text or
//! JSON. Library errors are wrapped with `anyhow` context here, at the edge.

pub mod global;
pub mod locations;
pub mod shared;
pub mod sources;
pub mod us;

use crate::cli::args::{Args, Commands};
use shared::{load_configuration, setup_logging};
use tracing::debug;

/// Main command runner
///
/// Loads the layered configuration, installs logging and dispatches to the
/// subcommand handler.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_configuration(&args)?;
    setup_logging(&args, &config)?;
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match &args.command {
        Some(Commands::Global(global)) => global::run_global(&args, global, config).await,
        Some(Commands::Us(us)) => us::run_us(&args, us, config).await,
        Some(Commands::Locations(locations)) => {
            locations::run_locations(&args, locations, config).await
        }
        Some(Commands::Sources(sources)) => sources::run_sources(sources, config).await,
        None => Ok(()),
    }
}
