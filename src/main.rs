//! wxdash - weather dashboard for the terminal
//!
//! Shows current conditions, forecasts and historical weather statistics for
//! a place name or a latitude/longitude pair.

use std::process::ExitCode;

use clap::Parser;

use wxdash::app::App;
use wxdash::cli::{Cli, DashboardConfig};
use wxdash::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match DashboardConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    logging::init(config.verbosity);
    tracing::debug!(?config, "starting");

    let result = match App::new(&config) {
        Ok(app) => app.run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "dashboard failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
