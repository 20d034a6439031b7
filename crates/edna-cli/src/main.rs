mod bootstrap_helpers;

use anyhow::Result;
use clap::Parser;
use edna_cli::Cli;
use edna_gateway::run_edna_dashboard_server;
use tracing::debug;

use crate::bootstrap_helpers::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    debug!(?cli, "parsed edna cli");
    run_edna_dashboard_server(cli.server_config()).await
}
