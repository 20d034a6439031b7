use clap::{ArgAction, Parser};
use edna_gateway::EdnaDashboardServerConfig;

use crate::cli_types::CliDashboardTheme;

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "edna",
    about = "EDeepNA deep-sea eDNA analysis dashboard server",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "EDNA_BIND",
        default_value = edna_gateway::DEFAULT_EDNA_BIND,
        help = "Socket address the dashboard server listens on"
    )]
    pub bind: String,

    #[arg(
        long,
        env = "EDNA_SEED",
        default_value_t = edna_dashboard::fixtures::DEFAULT_FIXTURE_SEED,
        help = "Seed for the generated cluster fixtures; equal seeds give equal datasets"
    )]
    pub seed: u64,

    #[arg(
        long = "clusters-per-dataset",
        env = "EDNA_CLUSTERS_PER_DATASET",
        default_value_t = edna_dashboard::fixtures::DEFAULT_CLUSTERS_PER_DATASET,
        value_parser = parse_positive_usize,
        help = "Number of mock clusters generated for every dataset"
    )]
    pub clusters_per_dataset: usize,

    #[arg(
        long = "login-delay-ms",
        env = "EDNA_LOGIN_DELAY_MS",
        default_value_t = edna_gateway::DEFAULT_LOGIN_DELAY_MS,
        help = "Mock sign-in delay in milliseconds (tripled for the Google button)"
    )]
    pub login_delay_ms: u64,

    #[arg(
        long,
        env = "EDNA_THEME",
        value_enum,
        default_value_t = CliDashboardTheme::Dark,
        help = "Initial dashboard theme"
    )]
    pub theme: CliDashboardTheme,

    #[arg(
        long = "skip-login",
        env = "EDNA_SKIP_LOGIN",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Start the session already signed in"
    )]
    pub skip_login: bool,
}

impl Cli {
    pub fn server_config(&self) -> EdnaDashboardServerConfig {
        EdnaDashboardServerConfig {
            bind: self.bind.clone(),
            seed: self.seed,
            clusters_per_dataset: self.clusters_per_dataset,
            login_delay_ms: self.login_delay_ms,
            theme: self.theme.into(),
            skip_login: self.skip_login,
        }
    }
}
