use clap::ValueEnum;
use edna_dashboard::DashboardTheme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CliDashboardTheme {
    #[default]
    Dark,
    Light,
}

impl From<CliDashboardTheme> for DashboardTheme {
    fn from(value: CliDashboardTheme) -> Self {
        match value {
            CliDashboardTheme::Dark => DashboardTheme::Dark,
            CliDashboardTheme::Light => DashboardTheme::Light,
        }
    }
}
