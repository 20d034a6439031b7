use edna_dashboard::{ClusterField, DashboardTheme, SortDirection, SortSpec};
use serde::Deserialize;
use tracing::debug;

/// Query parameters shared by every dashboard page.
#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct DashboardControlsQuery {
    #[serde(default)]
    theme: String,
    /// Absent keeps the current filter; present (even empty) replaces it.
    #[serde(default)]
    filter: Option<String>,
    #[serde(default)]
    sort: String,
    #[serde(default)]
    direction: String,
}

impl DashboardControlsQuery {
    /// `None` when no theme was requested; unknown values fall back to dark.
    pub(super) fn requested_theme(&self) -> Option<DashboardTheme> {
        let theme = self.theme.trim();
        if theme.is_empty() {
            return None;
        }
        Some(DashboardTheme::parse(theme).unwrap_or_default())
    }

    /// Passed through verbatim; surrounding whitespace is part of the match.
    pub(super) fn requested_filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Sort spec carried by a header link; invalid values are ignored.
    pub(super) fn requested_sort(&self) -> Option<SortSpec> {
        parse_sort_controls(&self.sort, &self.direction)
    }
}

pub(super) fn parse_sort_controls(raw_key: &str, raw_direction: &str) -> Option<SortSpec> {
    let raw_key = raw_key.trim();
    if raw_key.is_empty() {
        return None;
    }
    let key = match ClusterField::parse(raw_key) {
        Ok(key) => key,
        Err(error) => {
            debug!(code = error.code(), %error, "ignoring sort control");
            return None;
        }
    };
    let raw_direction = raw_direction.trim();
    if raw_direction.is_empty() {
        return Some(SortSpec::new(key, SortDirection::Descending));
    }
    match SortDirection::parse(raw_direction) {
        Ok(direction) => Some(SortSpec::new(key, direction)),
        Err(error) => {
            debug!(code = error.code(), %error, "ignoring sort control");
            None
        }
    }
}
