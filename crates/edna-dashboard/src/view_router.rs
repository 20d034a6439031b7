use serde::{Deserialize, Serialize};

use crate::dataset_registry::DatasetId;
use crate::error::DashboardError;

pub const DATASET_VIEW_TOKEN_PREFIX: &str = "dataset-";
pub const DASHBOARD_SHELL_ENDPOINT: &str = "/dashboard";
pub const DASHBOARD_OVERVIEW_ENDPOINT: &str = "/dashboard/overview";
pub const DASHBOARD_DATASETS_ENDPOINT: &str = "/dashboard/datasets";
pub const DASHBOARD_QUERIES_ENDPOINT: &str = "/dashboard/queries";
pub const DASHBOARD_REVIEW_ENDPOINT: &str = "/dashboard/review";
pub const DASHBOARD_SETTINGS_ENDPOINT: &str = "/dashboard/settings";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", content = "dataset_id", rename_all = "snake_case")]
/// Panel selected in the dashboard shell.
pub enum DashboardView {
    #[default]
    GlobalOverview,
    Datasets,
    Queries,
    Review,
    Settings,
    DatasetDetail(DatasetId),
}

impl DashboardView {
    pub fn dataset(dataset_id: impl Into<String>) -> Self {
        Self::DatasetDetail(DatasetId::new(dataset_id))
    }

    /// Stable string token, e.g. `global-overview` or `dataset-ds1`.
    pub fn as_token(&self) -> String {
        match self {
            Self::GlobalOverview => "global-overview".to_string(),
            Self::Datasets => "datasets".to_string(),
            Self::Queries => "queries".to_string(),
            Self::Review => "review".to_string(),
            Self::Settings => "settings".to_string(),
            Self::DatasetDetail(dataset_id) => {
                format!("{DATASET_VIEW_TOKEN_PREFIX}{dataset_id}")
            }
        }
    }

    pub fn parse_token(raw: &str) -> Result<Self, DashboardError> {
        let token = raw.trim();
        let view = match token {
            "global-overview" => Self::GlobalOverview,
            "datasets" => Self::Datasets,
            "queries" => Self::Queries,
            "review" => Self::Review,
            "settings" => Self::Settings,
            _ => match token.strip_prefix(DATASET_VIEW_TOKEN_PREFIX) {
                Some(dataset_id) if !dataset_id.is_empty() => Self::dataset(dataset_id),
                _ => {
                    return Err(DashboardError::InvalidView {
                        token: raw.to_string(),
                    })
                }
            },
        };
        Ok(view)
    }

    pub fn shell_path(&self) -> String {
        match self {
            Self::GlobalOverview => DASHBOARD_SHELL_ENDPOINT.to_string(),
            Self::Datasets => DASHBOARD_DATASETS_ENDPOINT.to_string(),
            Self::Queries => DASHBOARD_QUERIES_ENDPOINT.to_string(),
            Self::Review => DASHBOARD_REVIEW_ENDPOINT.to_string(),
            Self::Settings => DASHBOARD_SETTINGS_ENDPOINT.to_string(),
            Self::DatasetDetail(dataset_id) => {
                format!("{DASHBOARD_DATASETS_ENDPOINT}/{dataset_id}")
            }
        }
    }

    /// Maps an HTTP path back to a view. `/dashboard` itself is the overview.
    pub fn parse_shell_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            DASHBOARD_SHELL_ENDPOINT | DASHBOARD_OVERVIEW_ENDPOINT => Some(Self::GlobalOverview),
            DASHBOARD_DATASETS_ENDPOINT => Some(Self::Datasets),
            DASHBOARD_QUERIES_ENDPOINT => Some(Self::Queries),
            DASHBOARD_REVIEW_ENDPOINT => Some(Self::Review),
            DASHBOARD_SETTINGS_ENDPOINT => Some(Self::Settings),
            _ => path
                .strip_prefix(DASHBOARD_DATASETS_ENDPOINT)
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|dataset_id| !dataset_id.is_empty() && !dataset_id.contains('/'))
                .map(Self::dataset),
        }
    }

    pub fn dataset_id(&self) -> Option<&DatasetId> {
        match self {
            Self::DatasetDetail(dataset_id) => Some(dataset_id),
            _ => None,
        }
    }

    /// Sidebar navigation entry this view highlights.
    pub fn nav_section(&self) -> DashboardNavSection {
        match self {
            Self::GlobalOverview => DashboardNavSection::GlobalOverview,
            Self::Datasets | Self::DatasetDetail(_) => DashboardNavSection::Datasets,
            Self::Queries => DashboardNavSection::Queries,
            Self::Review => DashboardNavSection::Review,
            Self::Settings => DashboardNavSection::Settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardNavSection {
    GlobalOverview,
    Datasets,
    Queries,
    Review,
    Settings,
}

impl DashboardNavSection {
    pub const ALL: [Self; 5] = [
        Self::GlobalOverview,
        Self::Datasets,
        Self::Queries,
        Self::Review,
        Self::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::GlobalOverview => "Global Overview",
            Self::Datasets => "Datasets",
            Self::Queries => "Query Analysis",
            Self::Review => "Review Panel",
            Self::Settings => "Settings",
        }
    }

    pub fn view(self) -> DashboardView {
        match self {
            Self::GlobalOverview => DashboardView::GlobalOverview,
            Self::Datasets => DashboardView::Datasets,
            Self::Queries => DashboardView::Queries,
            Self::Review => DashboardView::Review,
            Self::Settings => DashboardView::Settings,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Holds the current dashboard view. Any variant is accepted.
pub struct ViewRouter {
    current: DashboardView,
}

impl ViewRouter {
    pub fn new(initial: DashboardView) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &DashboardView {
        &self.current
    }

    /// Replaces the current view and returns the previous one.
    pub fn change_view(&mut self, next: DashboardView) -> DashboardView {
        std::mem::replace(&mut self.current, next)
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardNavSection, DashboardView, ViewRouter};
    use crate::error::DashboardError;

    #[test]
    fn unit_view_serializes_with_adjacent_tag() {
        let json = serde_json::to_value(DashboardView::dataset("ds2")).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"view": "dataset_detail", "dataset_id": "ds2"})
        );
        let parsed: DashboardView =
            serde_json::from_value(serde_json::json!({"view": "review"})).expect("deserialize");
        assert_eq!(parsed, DashboardView::Review);
    }

    #[test]
    fn unit_router_starts_on_global_overview() {
        let router = ViewRouter::default();
        assert_eq!(router.current(), &DashboardView::GlobalOverview);
    }

    #[test]
    fn unit_change_view_accepts_any_variant_and_returns_previous() {
        let mut router = ViewRouter::default();
        let previous = router.change_view(DashboardView::dataset("unknown-id"));
        assert_eq!(previous, DashboardView::GlobalOverview);
        assert_eq!(router.current(), &DashboardView::dataset("unknown-id"));
    }

    #[test]
    fn unit_view_tokens_round_trip() {
        let views = [
            DashboardView::GlobalOverview,
            DashboardView::Datasets,
            DashboardView::Queries,
            DashboardView::Review,
            DashboardView::Settings,
            DashboardView::dataset("ds1"),
        ];
        for view in views {
            assert_eq!(DashboardView::parse_token(&view.as_token()), Ok(view));
        }
        assert_eq!(DashboardView::dataset("ds1").as_token(), "dataset-ds1");
    }

    #[test]
    fn regression_parse_token_rejects_unknown_and_empty_dataset_tokens() {
        assert_eq!(
            DashboardView::parse_token("dataset-"),
            Err(DashboardError::InvalidView {
                token: "dataset-".to_string()
            })
        );
        assert!(DashboardView::parse_token("reports").is_err());
    }

    #[test]
    fn functional_shell_paths_map_back_to_views() {
        assert_eq!(
            DashboardView::parse_shell_path("/dashboard"),
            Some(DashboardView::GlobalOverview)
        );
        assert_eq!(
            DashboardView::parse_shell_path("/dashboard/overview/"),
            Some(DashboardView::GlobalOverview)
        );
        assert_eq!(
            DashboardView::parse_shell_path("/dashboard/datasets/ds2"),
            Some(DashboardView::dataset("ds2"))
        );
        assert_eq!(DashboardView::parse_shell_path("/dashboard/datasets/a/b"), None);
        assert_eq!(DashboardView::parse_shell_path("/elsewhere"), None);
        assert_eq!(
            DashboardView::dataset("ds2").shell_path(),
            "/dashboard/datasets/ds2"
        );
    }

    #[test]
    fn unit_dataset_detail_highlights_datasets_nav_section() {
        assert_eq!(
            DashboardView::dataset("ds1").nav_section(),
            DashboardNavSection::Datasets
        );
        for section in DashboardNavSection::ALL {
            assert_eq!(section.view().nav_section(), section);
        }
    }
}
