//! Route constants of the dashboard server.

pub(super) use edna_dashboard::view_router::{
    DASHBOARD_DATASETS_ENDPOINT, DASHBOARD_OVERVIEW_ENDPOINT, DASHBOARD_QUERIES_ENDPOINT,
    DASHBOARD_REVIEW_ENDPOINT, DASHBOARD_SETTINGS_ENDPOINT, DASHBOARD_SHELL_ENDPOINT,
};

pub(super) const LANDING_ENDPOINT: &str = "/";
pub(super) const LOGIN_ENDPOINT: &str = "/login";
pub(super) const LOGIN_GOOGLE_ENDPOINT: &str = "/login/google";
pub(super) const LOGOUT_ENDPOINT: &str = "/logout";
pub(super) const DASHBOARD_DATASET_DETAIL_ENDPOINT: &str = "/dashboard/datasets/{dataset_id}";
pub(super) const DASHBOARD_DATASET_DELETE_ENDPOINT: &str =
    "/dashboard/datasets/{dataset_id}/delete";
pub(super) const DASHBOARD_RESULT_ENDPOINT: &str = "/dashboard/result";
pub(super) const API_DASHBOARD_STATE_ENDPOINT: &str = "/api/dashboard/state";
pub(super) const API_DATASET_CLUSTERS_ENDPOINT: &str = "/api/datasets/{dataset_id}/clusters";

pub(super) const LOGGED_OUT_REDIRECT: &str = "/login?logged_out=1";
