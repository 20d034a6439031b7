//! Read-only JSON views of the dashboard session.

use edna_dashboard::{
    cluster_table_view, ClusterField, ClusterRecord, DatasetId, SortDirection, SortSpec,
};
use serde::Serialize;

use super::*;

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct ClusterQuery {
    #[serde(default)]
    filter: String,
    #[serde(default)]
    sort: String,
    #[serde(default)]
    direction: String,
}

impl ClusterQuery {
    /// Strict variant of the page controls: bad values are reported, not ignored.
    fn sort_spec(&self) -> Result<SortSpec, DashboardError> {
        let mut spec = SortSpec::default();
        if !self.sort.trim().is_empty() {
            spec = SortSpec::new(ClusterField::parse(&self.sort)?, SortDirection::Descending);
        }
        if !self.direction.trim().is_empty() {
            spec.direction = SortDirection::parse(&self.direction)?;
        }
        Ok(spec)
    }
}

#[derive(Debug, Serialize)]
struct ClusterViewResponse<'a> {
    dataset_id: &'a DatasetId,
    filter: &'a str,
    sort: SortSpec,
    total: usize,
    matched: usize,
    clusters: Vec<&'a ClusterRecord>,
}

/// Snapshot of the caller's session; visitors see the seeded demo state.
pub(super) async fn handle_api_dashboard_state(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
) -> Response {
    with_visitor_shell(&state, &headers, |shell| Json(shell.snapshot()).into_response())
}

/// Stateless cluster view; the session's table state is left untouched.
pub(super) async fn handle_api_dataset_clusters(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    AxumPath(dataset_id): AxumPath<String>,
    Query(query): Query<ClusterQuery>,
) -> Response {
    with_visitor_shell(&state, &headers, |shell| {
        let Some(dataset) = shell.registry().get(&dataset_id) else {
            debug!(dataset_id = %dataset_id, "cluster view requested for unknown dataset");
            return EdnaApiError::from(DashboardError::DatasetNotFound { dataset_id })
                .into_response();
        };
        let sort = match query.sort_spec() {
            Ok(sort) => sort,
            Err(error) => return EdnaApiError::from(error).into_response(),
        };
        let records = shell.clusters_for(&dataset.id);
        let filter = query.filter.as_str();
        let clusters = cluster_table_view(records, filter, sort);
        Json(ClusterViewResponse {
            dataset_id: &dataset.id,
            filter,
            sort,
            total: records.len(),
            matched: clusters.len(),
            clusters,
        })
        .into_response()
    })
}
