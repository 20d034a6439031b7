use edna_dashboard::DatasetId;

use super::*;

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct AddDatasetForm {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct AddQueryForm {
    #[serde(default)]
    sequence: String,
}

pub(super) async fn handle_dashboard_add_dataset(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    Form(form): Form<AddDatasetForm>,
) -> Response {
    with_session_shell(&state, &headers, |shell| {
        match apply_intent(shell, DashboardIntent::AddDataset { name: form.name }) {
            Some(DashboardOutcome::DatasetAdded(dataset)) => {
                redirect_to(&DashboardView::DatasetDetail(dataset.id).shell_path())
            }
            _ => redirect_to(DASHBOARD_DATASETS_ENDPOINT),
        }
    })
}

pub(super) async fn handle_dashboard_delete_dataset(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    AxumPath(dataset_id): AxumPath<String>,
) -> Response {
    with_session_shell(&state, &headers, |shell| {
        apply_intent(
            shell,
            DashboardIntent::DeleteDataset(DatasetId::new(dataset_id)),
        );
        redirect_to(&shell.current_view().shell_path())
    })
}

/// Blank submissions leave the catalog untouched and land on the queries panel.
pub(super) async fn handle_dashboard_add_query(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    Form(form): Form<AddQueryForm>,
) -> Response {
    with_session_shell(&state, &headers, |shell| {
        apply_intent(
            shell,
            DashboardIntent::AddQuery {
                sequence: form.sequence,
            },
        );
        redirect_to(DASHBOARD_QUERIES_ENDPOINT)
    })
}
