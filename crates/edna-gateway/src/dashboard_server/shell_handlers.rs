//! Dashboard page handlers: apply query controls, then render the shell.

use edna_dashboard::query_results::QueryResultLookup;
use edna_dashboard_ui::{
    render_edna_dashboard_shell, render_edna_document, render_edna_query_result_page,
};

use super::*;

macro_rules! define_dashboard_view_handler {
    ($handler_name:ident, $view:expr) => {
        pub(super) async fn $handler_name(
            State(state): State<Arc<EdnaDashboardServerState>>,
            headers: HeaderMap,
            Query(controls): Query<DashboardControlsQuery>,
        ) -> Response {
            render_dashboard_page(&state, &headers, Some($view), &controls)
        }
    };
}

define_dashboard_view_handler!(
    handle_dashboard_overview_page,
    DashboardView::GlobalOverview
);
define_dashboard_view_handler!(handle_dashboard_datasets_page, DashboardView::Datasets);
define_dashboard_view_handler!(handle_dashboard_queries_page, DashboardView::Queries);
define_dashboard_view_handler!(handle_dashboard_review_page, DashboardView::Review);
define_dashboard_view_handler!(handle_dashboard_settings_page, DashboardView::Settings);

pub(super) async fn handle_dashboard_shell_page(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    Query(controls): Query<DashboardControlsQuery>,
) -> Response {
    render_dashboard_page(&state, &headers, None, &controls)
}

pub(super) async fn handle_dashboard_dataset_detail_page(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    AxumPath(dataset_id): AxumPath<String>,
    Query(controls): Query<DashboardControlsQuery>,
) -> Response {
    render_dashboard_page(
        &state,
        &headers,
        Some(DashboardView::dataset(dataset_id)),
        &controls,
    )
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct QueryResultPageQuery {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    theme: String,
}

pub(super) async fn handle_dashboard_result_page(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    Query(query): Query<QueryResultPageQuery>,
) -> Response {
    with_session_shell(&state, &headers, |shell| {
        if !query.theme.trim().is_empty() {
            let theme = DashboardTheme::parse(&query.theme).unwrap_or_default();
            apply_intent(shell, DashboardIntent::SetTheme(theme));
        }
        let lookup = shell.queries().lookup(query.id.as_deref());
        if lookup == QueryResultLookup::NotFound {
            debug!(query_id = ?query.id, "query result not found");
        }
        let title = match lookup {
            QueryResultLookup::Found(result) => result.id.clone(),
            _ => "Query Result".to_string(),
        };
        let body = render_edna_query_result_page(lookup);
        Html(render_edna_document(&title, shell.theme(), &body)).into_response()
    })
}

/// Applies theme, view, filter and sort controls in that order, then renders.
///
/// The view change comes before the table controls because moving to a
/// different dataset resets the table state.
fn render_dashboard_page(
    state: &EdnaDashboardServerState,
    headers: &HeaderMap,
    view: Option<DashboardView>,
    controls: &DashboardControlsQuery,
) -> Response {
    with_session_shell(state, headers, |shell| {
        if let Some(theme) = controls.requested_theme() {
            apply_intent(shell, DashboardIntent::SetTheme(theme));
        }
        if let Some(view) = view {
            apply_intent(shell, DashboardIntent::ChangeView(view));
        }
        if let Some(filter_text) = controls.requested_filter() {
            apply_intent(shell, DashboardIntent::SetFilter(filter_text.to_string()));
        }
        if let Some(spec) = controls.requested_sort() {
            apply_intent(shell, DashboardIntent::SetSort(spec));
        }

        let title = shell.current_view().nav_section().label();
        let body = render_edna_dashboard_shell(shell);
        Html(render_edna_document(title, shell.theme(), &body)).into_response()
    })
}
