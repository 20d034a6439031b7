//! Dashboard server bootstrap and router wiring.

use super::*;

pub async fn run_edna_dashboard_server(config: EdnaDashboardServerConfig) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind edna dashboard server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound dashboard server address")?;

    let state = Arc::new(EdnaDashboardServerState::new(config));
    info!(
        addr = %local_addr,
        seed = state.config.seed,
        clusters_per_dataset = state.config.clusters_per_dataset,
        skip_login = state.config.skip_login,
        "edna dashboard server listening"
    );
    println!("edna dashboard server listening: http://{local_addr}{LANDING_ENDPOINT}");

    let app = build_edna_dashboard_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("edna dashboard server exited unexpectedly")?;
    info!("edna dashboard server stopped");
    Ok(())
}

pub(super) fn build_edna_dashboard_router(state: Arc<EdnaDashboardServerState>) -> Router {
    Router::new()
        .route(LANDING_ENDPOINT, get(handle_landing_page))
        .route(LOGIN_ENDPOINT, get(handle_login_page).post(handle_login_submit))
        .route(LOGIN_GOOGLE_ENDPOINT, post(handle_login_google))
        .route(LOGOUT_ENDPOINT, post(handle_logout))
        .route(DASHBOARD_SHELL_ENDPOINT, get(handle_dashboard_shell_page))
        .route(
            DASHBOARD_OVERVIEW_ENDPOINT,
            get(handle_dashboard_overview_page),
        )
        .route(
            DASHBOARD_DATASETS_ENDPOINT,
            get(handle_dashboard_datasets_page).post(handle_dashboard_add_dataset),
        )
        .route(
            DASHBOARD_DATASET_DETAIL_ENDPOINT,
            get(handle_dashboard_dataset_detail_page),
        )
        .route(
            DASHBOARD_DATASET_DELETE_ENDPOINT,
            post(handle_dashboard_delete_dataset),
        )
        .route(
            DASHBOARD_QUERIES_ENDPOINT,
            get(handle_dashboard_queries_page).post(handle_dashboard_add_query),
        )
        .route(DASHBOARD_REVIEW_ENDPOINT, get(handle_dashboard_review_page))
        .route(
            DASHBOARD_SETTINGS_ENDPOINT,
            get(handle_dashboard_settings_page),
        )
        .route(DASHBOARD_RESULT_ENDPOINT, get(handle_dashboard_result_page))
        .route(
            API_DASHBOARD_STATE_ENDPOINT,
            get(handle_api_dashboard_state),
        )
        .route(
            API_DATASET_CLUSTERS_ENDPOINT,
            get(handle_api_dataset_clusters),
        )
        .with_state(state)
}
