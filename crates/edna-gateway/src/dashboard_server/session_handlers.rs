//! Landing page and mock login flow.

use edna_dashboard_ui::{
    render_edna_document, render_edna_landing_page, render_edna_login_page,
    EdnaLoginPageContext,
};

use super::*;

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct LoginPageQuery {
    #[serde(default)]
    logged_out: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub(super) async fn handle_landing_page(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
) -> Response {
    let theme = match state.visitor_theme(&headers) {
        Ok(theme) => theme,
        Err(error) => return error.into_response(),
    };
    Html(render_edna_document(
        "Home",
        theme,
        &render_edna_landing_page(),
    ))
    .into_response()
}

pub(super) async fn handle_login_page(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    Query(query): Query<LoginPageQuery>,
) -> Response {
    let theme = match state.visitor_theme(&headers) {
        Ok(theme) => theme,
        Err(error) => return error.into_response(),
    };
    let notice = (query.logged_out.trim() == "1").then(|| "You have been signed out.".to_string());
    let body = render_edna_login_page(&EdnaLoginPageContext {
        theme,
        email: String::new(),
        notice,
    });
    Html(render_edna_document("Login", theme, &body)).into_response()
}

/// Any credentials are accepted once the mock delay elapses.
pub(super) async fn handle_login_submit(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    tokio::time::sleep(state.config.login_delay()).await;
    debug!(
        email = form.email.trim(),
        password_provided = !form.password.is_empty(),
        "mock login submitted"
    );
    complete_login(&state, &headers, "password")
}

pub(super) async fn handle_login_google(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
) -> Response {
    tokio::time::sleep(state.config.google_login_delay()).await;
    complete_login(&state, &headers, "google")
}

/// Drops the caller's session and expires its cookie.
pub(super) async fn handle_logout(
    State(state): State<Arc<EdnaDashboardServerState>>,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = session_token_from_headers(&headers) {
        let mut sessions = match state.lock_sessions() {
            Ok(sessions) => sessions,
            Err(error) => return error.into_response(),
        };
        if let Some(mut shell) = sessions.remove(&token) {
            apply_intent(&mut shell, DashboardIntent::LogOut);
        }
    }
    with_cookie(redirect_to(LOGGED_OUT_REDIRECT), &expired_session_cookie())
}

/// Reuses a live session or opens a new one, then enters the dashboard.
fn complete_login(
    state: &EdnaDashboardServerState,
    headers: &HeaderMap,
    method: &'static str,
) -> Response {
    let mut sessions = match state.lock_sessions() {
        Ok(sessions) => sessions,
        Err(error) => return error.into_response(),
    };
    let session = match session_token_from_headers(headers) {
        Some(token) if sessions.contains(&token) => ResolvedSession::existing(token),
        _ => {
            let session = ResolvedSession::issued(state.open_session(&mut sessions));
            info!(
                method,
                active_sessions = sessions.len(),
                total_sessions_issued = sessions.total_sessions_issued(),
                "dashboard session started"
            );
            session
        }
    };
    drop(sessions);
    session.attach_cookie(redirect_to(DASHBOARD_SHELL_ENDPOINT))
}
