use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Path as AxumPath, Query, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use edna_dashboard::fixtures::{DEFAULT_CLUSTERS_PER_DATASET, DEFAULT_FIXTURE_SEED};
use edna_dashboard::{
    DashboardError, DashboardIntent, DashboardOutcome, DashboardShell, DashboardShellOptions,
    DashboardTheme, DashboardView,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

mod api_handlers;
mod endpoints;
mod form_handlers;
mod server_bootstrap;
mod session_handlers;
mod session_store;
mod shell_controls;
mod shell_handlers;
mod types;

use api_handlers::{handle_api_dashboard_state, handle_api_dataset_clusters};
use endpoints::*;
use form_handlers::{
    handle_dashboard_add_dataset, handle_dashboard_add_query, handle_dashboard_delete_dataset,
};
pub use server_bootstrap::run_edna_dashboard_server;
use session_handlers::{
    handle_landing_page, handle_login_google, handle_login_page, handle_login_submit,
    handle_logout,
};
use session_store::{
    expired_session_cookie, session_token_from_headers, with_cookie, DashboardSessionStore,
    ResolvedSession,
};
use shell_controls::DashboardControlsQuery;
use shell_handlers::*;
use types::EdnaApiError;

pub const DEFAULT_EDNA_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;
/// The Google button waits this many times the regular login delay.
pub const GOOGLE_LOGIN_DELAY_FACTOR: u64 = 3;

/// Runtime settings of the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdnaDashboardServerConfig {
    pub bind: String,
    pub seed: u64,
    pub clusters_per_dataset: usize,
    pub login_delay_ms: u64,
    pub theme: DashboardTheme,
    pub skip_login: bool,
}

impl Default for EdnaDashboardServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_EDNA_BIND.to_string(),
            seed: DEFAULT_FIXTURE_SEED,
            clusters_per_dataset: DEFAULT_CLUSTERS_PER_DATASET,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            theme: DashboardTheme::Dark,
            skip_login: false,
        }
    }
}

impl EdnaDashboardServerConfig {
    fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    fn google_login_delay(&self) -> Duration {
        Duration::from_millis(
            self.login_delay_ms
                .saturating_mul(GOOGLE_LOGIN_DELAY_FACTOR),
        )
    }

    /// Seeded demo shell with the configured theme. Sessions log it in.
    pub fn build_shell(&self) -> DashboardShell {
        let mut options = DashboardShellOptions::demo(self.seed, self.clusters_per_dataset);
        options.theme = self.theme;
        DashboardShell::new(options)
    }
}

type DashboardShellFactory = Arc<dyn Fn() -> DashboardShell + Send + Sync>;

#[derive(Clone)]
struct EdnaDashboardServerState {
    config: EdnaDashboardServerConfig,
    shell_factory: DashboardShellFactory,
    sessions: Arc<Mutex<DashboardSessionStore>>,
    sequence: Arc<AtomicU64>,
}

impl EdnaDashboardServerState {
    fn new(config: EdnaDashboardServerConfig) -> Self {
        let template = config.clone();
        Self::with_shell_factory(config, move || template.build_shell())
    }

    fn with_shell_factory(
        config: EdnaDashboardServerConfig,
        factory: impl Fn() -> DashboardShell + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            shell_factory: Arc::new(factory),
            sessions: Arc::new(Mutex::new(DashboardSessionStore::default())),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    fn fresh_shell(&self) -> DashboardShell {
        (self.shell_factory)()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed).saturating_add(1)
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, DashboardSessionStore>, EdnaApiError> {
        self.sessions
            .lock()
            .map_err(|_| EdnaApiError::internal("dashboard session store lock poisoned"))
    }

    /// Creates a logged-in shell for a new visitor and returns its token.
    fn open_session(&self, sessions: &mut DashboardSessionStore) -> String {
        let token = format!(
            "edna_sess_{:016x}{:016x}",
            self.next_sequence(),
            rand::random::<u64>()
        );
        let mut shell = self.fresh_shell();
        apply_intent(&mut shell, DashboardIntent::LogIn);
        sessions.insert(token.clone(), shell);
        token
    }

    /// The caller's live session, or a new one when `skip_login` is set.
    fn resolve_session(
        &self,
        sessions: &mut DashboardSessionStore,
        headers: &HeaderMap,
    ) -> Option<ResolvedSession> {
        if let Some(token) = session_token_from_headers(headers) {
            if sessions.contains(&token) {
                return Some(ResolvedSession::existing(token));
            }
        }
        if !self.config.skip_login {
            return None;
        }
        Some(ResolvedSession::issued(self.open_session(sessions)))
    }

    /// Theme of the caller's session, or the configured default for visitors.
    fn visitor_theme(&self, headers: &HeaderMap) -> Result<DashboardTheme, EdnaApiError> {
        let sessions = self.lock_sessions()?;
        Ok(session_token_from_headers(headers)
            .and_then(|token| sessions.shell(&token).map(DashboardShell::theme))
            .unwrap_or(self.config.theme))
    }
}

/// Runs `render` against the caller's session shell; visitors without one go to `/login`.
fn with_session_shell(
    state: &EdnaDashboardServerState,
    headers: &HeaderMap,
    render: impl FnOnce(&mut DashboardShell) -> Response,
) -> Response {
    let mut sessions = match state.lock_sessions() {
        Ok(sessions) => sessions,
        Err(error) => return error.into_response(),
    };
    let Some(session) = state.resolve_session(&mut sessions, headers) else {
        debug!("dashboard request without session; redirecting to login");
        return redirect_to(LOGIN_ENDPOINT);
    };
    let response = match sessions.shell_mut(session.token()) {
        Some(shell) => render(shell),
        None => EdnaApiError::internal("dashboard session disappeared").into_response(),
    };
    drop(sessions);
    session.attach_cookie(response)
}

/// Read-only access for the JSON API: the caller's session, else a fresh demo shell.
fn with_visitor_shell(
    state: &EdnaDashboardServerState,
    headers: &HeaderMap,
    read: impl FnOnce(&DashboardShell) -> Response,
) -> Response {
    let token = session_token_from_headers(headers);
    {
        let sessions = match state.lock_sessions() {
            Ok(sessions) => sessions,
            Err(error) => return error.into_response(),
        };
        if let Some(shell) = token.as_deref().and_then(|token| sessions.shell(token)) {
            return read(shell);
        }
    }
    read(&state.fresh_shell())
}

/// Dispatches `intent`, absorbing core errors into a warning.
fn apply_intent(shell: &mut DashboardShell, intent: DashboardIntent) -> Option<DashboardOutcome> {
    match shell.dispatch(intent) {
        Ok(outcome) => Some(outcome),
        Err(error) => {
            warn!(code = error.code(), %error, "dashboard intent rejected");
            None
        }
    }
}

fn redirect_to(path: &str) -> Response {
    Redirect::to(path).into_response()
}
