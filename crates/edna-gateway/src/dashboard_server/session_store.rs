//! Per-visitor dashboard sessions keyed by an opaque cookie token.
use super::*;

pub(super) const SESSION_COOKIE_NAME: &str = "edna_session";
/// Oldest sessions are dropped once the store grows past this.
pub(super) const MAX_DASHBOARD_SESSIONS: usize = 1_024;

#[derive(Debug, Default)]
pub(super) struct DashboardSessionStore {
    sessions: BTreeMap<String, DashboardShell>,
    total_sessions_issued: u64,
}

impl DashboardSessionStore {
    pub(super) fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    pub(super) fn shell(&self, token: &str) -> Option<&DashboardShell> {
        self.sessions.get(token)
    }

    pub(super) fn shell_mut(&mut self, token: &str) -> Option<&mut DashboardShell> {
        self.sessions.get_mut(token)
    }

    /// Tokens start with a fixed-width issue sequence, so key order is issue order.
    pub(super) fn insert(&mut self, token: String, shell: DashboardShell) {
        self.sessions.insert(token, shell);
        self.total_sessions_issued = self.total_sessions_issued.saturating_add(1);
        while self.sessions.len() > MAX_DASHBOARD_SESSIONS {
            if let Some((evicted, _)) = self.sessions.pop_first() {
                debug!(token = %evicted, "evicting oldest dashboard session");
            }
        }
    }

    pub(super) fn remove(&mut self, token: &str) -> Option<DashboardShell> {
        self.sessions.remove(token)
    }

    pub(super) fn len(&self) -> usize {
        self.sessions.len()
    }

    pub(super) fn total_sessions_issued(&self) -> u64 {
        self.total_sessions_issued
    }
}

/// Session token resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ResolvedSession {
    token: String,
    issued: bool,
}

impl ResolvedSession {
    pub(super) fn existing(token: String) -> Self {
        Self {
            token,
            issued: false,
        }
    }

    pub(super) fn issued(token: String) -> Self {
        Self {
            token,
            issued: true,
        }
    }

    pub(super) fn token(&self) -> &str {
        &self.token
    }

    /// Newly issued sessions hand their cookie to the browser.
    pub(super) fn attach_cookie(&self, response: Response) -> Response {
        if self.issued {
            with_cookie(response, &session_cookie(&self.token))
        } else {
            response
        }
    }
}

pub(super) fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

pub(super) fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub(super) fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub(super) fn with_cookie(mut response: Response, cookie: &str) -> Response {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(error) => warn!(%error, "dropping unencodable session cookie"),
    }
    response
}
