use time::{Duration, OffsetDateTime};

use crate::models::{AppState, Session};
use crate::services::random_session_id;

fn max_idle(state: &AppState) -> Duration {
    Duration::seconds(i64::try_from(state.settings.session_timeout_secs).unwrap_or(i64::MAX))
}

/// Starts a fresh session for `username`. A previous session id, if any, is discarded.
pub fn create_session(state: &AppState, username: &str, previous: Option<&str>) -> String {
    let sid = random_session_id();
    let mut sessions = state.lock_sessions();
    if let Some(old) = previous {
        sessions.remove(old);
    }
    sessions.insert(sid.clone(), Session::new(username));
    sid
}

/// Username bound to `sid`, refreshing its idle timer. Expired sessions are removed.
pub fn resolve_session(state: &AppState, sid: &str) -> Option<String> {
    let now = OffsetDateTime::now_utc();
    let idle = max_idle(state);
    let mut sessions = state.lock_sessions();
    let session = sessions.get_mut(sid)?;
    if session.is_expired(now, idle) {
        tracing::debug!(username = %session.username, "Session expired");
        sessions.remove(sid);
        return None;
    }
    session.last_accessed = now;
    Some(session.username.clone())
}

pub fn invalidate_session(state: &AppState, sid: &str) -> Option<Session> {
    state.lock_sessions().remove(sid)
}

/// Drops every expired session and returns how many were removed.
pub fn purge_expired_sessions(state: &AppState) -> usize {
    let now = OffsetDateTime::now_utc();
    let idle = max_idle(state);
    let mut sessions = state.lock_sessions();
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_expired(now, idle));
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn state() -> AppState {
        AppState::new(Settings {
            pbkdf2_iterations: 1_000,
            ..Settings::default()
        })
    }

    #[test]
    fn create_then_resolve() {
        let state = state();
        let sid = create_session(&state, "admin", None);
        assert_eq!(resolve_session(&state, &sid).as_deref(), Some("admin"));
        assert_eq!(resolve_session(&state, "unknown"), None);
    }

    #[test]
    fn new_session_replaces_previous_id() {
        let state = state();
        let first = create_session(&state, "admin", None);
        let second = create_session(&state, "justuser", Some(&first));
        assert_ne!(first, second);
        assert_eq!(resolve_session(&state, &first), None);
        assert_eq!(resolve_session(&state, &second).as_deref(), Some("justuser"));
    }

    #[test]
    fn invalidated_session_no_longer_resolves() {
        let state = state();
        let sid = create_session(&state, "privuser", None);
        assert!(invalidate_session(&state, &sid).is_some());
        assert_eq!(resolve_session(&state, &sid), None);
        assert!(invalidate_session(&state, &sid).is_none());
    }

    #[test]
    fn expired_sessions_are_dropped() {
        let state = state();
        let sid = create_session(&state, "admin", None);
        let fresh = create_session(&state, "justuser", None);
        state.lock_sessions().get_mut(&sid).unwrap().last_accessed -= Duration::hours(1);
        assert_eq!(purge_expired_sessions(&state), 1);
        assert_eq!(resolve_session(&state, &sid), None);
        assert_eq!(resolve_session(&state, &fresh).as_deref(), Some("justuser"));
    }

    #[test]
    fn resolve_rejects_expired_session() {
        let state = state();
        let sid = create_session(&state, "admin", None);
        state.lock_sessions().get_mut(&sid).unwrap().last_accessed -= Duration::hours(1);
        assert_eq!(resolve_session(&state, &sid), None);
        assert!(state.lock_sessions().is_empty());
    }
}
