use time::{Duration, OffsetDateTime};

/// Server-side login session keyed by the session cookie value.
#[derive(Clone, Debug)]
pub struct Session {
    pub username: String,
    pub created_at: OffsetDateTime,
    pub last_accessed: OffsetDateTime,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            username: username.into(),
            created_at: now,
            last_accessed: now,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime, max_idle: Duration) -> bool {
        now - self.last_accessed > max_idle
    }

    /// Time since login, regardless of activity.
    pub fn age(&self, now: OffsetDateTime) -> Duration {
        now - self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_after_idle_interval() {
        let session = Session::new("justuser");
        let idle = Duration::seconds(60);
        assert!(!session.is_expired(session.last_accessed + Duration::seconds(59), idle));
        assert!(!session.is_expired(session.last_accessed + Duration::seconds(60), idle));
        assert!(session.is_expired(session.last_accessed + Duration::seconds(61), idle));
    }

    #[test]
    fn age_counts_from_login_not_last_access() {
        let mut session = Session::new("admin");
        let login = session.created_at;
        session.last_accessed = login + Duration::minutes(5);
        assert_eq!(session.age(login + Duration::minutes(7)), Duration::minutes(7));
        assert!(!session.is_expired(login + Duration::minutes(7), Duration::minutes(3)));
    }
}
