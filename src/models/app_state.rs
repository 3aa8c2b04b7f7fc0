use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Settings;
use crate::models::session::Session;
use crate::models::user_record::UserRecord;
use crate::security::{EntryPoint, SecurityFilterChain};
use crate::services::demo_users;

#[derive(Clone)]
pub struct AppState {
    /// Immutable user-details map keyed by lower-cased username.
    pub users: Arc<HashMap<String, UserRecord>>,
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
    pub security: Arc<SecurityFilterChain>,
    pub settings: Arc<Settings>,
    pub custom_css: Option<String>,
}

impl AppState {
    /// State with the three demo users and the default filter chain.
    pub fn new(settings: Settings) -> Self {
        let entry_point = if settings.redirect_anonymous_to_login {
            EntryPoint::RedirectToLoginPage
        } else {
            EntryPoint::Forbidden
        };
        let chain = SecurityFilterChain::default_chain().with_entry_point(entry_point);
        Self::with_chain(settings, chain)
    }

    pub fn with_chain(settings: Settings, security: SecurityFilterChain) -> Self {
        let users = demo_users(settings.pbkdf2_iterations);
        Self {
            users: Arc::new(users),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            security: Arc::new(security),
            settings: Arc::new(settings),
            custom_css: None,
        }
    }

    /// Session map guard; a poisoned lock still holds consistent entries, so it is recovered.
    pub fn lock_sessions(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
