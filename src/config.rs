use std::env;
use std::path::Path;

use crate::utils::{parse_flag, parse_optional_u64};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "SESSION";
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 1800;
pub const DEFAULT_REDIRECT_ANONYMOUS_TO_LOGIN: bool = false;

// Demo credentials seeded at startup
pub const DEMO_PASSWORD: &str = "password";

// Security endpoints
pub const LOGIN_PAGE: &str = "/login.html";
pub const LOGOUT_URL: &str = "/logout";
pub const HOME_PAGE: &str = "/index.html";
pub const LOGOUT_SUCCESS_URL: &str = HOME_PAGE;
pub const DEFAULT_SUCCESS_URL: &str = "/";

/// Runtime settings resolved from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub pbkdf2_iterations: u32,
    pub session_cookie_name: String,
    pub session_timeout_secs: u64,
    pub redirect_anonymous_to_login: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            redirect_anonymous_to_login: DEFAULT_REDIRECT_ANONYMOUS_TO_LOGIN,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            pbkdf2_iterations: get_pbkdf2_iterations(),
            session_cookie_name: get_session_cookie_name(),
            session_timeout_secs: get_session_timeout_secs(),
            redirect_anonymous_to_login: get_redirect_anonymous_to_login(),
        }
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_host() -> String {
    env::var("HOST")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn get_pbkdf2_iterations() -> u32 {
    parse_optional_u64(env::var("PBKDF2_ITERATIONS").ok().as_deref())
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PBKDF2_ITERATIONS)
}

pub fn get_session_cookie_name() -> String {
    sanitize_cookie_name(&env::var("SESSION_COOKIE_NAME").unwrap_or_default())
}

pub fn get_session_timeout_secs() -> u64 {
    parse_optional_u64(env::var("SESSION_TIMEOUT_SECS").ok().as_deref())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_SESSION_TIMEOUT_SECS)
}

pub fn get_redirect_anonymous_to_login() -> bool {
    parse_flag(
        env::var("REDIRECT_ANONYMOUS_TO_LOGIN").ok().as_deref(),
        DEFAULT_REDIRECT_ANONYMOUS_TO_LOGIN,
    )
}

/// Cookie names are tokens; anything with separators or whitespace falls back to the default.
pub fn sanitize_cookie_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    if valid {
        trimmed.to_string()
    } else {
        DEFAULT_SESSION_COOKIE_NAME.to_string()
    }
}
