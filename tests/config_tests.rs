use std::env;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use rocks::config::{self, Settings};

// Tests below mutate process-wide env vars
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_cookie_name_keeps_valid_token() {
    assert_eq!(config::sanitize_cookie_name("JSESSIONID"), "JSESSIONID");
    assert_eq!(config::sanitize_cookie_name("  rocks_session  "), "rocks_session");
}

#[test]
fn test_sanitize_cookie_name_rejects_separators() {
    assert_eq!(config::sanitize_cookie_name("bad name"), "SESSION");
    assert_eq!(config::sanitize_cookie_name("a;b"), "SESSION");
    assert_eq!(config::sanitize_cookie_name(""), "SESSION");
}

#[test]
fn test_settings_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for key in [
        "PBKDF2_ITERATIONS",
        "SESSION_COOKIE_NAME",
        "SESSION_TIMEOUT_SECS",
        "REDIRECT_ANONYMOUS_TO_LOGIN",
    ] {
        env::remove_var(key);
    }

    let settings = Settings::from_env();

    assert_eq!(settings.pbkdf2_iterations, config::DEFAULT_PBKDF2_ITERATIONS);
    assert_eq!(settings.session_cookie_name, "SESSION");
    assert_eq!(settings.session_timeout_secs, 1800);
    assert!(!settings.redirect_anonymous_to_login);
}

#[test]
fn test_settings_from_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("PBKDF2_ITERATIONS", "2000");
    env::set_var("SESSION_COOKIE_NAME", "ROCKS");
    env::set_var("SESSION_TIMEOUT_SECS", "60");
    env::set_var("REDIRECT_ANONYMOUS_TO_LOGIN", "yes");

    let settings = Settings::from_env();

    assert_eq!(settings.pbkdf2_iterations, 2000);
    assert_eq!(settings.session_cookie_name, "ROCKS");
    assert_eq!(settings.session_timeout_secs, 60);
    assert!(settings.redirect_anonymous_to_login);

    // Clean up
    for key in [
        "PBKDF2_ITERATIONS",
        "SESSION_COOKIE_NAME",
        "SESSION_TIMEOUT_SECS",
        "REDIRECT_ANONYMOUS_TO_LOGIN",
    ] {
        env::remove_var(key);
    }
}

#[test]
fn test_invalid_numbers_fall_back_to_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("PBKDF2_ITERATIONS", "0");
    env::set_var("SESSION_TIMEOUT_SECS", "soon");

    assert_eq!(config::get_pbkdf2_iterations(), config::DEFAULT_PBKDF2_ITERATIONS);
    assert_eq!(config::get_session_timeout_secs(), config::DEFAULT_SESSION_TIMEOUT_SECS);

    env::remove_var("PBKDF2_ITERATIONS");
    env::remove_var("SESSION_TIMEOUT_SECS");
}

#[test]
fn test_host_and_port() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("HOST", "0.0.0.0");
    env::set_var("PORT", "9090");
    assert_eq!(config::get_host(), "0.0.0.0");
    assert_eq!(config::get_port(), 9090);

    env::set_var("PORT", "not-a-port");
    env::remove_var("HOST");
    assert_eq!(config::get_host(), config::DEFAULT_HOST);
    assert_eq!(config::get_port(), config::DEFAULT_PORT);

    env::remove_var("PORT");
}
