pub mod session_service;
pub mod user_service;

// Re-export commonly used functions
pub use session_service::{create_session, invalidate_session, purge_expired_sessions, resolve_session};
pub use user_service::{authenticate, demo_users, find_user, generate_password_hash, random_session_id, verify_password};
