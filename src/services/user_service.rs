use std::collections::{BTreeSet, HashMap};

use constant_time_eq::constant_time_eq;
use hex::encode as hex_encode;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::config::DEMO_PASSWORD;
use crate::error::SecurityError;
use crate::models::{CurrentUser, Role, UserRecord};

const HASH_PREFIX: &str = "pbkdf2:sha256:";

pub fn generate_password_hash(password: &str, iterations: u32) -> String {
    let mut salt_bytes = [0u8; 12];
    rand::rngs::OsRng.fill_bytes(&mut salt_bytes);
    let salt = hex_encode(salt_bytes);
    let mut dk = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut dk);
    format!("{}{}${}${}", HASH_PREFIX, iterations, salt, hex_encode(dk))
}

/// Checks a candidate against an encoded hash. Malformed encodings never verify.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some(rest) = stored.strip_prefix(HASH_PREFIX) else {
        return false;
    };
    let Some((iter_s, salt_hash)) = rest.split_once('$') else {
        return false;
    };
    let Some((salt, expected_hash)) = salt_hash.split_once('$') else {
        return false;
    };
    let Ok(iter) = iter_s.parse::<u32>() else {
        return false;
    };
    if iter == 0 {
        return false;
    }
    let mut dk = [0u8; 32];
    pbkdf2_hmac::<Sha256>(candidate.as_bytes(), salt.as_bytes(), iter, &mut dk);
    constant_time_eq(hex_encode(dk).as_bytes(), expected_hash.as_bytes())
}

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex_encode(b)
}

/// The three demo accounts, all with the demo password.
pub fn demo_users(iterations: u32) -> HashMap<String, UserRecord> {
    let accounts: [(&str, &[Role]); 3] = [
        ("privuser", &[Role::Admin]),
        ("justuser", &[Role::User]),
        ("admin", &[Role::User, Role::Admin]),
    ];
    accounts
        .into_iter()
        .map(|(username, roles)| {
            let record = UserRecord {
                username: username.to_string(),
                password: generate_password_hash(DEMO_PASSWORD, iterations),
                roles: roles.iter().copied().collect::<BTreeSet<_>>(),
            };
            (username.to_lowercase(), record)
        })
        .collect()
}

pub fn find_user<'a>(users: &'a HashMap<String, UserRecord>, username: &str) -> Option<&'a UserRecord> {
    users.get(&username.trim().to_lowercase())
}

pub fn authenticate(
    users: &HashMap<String, UserRecord>,
    username: &str,
    password: &str,
) -> Result<CurrentUser, SecurityError> {
    let record = find_user(users, username).ok_or(SecurityError::InvalidCredentials)?;
    if verify_password(&record.password, password) {
        Ok(CurrentUser::from(record))
    } else {
        Err(SecurityError::InvalidCredentials)
    }
}
