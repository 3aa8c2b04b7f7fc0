use std::collections::BTreeSet;

use super::Role;

/// Credential record held by the in-memory user-details store.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub username: String,
    /// Encoded password hash, never the raw password.
    pub password: String,
    pub roles: BTreeSet<Role>,
}

impl UserRecord {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name().to_string()).collect()
    }
}
