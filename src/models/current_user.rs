use super::{Role, UserRecord};

/// Authenticated principal of a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(Role::authority).collect()
    }

    pub fn role_names(&self) -> Vec<&'static str> {
        self.roles.iter().map(Role::name).collect()
    }
}

impl From<&UserRecord> for CurrentUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            roles: record.roles.iter().copied().collect(),
        }
    }
}

/// Principal attached to a request by the authorization middleware; `None` for anonymous requests.
#[derive(Clone, Debug, Default)]
pub struct Principal(pub Option<CurrentUser>);
