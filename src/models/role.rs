use std::fmt;
use std::str::FromStr;

/// Role label attached to a user record and checked by path rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Grants the `/admin/**` area.
    Admin,
    /// Grants the `/user/**` area.
    User,
}

impl Role {
    /// Name as written in rule configuration (`ADMIN`, `USER`).
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Granted authority string carried by an authenticated principal.
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.name())
    }

    /// Human-readable name shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "User",
        }
    }

    /// All defined roles in a stable display order.
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::User]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts both the bare name and the `ROLE_` authority form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        Role::all()
            .iter()
            .copied()
            .find(|role| role.name() == bare)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_is_prefixed() {
        assert_eq!(Role::Admin.authority(), "ROLE_ADMIN");
        assert_eq!(Role::User.authority(), "ROLE_USER");
    }

    #[test]
    fn parses_names_and_authorities() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ROLE_USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!(" User ".parse::<Role>().unwrap(), Role::User);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn every_role_parses_from_its_name_and_authority() {
        for r in Role::all() {
            assert_eq!(r.name().parse::<Role>().unwrap(), *r);
            assert_eq!(r.authority().parse::<Role>().unwrap(), *r);
            assert!(!r.label().is_empty(), "{:?} has empty label", r);
        }
    }
}
