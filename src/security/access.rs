use std::fmt;

use crate::models::{CurrentUser, Role};

/// Outcome of checking an [`Access`] against a principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub granted: bool,
}

impl AuthorizationDecision {
    pub const GRANTED: Self = Self { granted: true };
    pub const DENIED: Self = Self { granted: false };

    pub fn from_bool(granted: bool) -> Self {
        Self { granted }
    }
}

/// Requirement a path rule places on the request principal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    DenyAll,
    Authenticated,
    HasRole(Role),
    /// Granted when any listed role is held; roles are tried in order.
    HasAnyRole(Vec<Role>),
}

impl Access {
    pub fn has_any_role(roles: &[Role]) -> Self {
        Access::HasAnyRole(roles.to_vec())
    }

    pub fn check(&self, principal: Option<&CurrentUser>) -> AuthorizationDecision {
        match self {
            Access::PermitAll => AuthorizationDecision::GRANTED,
            Access::DenyAll => AuthorizationDecision::DENIED,
            Access::Authenticated => AuthorizationDecision::from_bool(principal.is_some()),
            Access::HasRole(role) => {
                AuthorizationDecision::from_bool(principal.is_some_and(|p| p.has_role(*role)))
            }
            Access::HasAnyRole(roles) => roles
                .iter()
                .map(|role| Access::HasRole(*role).check(principal))
                .find(|decision| decision.granted)
                .unwrap_or(AuthorizationDecision::DENIED),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::PermitAll => f.write_str("permitAll"),
            Access::DenyAll => f.write_str("denyAll"),
            Access::Authenticated => f.write_str("authenticated"),
            Access::HasRole(role) => write!(f, "hasRole('{}')", role),
            Access::HasAnyRole(roles) => {
                let names: Vec<String> = roles.iter().map(|r| format!("'{}'", r)).collect();
                write!(f, "hasAnyRole({})", names.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[Role]) -> CurrentUser {
        CurrentUser {
            username: "someone".into(),
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn has_role_requires_the_role() {
        let access = Access::HasRole(Role::Admin);
        assert!(access.check(Some(&user(&[Role::Admin]))).granted);
        assert!(access.check(Some(&user(&[Role::User, Role::Admin]))).granted);
        assert!(!access.check(Some(&user(&[Role::User]))).granted);
        assert!(!access.check(None).granted);
    }

    #[test]
    fn has_any_role_falls_through_to_next_role() {
        let access = Access::has_any_role(&[Role::User, Role::Admin]);
        assert!(access.check(Some(&user(&[Role::User]))).granted);
        assert!(access.check(Some(&user(&[Role::Admin]))).granted);
        assert!(!access.check(Some(&user(&[]))).granted);
        assert!(!access.check(None).granted);
        assert!(!Access::HasAnyRole(vec![]).check(Some(&user(&[Role::Admin]))).granted);
    }

    #[test]
    fn permit_deny_and_authenticated() {
        assert!(Access::PermitAll.check(None).granted);
        assert!(!Access::DenyAll.check(Some(&user(&[Role::Admin]))).granted);
        assert!(Access::Authenticated.check(Some(&user(&[]))).granted);
        assert!(!Access::Authenticated.check(None).granted);
    }

    #[test]
    fn display_uses_expression_form() {
        assert_eq!(Access::HasRole(Role::Admin).to_string(), "hasRole('ADMIN')");
        assert_eq!(
            Access::has_any_role(&[Role::User, Role::Admin]).to_string(),
            "hasAnyRole('USER','ADMIN')"
        );
        assert_eq!(Access::PermitAll.to_string(), "permitAll");
    }
}
