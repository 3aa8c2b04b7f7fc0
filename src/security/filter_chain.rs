use crate::config::{DEFAULT_SUCCESS_URL, LOGIN_PAGE, LOGOUT_SUCCESS_URL, LOGOUT_URL};
use crate::error::SecurityError;
use crate::models::{CurrentUser, Role};

use super::access::{Access, AuthorizationDecision};
use super::path_pattern::PathPattern;

/// One `pattern -> access` entry of the authorization table.
#[derive(Clone, Debug)]
pub struct SecurityRule {
    pub pattern: PathPattern,
    pub access: Access,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormLoginConfig {
    /// Rendered on GET, processes credentials on POST.
    pub login_page: String,
    pub default_success_url: String,
    pub failure_url: String,
}

impl FormLoginConfig {
    pub fn new(login_page: &str) -> Self {
        Self {
            login_page: login_page.to_string(),
            default_success_url: DEFAULT_SUCCESS_URL.to_string(),
            failure_url: format!("{}?error", login_page),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoutConfig {
    pub logout_url: String,
    pub success_url: String,
}

/// What happens when an anonymous request is denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPoint {
    /// Same as any other denial: 403.
    Forbidden,
    /// Redirect to the login page and remember the requested path.
    RedirectToLoginPage,
}

/// Ordered authorization rules plus the login/logout endpoints they sit behind.
#[derive(Clone, Debug)]
pub struct SecurityFilterChain {
    rules: Vec<SecurityRule>,
    any_exchange: Access,
    form_login: FormLoginConfig,
    logout: LogoutConfig,
    entry_point: EntryPoint,
}

impl SecurityFilterChain {
    pub fn builder() -> SecurityFilterChainBuilder {
        SecurityFilterChainBuilder::default()
    }

    /// `/admin/**` needs ADMIN, `/user/**` needs USER, `/shared/**` needs USER or ADMIN,
    /// everything else is open.
    pub fn default_chain() -> Self {
        Self::builder()
            .form_login(LOGIN_PAGE)
            .logout(LOGOUT_URL, LOGOUT_SUCCESS_URL)
            .path_matcher(PathPattern::prefix("/admin"), Access::HasRole(Role::Admin))
            .path_matcher(PathPattern::prefix("/user"), Access::HasRole(Role::User))
            .path_matcher(
                PathPattern::prefix("/shared"),
                Access::has_any_role(&[Role::User, Role::Admin]),
            )
            .any_exchange(Access::PermitAll)
            .build()
    }

    pub fn with_entry_point(mut self, entry_point: EntryPoint) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn rules(&self) -> &[SecurityRule] {
        &self.rules
    }

    pub fn any_exchange(&self) -> &Access {
        &self.any_exchange
    }

    pub fn form_login(&self) -> &FormLoginConfig {
        &self.form_login
    }

    pub fn logout(&self) -> &LogoutConfig {
        &self.logout
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    /// First rule whose pattern matches `path`.
    pub fn matching_rule(&self, path: &str) -> Option<&SecurityRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    pub fn access_for(&self, path: &str) -> &Access {
        self.matching_rule(path)
            .map(|rule| &rule.access)
            .unwrap_or(&self.any_exchange)
    }

    pub fn authorize(&self, path: &str, principal: Option<&CurrentUser>) -> AuthorizationDecision {
        self.access_for(path).check(principal)
    }
}

pub struct SecurityFilterChainBuilder {
    rules: Vec<SecurityRule>,
    any_exchange: Access,
    form_login: FormLoginConfig,
    logout: LogoutConfig,
    entry_point: EntryPoint,
}

impl Default for SecurityFilterChainBuilder {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            any_exchange: Access::PermitAll,
            form_login: FormLoginConfig::new(LOGIN_PAGE),
            logout: LogoutConfig {
                logout_url: LOGOUT_URL.to_string(),
                success_url: LOGOUT_SUCCESS_URL.to_string(),
            },
            entry_point: EntryPoint::Forbidden,
        }
    }
}

impl SecurityFilterChainBuilder {
    pub fn form_login(mut self, login_page: &str) -> Self {
        self.form_login = FormLoginConfig::new(login_page);
        self
    }

    pub fn logout(mut self, logout_url: &str, success_url: &str) -> Self {
        self.logout = LogoutConfig {
            logout_url: logout_url.to_string(),
            success_url: success_url.to_string(),
        };
        self
    }

    pub fn path_matcher(mut self, pattern: PathPattern, access: Access) -> Self {
        self.rules.push(SecurityRule { pattern, access });
        self
    }

    pub fn path_matchers(self, pattern: &str, access: Access) -> Result<Self, SecurityError> {
        Ok(self.path_matcher(PathPattern::parse(pattern)?, access))
    }

    /// Access applied when no rule matches.
    pub fn any_exchange(mut self, access: Access) -> Self {
        self.any_exchange = access;
        self
    }

    pub fn build(self) -> SecurityFilterChain {
        SecurityFilterChain {
            rules: self.rules,
            any_exchange: self.any_exchange,
            form_login: self.form_login,
            logout: self.logout,
            entry_point: self.entry_point,
        }
    }
}
