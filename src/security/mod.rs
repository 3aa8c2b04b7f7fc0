//! Authorization rules and the filter chain that applies them.
//!
//! - `path_pattern`: request path patterns (`/admin/**`, `/files/*.html`, `/users/{id}`)
//! - `access`: per-rule requirements (`hasRole`, `hasAnyRole`, `permitAll`, ...)
//! - `filter_chain`: ordered rules plus login/logout endpoints
//! - `headers`: default security response headers
//! - `report`: rule evaluation summaries for the command line

pub mod access;
pub mod filter_chain;
pub mod headers;
pub mod path_pattern;
pub mod report;

pub use access::{Access, AuthorizationDecision};
pub use filter_chain::{EntryPoint, FormLoginConfig, LogoutConfig, SecurityFilterChain, SecurityRule};
pub use headers::with_security_headers;
pub use path_pattern::PathPattern;
pub use report::{evaluate_access, rule_rows, AccessReport};
