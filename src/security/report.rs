use crate::models::CurrentUser;

use super::filter_chain::SecurityFilterChain;

/// Outcome of evaluating one path for one principal, as printed by `check-access`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessReport {
    pub path: String,
    /// Username, or `anonymous`.
    pub principal: String,
    /// The deciding rule in `pattern access` form.
    pub rule: String,
    pub granted: bool,
}

impl AccessReport {
    pub fn verdict(&self) -> &'static str {
        if self.granted {
            "GRANTED"
        } else {
            "DENIED"
        }
    }

    /// Process exit status: 0 when granted, 1 when denied.
    pub fn exit_code(&self) -> i32 {
        if self.granted {
            0
        } else {
            1
        }
    }
}

pub fn evaluate_access(chain: &SecurityFilterChain, path: &str, principal: Option<&CurrentUser>) -> AccessReport {
    let rule = chain
        .matching_rule(path)
        .map(|r| format!("{} {}", r.pattern, r.access))
        .unwrap_or_else(|| format!("anyExchange {}", chain.any_exchange()));
    AccessReport {
        path: path.to_string(),
        principal: principal
            .map(|p| p.username.clone())
            .unwrap_or_else(|| "anonymous".to_string()),
        rule,
        granted: chain.authorize(path, principal).granted,
    }
}

/// `[position, pattern, access]` rows in evaluation order, ending with the `anyExchange` fallback.
pub fn rule_rows(chain: &SecurityFilterChain) -> Vec<[String; 3]> {
    let mut rows: Vec<[String; 3]> = chain
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| [(i + 1).to_string(), rule.pattern.to_string(), rule.access.to_string()])
        .collect();
    rows.push(["*".to_string(), "anyExchange".to_string(), chain.any_exchange().to_string()]);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn principal(name: &str, roles: &[Role]) -> CurrentUser {
        CurrentUser {
            username: name.into(),
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn denied_admin_path_exits_with_one() {
        let chain = SecurityFilterChain::default_chain();
        let report = evaluate_access(&chain, "/admin/x", Some(&principal("justuser", &[Role::User])));
        assert!(!report.granted);
        assert_eq!(report.verdict(), "DENIED");
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.principal, "justuser");
        assert!(report.rule.starts_with("/admin/**"), "{}", report.rule);
    }

    #[test]
    fn granted_path_exits_with_zero() {
        let chain = SecurityFilterChain::default_chain();
        let report = evaluate_access(&chain, "/shared/report", Some(&principal("privuser", &[Role::Admin])));
        assert_eq!(report.verdict(), "GRANTED");
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn unmatched_path_reports_any_exchange() {
        let chain = SecurityFilterChain::default_chain();
        let report = evaluate_access(&chain, "/other", None);
        assert!(report.granted);
        assert_eq!(report.principal, "anonymous");
        assert!(report.rule.starts_with("anyExchange "), "{}", report.rule);
    }

    #[test]
    fn rows_follow_rule_order_and_end_with_fallback() {
        let chain = SecurityFilterChain::default_chain();
        let rows = rule_rows(&chain);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[0][1], "/admin/**");
        assert_eq!(rows[1][1], "/user/**");
        assert_eq!(rows[2][1], "/shared/**");
        assert_eq!(rows[3][0], "*");
        assert_eq!(rows[3][1], "anyExchange");
    }
}
