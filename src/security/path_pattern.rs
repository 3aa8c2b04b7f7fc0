use std::fmt;
use std::str::FromStr;

use crate::error::SecurityError;
use crate::utils::decode_segment;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Segment containing `*` or `?` wildcards.
    Glob(String),
    /// `{name}`: exactly one segment.
    Capture,
    /// `**` or `{*name}`: zero or more trailing segments.
    CatchAll,
}

/// Request path pattern such as `/admin/**`, `/files/*.html` or `/users/{id}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, SecurityError> {
        let invalid = |reason| SecurityError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };
        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        let body = &pattern[1..];
        let parts: Vec<&str> = if body.is_empty() { Vec::new() } else { body.split('/').collect() };
        let mut segments = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let last = i + 1 == parts.len();
            let segment = if *part == "**" || (part.starts_with("{*") && part.ends_with('}')) {
                if !last {
                    return Err(invalid("'**' is only allowed as the last segment"));
                }
                Segment::CatchAll
            } else if part.starts_with('{') && part.ends_with('}') && part.len() > 2 {
                Segment::Capture
            } else if part.contains('{') || part.contains('}') {
                return Err(invalid("unbalanced '{' in segment"));
            } else if part.contains("**") {
                return Err(invalid("'**' must be a whole segment"));
            } else if part.contains('*') || part.contains('?') {
                Segment::Glob((*part).to_string())
            } else {
                Segment::Literal((*part).to_string())
            };
            segments.push(segment);
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// `<prefix>/**` built from literal segments; never fails.
    pub fn prefix(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let mut segments: Vec<Segment> = trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| Segment::Literal(s.to_string()))
            .collect();
        segments.push(Segment::CatchAll);
        let raw = if trimmed.is_empty() {
            "/**".to_string()
        } else {
            format!("/{}/**", trimmed)
        };
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a request path (without query). A single trailing `/` is tolerated.
    pub fn matches(&self, path: &str) -> bool {
        if !path.starts_with('/') {
            return false;
        }
        let trimmed = if path.len() > 1 { path.strip_suffix('/').unwrap_or(path) } else { path };
        let body = &trimmed[1..];
        let parts: Vec<_> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').map(decode_segment).collect()
        };

        for (i, segment) in self.segments.iter().enumerate() {
            if *segment == Segment::CatchAll {
                return true;
            }
            let Some(part) = parts.get(i) else {
                return false;
            };
            let ok = match segment {
                Segment::Literal(lit) => lit.as_str() == &**part,
                Segment::Glob(glob) => glob_match(glob, part),
                Segment::Capture => !part.is_empty(),
                Segment::CatchAll => true,
            };
            if !ok {
                return false;
            }
        }
        parts.len() == self.segments.len()
    }
}

/// `*` matches any run of characters, `?` exactly one.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|c| *c == '*')
}

impl FromStr for PathPattern {
    type Err = SecurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathPattern {
        PathPattern::parse(s).unwrap()
    }

    #[test]
    fn catch_all_matches_prefix_and_descendants() {
        let admin = p("/admin/**");
        assert!(admin.matches("/admin"));
        assert!(admin.matches("/admin/"));
        assert!(admin.matches("/admin/x"));
        assert!(admin.matches("/admin/x/y/z"));
        assert!(!admin.matches("/administrator"));
        assert!(!admin.matches("/other/admin"));
        assert!(!admin.matches("/Admin/x"));
    }

    #[test]
    fn prefix_constructor_equals_parsed_pattern() {
        assert_eq!(PathPattern::prefix("/shared"), p("/shared/**"));
        assert_eq!(PathPattern::prefix("shared/"), p("/shared/**"));
        assert_eq!(PathPattern::prefix("/").as_str(), "/**");
        assert!(PathPattern::prefix("/").matches("/anything/at/all"));
    }

    #[test]
    fn literal_patterns_match_exactly() {
        let login = p("/login.html");
        assert!(login.matches("/login.html"));
        assert!(login.matches("/login.html/"));
        assert!(!login.matches("/login.htm"));
        assert!(!login.matches("/login.html/x"));
        let root = p("/");
        assert!(root.matches("/"));
        assert!(!root.matches("/x"));
    }

    #[test]
    fn wildcards_stay_within_one_segment() {
        let html = p("/static/*.html");
        assert!(html.matches("/static/index.html"));
        assert!(!html.matches("/static/nested/index.html"));
        assert!(!html.matches("/static/index.css"));
        let single = p("/v?/items");
        assert!(single.matches("/v1/items"));
        assert!(!single.matches("/v10/items"));
        let capture = p("/users/{id}/profile");
        assert!(capture.matches("/users/42/profile"));
        assert!(!capture.matches("/users/profile"));
    }

    #[test]
    fn request_segments_are_percent_decoded() {
        assert!(p("/admin/**").matches("/%61dmin/x"));
        assert!(p("/user/{name}").matches("/user/a%20b"));
    }

    #[test]
    fn named_catch_all_is_supported() {
        let files = p("/files/{*path}");
        assert!(files.matches("/files"));
        assert!(files.matches("/files/a/b"));
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        assert!(PathPattern::parse("admin/**").is_err());
        assert!(PathPattern::parse("/a/**/b").is_err());
        assert!(PathPattern::parse("/a/x**").is_err());
        assert!(PathPattern::parse("/a/{id").is_err());
    }

    #[test]
    fn relative_paths_never_match() {
        assert!(!p("/**").matches("admin"));
        assert!(!p("/**").matches(""));
    }
}
