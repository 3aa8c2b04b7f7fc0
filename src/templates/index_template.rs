use askama::Template;

use crate::models::CurrentUser;

/// Navigation entry for an area the current principal may open.
pub struct AreaLink {
    pub href: &'static str,
    pub title: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub areas: Vec<AreaLink>,
    pub logout_url: String,
    pub login_page: String,
}
