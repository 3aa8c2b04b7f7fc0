use askama::Template;

use crate::models::CurrentUser;

#[derive(Template)]
#[template(path = "area.html")]
pub struct AreaTemplate {
    pub current_user: Option<CurrentUser>,
    pub title: &'static str,
    pub description: &'static str,
    pub path: String,
    pub logout_url: String,
    pub login_page: String,
}
