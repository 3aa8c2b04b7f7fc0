use askama::Template;

use crate::models::CurrentUser;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub current_user: Option<CurrentUser>,
    pub path: String,
    pub logout_url: String,
    pub login_page: String,
}
