use askama::Template;

use crate::models::CurrentUser;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    /// Form action; the login page also processes the submitted credentials.
    pub login_page: String,
    pub logout_url: String,
    pub error: bool,
    pub logged_out: bool,
}
