use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::DEFAULT_SUCCESS_URL;
use crate::error::SecurityError;
use crate::models::{AppState, CurrentUser};
use crate::services::{find_user, resolve_session};

/// Cookie remembering the page an anonymous user was sent to the login page from.
pub const SAVED_REQUEST_COOKIE: &str = "SAVED_REQUEST";

/// `302 Found` to `target`. Targets that are not valid header values go to `/` instead.
pub fn found(target: &str) -> Response {
    let location = HeaderValue::try_from(target)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_SUCCESS_URL));
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

pub fn session_id_from_jar(state: &AppState, jar: &CookieJar) -> Option<String> {
    jar.get(&state.settings.session_cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub fn current_username_from_jar(state: &AppState, jar: &CookieJar) -> Option<String> {
    let sid = session_id_from_jar(state, jar)?;
    resolve_session(state, &sid)
}

pub fn current_user_from_jar(state: &AppState, jar: &CookieJar) -> Option<CurrentUser> {
    let username = current_username_from_jar(state, jar)?;
    find_user(&state.users, &username).map(CurrentUser::from)
}

pub fn session_cookie(state: &AppState, sid: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.session_cookie_name.clone(), sid);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn clear_session_cookie(state: &AppState, jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((state.settings.session_cookie_name.clone(), "")).path("/"))
}

pub fn saved_request_cookie(target: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SAVED_REQUEST_COOKIE, target);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Only same-origin absolute paths are accepted as post-login targets.
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => SecurityError::from(e).into_response(),
    }
}

pub fn render_template_with_status<T: askama::Template>(status: StatusCode, t: T) -> Response {
    let mut response = render_template(t);
    if response.status().is_success() {
        *response.status_mut() = status;
    }
    response
}
