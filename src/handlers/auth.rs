use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::config::HOME_PAGE;
use crate::models::AppState;
use crate::services::{authenticate, create_session, invalidate_session};
use crate::templates::LoginTemplate;

use super::helpers::{
    clear_session_cookie, current_user_from_jar, found, is_safe_redirect, render_template, session_cookie,
    session_id_from_jar, SAVED_REQUEST_COOKIE,
};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `?error` after a failed attempt, `?logout` after signing out.
#[derive(Deserialize, Default)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

pub async fn login_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    if current_user_from_jar(&state, &jar).is_some() {
        return found(HOME_PAGE);
    }
    render_template(LoginTemplate {
        current_user: None,
        login_page: state.security.form_login().login_page.clone(),
        logout_url: state.security.logout().logout_url.clone(),
        error: query.error.is_some(),
        logged_out: query.logout.is_some(),
    })
}

pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let form_login = state.security.form_login().clone();
    match authenticate(&state.users, &form.username, &form.password) {
        Ok(user) => {
            let previous = session_id_from_jar(&state, &jar);
            let sid = create_session(&state, &user.username, previous.as_deref());
            tracing::info!(username = %user.username, authorities = ?user.authorities(), "Login succeeded");

            let saved = jar
                .get(SAVED_REQUEST_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|t| is_safe_redirect(t));
            let jar = if jar.get(SAVED_REQUEST_COOKIE).is_some() {
                jar.remove(Cookie::build((SAVED_REQUEST_COOKIE, "")).path("/"))
            } else {
                jar
            };
            let target = saved.unwrap_or(form_login.default_success_url);
            (jar.add(session_cookie(&state, sid)), found(&target)).into_response()
        }
        Err(e) => {
            tracing::warn!(username = %form.username.trim(), error = %e, "Login failed");
            found(&form_login.failure_url)
        }
    }
}

pub async fn logout_post(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(sid) = session_id_from_jar(&state, &jar) {
        if let Some(session) = invalidate_session(&state, &sid) {
            let age = session.age(OffsetDateTime::now_utc());
            tracing::info!(username = %session.username, session_secs = age.whole_seconds(), "Logout");
        }
    }
    let cleared = clear_session_cookie(&state, jar);
    let target = state.security.logout().success_url.clone();
    (cleared, found(&target)).into_response()
}
