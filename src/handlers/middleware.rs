use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::SecurityError;
use crate::handlers::helpers::{current_user_from_jar, found, saved_request_cookie};
use crate::models::{AppState, Principal};
use crate::security::EntryPoint;

/// Resolves the session principal and applies the filter chain's path rules.
pub async fn authorization_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = current_user_from_jar(&state, &jar);
    let path = request.uri().path().to_string();

    if state.security.authorize(&path, principal.as_ref()).granted {
        request.extensions_mut().insert(Principal(principal));
        return next.run(request).await;
    }

    if principal.is_none() && state.security.entry_point() == EntryPoint::RedirectToLoginPage {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.clone());
        tracing::info!(%path, "Anonymous request to protected path, redirecting to login page");
        let login_page = &state.security.form_login().login_page;
        return (jar.add(saved_request_cookie(target)), found(login_page)).into_response();
    }

    SecurityError::access_denied(&path, principal.as_ref().map(|p| p.username.as_str())).into_response()
}
