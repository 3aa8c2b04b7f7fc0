use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::HOME_PAGE;
use crate::handlers::{auth, middleware::authorization_middleware, pages};
use crate::models::AppState;
use crate::security::with_security_headers;

// Embed the default stylesheet in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app(state: AppState) -> Router {
    let stylesheet = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
    let login_page = state.security.form_login().login_page.clone();
    let logout_url = state.security.logout().logout_url.clone();

    // Login processing and logout run ahead of the path rules.
    let auth_routes = Router::new()
        .route(&login_page, get(auth::login_get).post(auth::login_post))
        .route(&logout_url, post(auth::logout_post));

    let secured_routes = Router::new()
        .route("/", get(pages::root_get))
        .route(HOME_PAGE, get(pages::index_get))
        .route("/admin", get(pages::admin_get))
        .route("/admin/*rest", get(pages::admin_get))
        .route("/user", get(pages::user_get))
        .route("/user/*rest", get(pages::user_get))
        .route("/shared", get(pages::shared_get))
        .route("/shared/*rest", get(pages::shared_get))
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(ServeDir::new("static")),
        )
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authorization_middleware));

    with_security_headers(secured_routes.merge(auth_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
