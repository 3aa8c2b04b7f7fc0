use axum::{
    extract::{Extension, State},
    http::{StatusCode, Uri},
    response::Response,
};

use crate::config::HOME_PAGE;
use crate::models::{AppState, Principal};
use crate::templates::{AreaLink, AreaTemplate, IndexTemplate, NotFoundTemplate};

use super::helpers::{found, render_template, render_template_with_status};

/// Role-gated sections of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Admin,
    User,
    Shared,
}

impl Area {
    pub fn all() -> [Area; 3] {
        [Area::Admin, Area::User, Area::Shared]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Area::Admin => "/admin",
            Area::User => "/user",
            Area::Shared => "/shared",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Area::Admin => "Administration",
            Area::User => "User area",
            Area::Shared => "Shared area",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Area::Admin => "Only principals holding the ADMIN role get here.",
            Area::User => "Only principals holding the USER role get here.",
            Area::Shared => "Principals holding either USER or ADMIN get here.",
        }
    }
}

pub async fn root_get() -> Response {
    found(HOME_PAGE)
}

pub async fn index_get(
    State(state): State<AppState>,
    Extension(Principal(current_user)): Extension<Principal>,
) -> Response {
    // Links are shown only when the chain would let this principal through.
    let areas = Area::all()
        .into_iter()
        .filter(|area| state.security.authorize(area.path(), current_user.as_ref()).granted)
        .map(|area| AreaLink {
            href: area.path(),
            title: area.title(),
        })
        .collect();
    render_template(IndexTemplate {
        current_user,
        areas,
        logout_url: state.security.logout().logout_url.clone(),
        login_page: state.security.form_login().login_page.clone(),
    })
}

fn area_page(state: &AppState, area: Area, principal: Principal, uri: &Uri) -> Response {
    let Principal(current_user) = principal;
    render_template(AreaTemplate {
        current_user,
        title: area.title(),
        description: area.description(),
        path: uri.path().to_string(),
        logout_url: state.security.logout().logout_url.clone(),
        login_page: state.security.form_login().login_page.clone(),
    })
}

pub async fn admin_get(State(state): State<AppState>, Extension(p): Extension<Principal>, uri: Uri) -> Response {
    area_page(&state, Area::Admin, p, &uri)
}

pub async fn user_get(State(state): State<AppState>, Extension(p): Extension<Principal>, uri: Uri) -> Response {
    area_page(&state, Area::User, p, &uri)
}

pub async fn shared_get(State(state): State<AppState>, Extension(p): Extension<Principal>, uri: Uri) -> Response {
    area_page(&state, Area::Shared, p, &uri)
}

pub async fn not_found(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    uri: Uri,
) -> Response {
    let current_user = principal.and_then(|Extension(Principal(u))| u);
    render_template_with_status(
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            current_user,
            path: uri.path().to_string(),
            logout_url: state.security.logout().logout_url.clone(),
            login_page: state.security.form_login().login_page.clone(),
        },
    )
}
