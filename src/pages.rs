use std::path::Path;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::{error, warn};

use crate::{
    auth::session::{require_session, SessionUser},
    state::AppState,
};

/// `(route, file stem)` pairs served from the pages directory.
const PUBLIC_PAGES: &[(&str, &str)] = &[
    ("/signup", "signup"),
    ("/signin", "signin"),
    ("/forgot-password", "forgot_password"),
];

pub(crate) const GATED_PAGES: &[(&str, &str)] = &[
    ("/dashboard", "dashboard"),
    ("/quiz", "quiz"),
    ("/images", "images"),
    ("/puzzle", "puzzle"),
];

pub fn router(state: AppState) -> Router<AppState> {
    let mut public = Router::new().route("/", get(index));
    for &(path, page) in PUBLIC_PAGES {
        public = public.route(path, get(move |State(st): State<AppState>| serve(st, page)));
    }

    let mut gated = Router::new();
    for &(path, page) in GATED_PAGES {
        gated = gated.route(path, get(move |State(st): State<AppState>| serve(st, page)));
    }
    let gated = gated.route_layer(middleware::from_fn_with_state(state, require_session));

    public.merge(gated)
}

async fn index(State(state): State<AppState>, user: Option<SessionUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    render_page(&state.config.pages_dir, "landing").await
}

async fn serve(state: AppState, page: &'static str) -> Response {
    render_page(&state.config.pages_dir, page).await
}

pub async fn render_page(dir: &Path, page: &str) -> Response {
    let path = dir.join(format!("{page}.html"));
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "page file missing");
            (StatusCode::NOT_FOUND, "Page not found").into_response()
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "read page failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn render_page_serves_html_or_404() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("quiz.html"), "<h1>quiz</h1>").unwrap();

        let ok = render_page(dir.path(), "quiz").await;
        assert_eq!(ok.status(), StatusCode::OK);

        let missing = render_page(dir.path(), "puzzle").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
