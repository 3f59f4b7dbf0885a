use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{ApiMessage, LoginRequest, RegisterRequest, ResetPasswordRequest},
        services::{
            create_user, find_user_by_email, normalize_email, validate_registration,
            verify_credentials,
        },
        session::{clear_cookie, SessionKeys, SessionUser},
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/reset_password", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(p)| p).map_err(|e| {
        warn!(error = %e, "rejected request body");
        AppError::validation("Invalid request body")
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiMessage>, AppError> {
    let payload = validate_registration(body(payload)?)?;

    // The UNIQUE constraint is the real guard; this only gives an early answer.
    if find_user_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    create_user(
        &state.db,
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(ApiMessage::ok("Registration successful!")))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiMessage>), AppError> {
    let payload = body(payload)?;
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let Some(user) = verify_credentials(&state.db, &email, &payload.password).await? else {
        warn!(email = %email, "login failed");
        return Err(AppError::InvalidCredentials);
    };

    let user = SessionUser::from(user);
    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign(&user)?;

    info!(user_id = user.user_id, "user logged in");
    Ok((
        jar.add(keys.session_cookie(token)),
        Json(ApiMessage::ok("Login successful!")),
    ))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(clear_cookie()), Redirect::to("/"))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Json<ApiMessage>, AppError> {
    let email = normalize_email(&body(payload)?.email);
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    match find_user_by_email(&state.db, &email).await? {
        // Existence check only; no message is dispatched.
        Some(user) => {
            info!(user_id = user.user_id, "password reset requested");
            Ok(Json(ApiMessage::ok(
                "Password reset instructions sent to your email!",
            )))
        }
        None => Err(AppError::EmailNotFound),
    }
}

#[instrument(skip(user), fields(user_id = user.user_id))]
pub async fn get_me(user: SessionUser) -> Json<SessionUser> {
    Json(user)
}

