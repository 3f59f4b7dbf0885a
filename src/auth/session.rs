//! Cookie-borne sessions.
//!
//! A session is a signed HS256 token holding `{user_id, username, email}`,
//! stored in an HttpOnly cookie. Nothing is persisted server side: logging out
//! clears the cookie and expiry is the token's `exp`.

use std::time::Duration;

use axum::{
    extract::{FromRef, FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{
    auth::repo_types::{User, UserId},
    config::SessionConfig,
    state::AppState,
};

pub const SESSION_COOKIE: &str = "moodtunes_session";
pub const SIGNIN_PATH: &str = "/signin";

/// Identity carried by an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

impl From<User> for SessionUser {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            email: u.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,
    pub username: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
    pub secure: bool,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.session)
    }
}

impl SessionKeys {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            // Negative is zero; overflow saturates and is refused by `sign`.
            ttl: Duration::from_secs(
                u64::try_from(cfg.ttl_minutes).map_or(0, |m| m.saturating_mul(60)),
            ),
            secure: cfg.cookie_secure,
        }
    }

    pub fn sign(&self, user: &SessionUser) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
            .ok_or_else(|| anyhow::anyhow!("session lifetime {:?} out of range", self.ttl))?;
        let claims = SessionClaims {
            sub: user.user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = user.user_id, "session signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionUser> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(SessionUser {
            user_id: data.claims.sub,
            username: data.claims.username,
            email: data.claims.email,
        })
    }

    /// Cookie that moves the client to Authenticated.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(TimeDuration::seconds(
                i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX),
            ))
            .build()
    }
}

/// Removal cookie for logout; must share the session cookie's path.
pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Extracting this is the gate: anonymous clients are sent to the sign-in page.
#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(user.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| Redirect::to(SIGNIN_PATH))?;

        let keys = SessionKeys::from_ref(state);
        match keys.verify(&token) {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!(error = %e, "invalid or expired session");
                Err(Redirect::to(SIGNIN_PATH))
            }
        }
    }
}

/// Route layer for gated pages that do not extract the user themselves.
pub async fn require_session(user: SessionUser, mut req: Request, next: Next) -> Response {
    req.extensions_mut().insert(user);
    next.run(req).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_with_ttl(ttl_minutes: i64) -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: "dev-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes,
            cookie_secure: false,
        })
    }

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 5,
            cookie_secure: false,
        })
    }

    fn alice() -> SessionUser {
        SessionUser {
            user_id: 7,
            username: "Alice".into(),
            email: "alice@example.com".into(),
        }
    }

    #[test]
    fn sign_and_verify_session() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign(&alice()).expect("sign");
        assert_eq!(keys.verify(&token).expect("verify"), alice());
    }

    #[test]
    fn verify_rejects_other_secret_or_audience() {
        let token = make_keys("one", "iss", "aud").sign(&alice()).unwrap();
        assert!(make_keys("two", "iss", "aud").verify(&token).is_err());
        assert!(make_keys("one", "iss", "other").verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_session() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let claims = SessionClaims {
            sub: 1,
            username: "Old".into(),
            email: "old@example.com".into(),
            iat: 1_000,
            exp: 2_000,
            iss: "iss".into(),
            aud: "aud".into(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn session_cookie_is_http_only_and_scoped_to_root() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let cookie = keys.session_cookie("tok".into());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(TimeDuration::minutes(5)));
    }

    #[test]
    fn oversized_lifetime_fails_to_sign_instead_of_panicking() {
        let keys = keys_with_ttl(1_000_000_000_000);
        assert!(keys.sign(&alice()).is_err());

        let keys = keys_with_ttl(i64::MAX);
        assert!(keys.sign(&alice()).is_err());
    }

    #[test]
    fn negative_lifetime_is_clamped_to_zero() {
        let keys = keys_with_ttl(-10);
        assert_eq!(keys.ttl, Duration::ZERO);
        assert!(keys.sign(&alice()).is_ok());
    }
}
