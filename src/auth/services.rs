use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::auth::{
    dto::RegisterRequest,
    password::{hash_password, verify_decoy, verify_password},
    repo_types::{User, UserId},
};
use crate::error::AppError;

pub const MIN_USERNAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    email.contains('@')
}

/// Trim and normalize a registration payload, rejecting it when a field is
/// too short or the email is malformed.
pub fn validate_registration(payload: RegisterRequest) -> Result<RegisterRequest, AppError> {
    let username = payload.username.trim().to_string();
    let email = normalize_email(&payload.email);

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AppError::validation("Username must be at least 2 characters"));
    }
    if !is_valid_email(&email) {
        return Err(AppError::validation("Please enter a valid email address"));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("Password must be at least 6 characters"));
    }

    Ok(RegisterRequest {
        username,
        email,
        password: payload.password,
    })
}

/// Register a user. A taken email (in any letter case) is `DuplicateEmail`.
pub async fn create_user(
    db: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserId, AppError> {
    let email = normalize_email(email);
    let hash = hash_password(password)?;

    match User::create(db, username, &email, &hash).await {
        Ok(user_id) => {
            info!(user_id, email = %email, "user registered");
            Ok(user_id)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(email = %email, "email already registered");
            Err(AppError::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// `Some(user)` only when both email and password match. An unknown email and
/// a wrong password are indistinguishable to the caller, in result and in cost.
pub async fn verify_credentials(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let email = normalize_email(email);
    let Some(user) = User::find_by_email(db, &email).await? else {
        verify_decoy(password);
        debug!(email = %email, "login unknown email");
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        debug!(user_id = user.user_id, "login invalid password");
        Ok(None)
    }
}

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    Ok(User::find_by_email(db, &normalize_email(email)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use tempfile::TempDir;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn validation_normalizes_fields() {
        let ok = validate_registration(register("  Sam ", " Sam@Example.COM ", "secret1")).unwrap();
        assert_eq!(ok.username, "Sam");
        assert_eq!(ok.email, "sam@example.com");
    }

    #[test]
    fn validation_rejects_short_or_malformed_fields() {
        let cases = [
            (register("a", "a@b.c", "secret1"), "Username must be at least 2 characters"),
            (register("ab", "no-at-sign", "secret1"), "Please enter a valid email address"),
            (register("ab", "a@b.c", "12345"), "Password must be at least 6 characters"),
        ];
        for (req, want) in cases {
            match validate_registration(req) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, want),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn create_then_find_returns_lowercased_email() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;

        let id = create_user(&db, "Alice", "Alice@Example.com", "password1")
            .await
            .unwrap();
        let user = find_user_by_email(&db, "alice@example.com")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(user.user_id, id);
        assert_eq!(user.username, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "password1");
    }

    #[tokio::test]
    async fn duplicate_email_in_any_case_is_rejected_without_writes() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;

        create_user(&db, "Alice", "alice@example.com", "password1")
            .await
            .unwrap();
        let err = create_user(&db, "Mallory", "ALICE@example.com", "password2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(n, 1);
        let user = find_user_by_email(&db, "alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "Alice");
    }

    #[tokio::test]
    async fn verify_credentials_matches_only_exact_pairs() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;
        let id = create_user(&db, "Bob", "bob@example.com", "hunter22")
            .await
            .unwrap();

        let user = verify_credentials(&db, " BOB@example.com", "hunter22")
            .await
            .unwrap()
            .expect("valid credentials");
        assert_eq!(user.user_id, id);

        assert!(verify_credentials(&db, "bob@example.com", "hunter23")
            .await
            .unwrap()
            .is_none());
        assert!(verify_credentials(&db, "nobody@example.com", "hunter22")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_unknown_email_is_none() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;
        assert!(find_user_by_email(&db, "ghost@example.com")
            .await
            .unwrap()
            .is_none());
    }
}
