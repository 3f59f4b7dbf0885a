use std::sync::OnceLock;

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::AppError;

/// Digest checked when the email is unknown, so that branch costs the same
/// Argon2 work as a wrong password.
static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Salted Argon2id digest in PHC string form.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// `Ok(false)` on a wrong password. Errors only when `stored` is not a
/// readable digest.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored password hash unreadable: {e}")))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(anyhow::anyhow!("verify password: {e}"))),
    }
}

/// Run a verification that always fails, for logins with an unknown email.
pub fn verify_decoy(plain: &str) {
    let decoy = DECOY_HASH.get_or_init(|| hash_password("moodtunes-decoy").ok());
    if let Some(decoy) = decoy {
        let _ = verify_password(plain, decoy);
    }
}
