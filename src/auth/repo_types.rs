use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;

pub type UserId = i64;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: String, // always stored lowercased
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, not exposed in JSON
    #[serde(skip_serializing)]
    pub created_at: PrimitiveDateTime,
}
