//! User accounts and credential lookup

use musicapp_core::{
    error::Result,
    types::{CreateUser, UserId},
    MusicError,
};
use sqlx::{PgPool, Row};

/// Register a user. A taken username yields `MusicError::Duplicate`.
pub async fn create(pool: &PgPool, user: CreateUser) -> Result<UserId> {
    let id = UserId::generate();

    let inserted = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (id, username, password, fullname) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.fullname)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or_else(|| MusicError::invariant("Failed to add user"))
}

/// Look up the id and password hash for `username`
///
/// # Returns
///
/// `None` if no such user exists
pub async fn get_credentials(pool: &PgPool, username: &str) -> Result<Option<(UserId, String)>> {
    let row = sqlx::query("SELECT id, password FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| (row.get("id"), row.get("password"))))
}

/// Check whether a user exists
pub async fn exists(pool: &PgPool, id: &UserId) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}
