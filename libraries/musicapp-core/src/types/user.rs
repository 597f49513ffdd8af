//! User domain types

/// Data for registering a user; `password_hash` is already hashed
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
}
