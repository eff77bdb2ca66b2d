//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthServiceError {
    #[error("email and password are required")]
    MissingCredentials,

    /// Returned alike for an unknown email and a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session not found")]
    NotFound,
}
