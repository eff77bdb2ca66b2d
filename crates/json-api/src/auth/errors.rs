//! Auth Errors

use salvo::http::StatusError;

use gemstore_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::MissingCredentials => {
            StatusError::bad_request().brief("Email and password are required")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
    }
}
