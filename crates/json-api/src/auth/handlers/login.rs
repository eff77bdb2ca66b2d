//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use gemstore_app::auth::Credentials;

use crate::{
    auth::{UserResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub success: bool,

    /// Bearer token for the `Authorization` header
    pub token: String,

    pub user: UserResponse,
}

/// Login Handler
///
/// Exchanges demo credentials for a session token.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing email or password"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
    ),
)]
#[tracing::instrument(name = "auth.login", skip(json, depot), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(session.user.uuid));
    tracing::info!(role = %session.user.role, "user logged in");

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        user: session.user.into(),
    }))
}
