//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub success: bool,
}

/// Logout Handler
///
/// Revokes the bearer token used for this request.
#[endpoint(
    tags("auth"),
    summary = "Log Out",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LogoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))?;

    state
        .app
        .auth
        .logout(token)
        .await
        .map_err(into_status_error)?;

    tracing::info!("user logged out");

    Ok(Json(LogoutResponse { success: true }))
}
