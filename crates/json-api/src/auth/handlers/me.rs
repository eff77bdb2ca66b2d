//! Current User Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::UserResponse, extensions::*};

/// Current User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MeResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Current User Handler
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, StatusError> {
    let user = depot.current_user_or_401()?;

    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}
