//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Liveness report for the storefront process.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    pub success: bool,
    pub status: String,

    /// ISO code every amount is priced in.
    pub currency: String,

    /// Server build version.
    pub version: String,
}

/// Healthcheck handler
///
/// Stores live in process memory, so answering at all means they are reachable.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Server is up"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        success: true,
        status: "ok".to_string(),
        currency: state.currency.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
