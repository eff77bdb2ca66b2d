//! Response envelope
//!
//! Success bodies carry `"success": true` next to their payload. Every error response, whether
//! raised by a handler or by salvo itself, is rewritten here into
//! `{ "success": false, "error": "<message>" }` with its status code kept.

use salvo::{
    catcher::Catcher,
    http::ResBody,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Failure envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// What went wrong
    pub error: String,
}

impl ErrorResponse {
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[handler]
async fn render_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match std::mem::replace(&mut res.body, ResBody::None) {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief,
        _ => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_owned(),
    };

    res.status_code(status);
    res.render(Json(ErrorResponse::new(message)));

    ctrl.skip_rest();
}

/// Catcher that renders every error as an [`ErrorResponse`].
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(render_error)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn conflict() -> Result<&'static str, StatusError> {
        Err(StatusError::conflict().brief("Product already exists"))
    }

    #[handler]
    #[expect(clippy::panic, reason = "exercises panic recovery")]
    async fn boom() -> &'static str {
        panic!("boom")
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(CatchPanic::new())
                .push(Router::with_path("conflict").get(conflict))
                .push(Router::with_path("boom").get(boom)),
        )
        .catcher(catcher())
    }

    #[tokio::test]
    async fn handler_errors_use_their_brief() -> TestResult {
        let mut res = TestClient::get("http://example.com/conflict")
            .send(&make_service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(!body.success);
        assert_eq!(body.error, "Product already exists");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_are_enveloped() -> TestResult {
        let mut res = TestClient::get("http://example.com/nowhere")
            .send(&make_service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.success);
        assert!(!body.error.is_empty(), "expected an error message");

        Ok(())
    }

    #[tokio::test]
    async fn panics_are_enveloped() -> TestResult {
        let mut res = TestClient::get("http://example.com/boom")
            .send(&make_service())
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!body.success);

        Ok(())
    }
}
