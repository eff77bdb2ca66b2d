//! State

use std::sync::Arc;

use gemstore_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// ISO code reported next to every amount.
    pub(crate) currency: &'static str,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, currency: &'static str) -> Self {
        Self { app, currency }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, currency: &'static str) -> Arc<Self> {
        Arc::new(Self::new(app, currency))
    }
}
