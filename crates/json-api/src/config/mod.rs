//! Server configuration module

use clap::Parser;

pub(crate) use crate::config::observability::LogFormat;
use crate::config::{
    catalog::CatalogConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    pricing::PricingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod catalog;
pub(crate) mod observability;
pub(crate) mod pricing;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "gemstore-json", about = "Precious Gems & Stones JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Currency, tax and shipping settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
