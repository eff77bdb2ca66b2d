//! Catalog Config

use clap::{ArgAction, Args};

/// Product catalog settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Load the demo gemstone catalog at start-up.
    #[arg(
        long,
        env = "SEED_CATALOG",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub seed_catalog: bool,
}
