//! Products service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),

    #[error("invalid data: {0}")]
    InvalidData(&'static str),
}
