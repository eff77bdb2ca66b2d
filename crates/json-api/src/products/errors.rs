//! Product Errors

use salvo::http::StatusError;

use gemstore_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Missing required field: {field}"))
        }
        ProductsServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
    }
}
