//! Products

mod errors;
mod handlers;
mod requests;

pub(crate) use handlers::*;
