//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstore_app::auth::User;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    pub email: String,

    /// Display name
    pub name: String,

    /// `admin` or `customer`
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into(),
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
        }
    }
}
