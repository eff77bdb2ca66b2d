//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use gemstore_app::auth::User;

const CURRENT_USER_DEPOT_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_current_user(&mut self, user: User);

    /// The signed-in user, or 401.
    fn current_user_or_401(&self) -> Result<User, StatusError>;

    /// The signed-in user if they are an admin; 401 when signed out, 403 otherwise.
    fn admin_or_403(&self) -> Result<User, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: User) {
        self.insert(CURRENT_USER_DEPOT_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<User, StatusError> {
        self.get::<User>(CURRENT_USER_DEPOT_KEY)
            .cloned()
            .map_err(|_missing| StatusError::unauthorized().brief("Authentication required"))
    }

    fn admin_or_403(&self) -> Result<User, StatusError> {
        let user = self.current_user_or_401()?;

        if !user.is_admin() {
            return Err(StatusError::forbidden().brief("Admin access required"));
        }

        Ok(user)
    }
}
