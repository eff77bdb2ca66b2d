//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// What a user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Manages the catalog and every order.
    Admin,

    /// Shops with their own cart and orders.
    Customer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Email and password submitted at login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Session issuance result with the one-time raw bearer token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
    pub created_at: Timestamp,
}

/// A live session, keyed by the token id in the session store.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub user: UserUuid,
    /// BLAKE3 digest of the token secret; `Hash` equality is constant-time.
    pub secret_hash: blake3::Hash,
    pub created_at: Timestamp,
}

pub(crate) struct Account {
    pub uuid: Uuid,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
}

impl Account {
    pub(crate) fn user(&self) -> User {
        User {
            uuid: UserUuid::from_uuid(self.uuid),
            email: self.email.to_owned(),
            name: self.name.to_owned(),
            role: self.role,
        }
    }
}

const ADMIN_UUID: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001);
const CUSTOMER_UUID: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0002);

/// The two demo accounts.
pub(crate) const ACCOUNTS: [Account; 2] = [
    Account {
        uuid: ADMIN_UUID,
        email: "admin@preciousgems.com",
        password: "admin123",
        name: "Store Admin",
        role: Role::Admin,
    },
    Account {
        uuid: CUSTOMER_UUID,
        email: "customer@preciousgems.com",
        password: "customer123",
        name: "Demo Customer",
        role: Role::Customer,
    },
];

/// The fixed id of the demo admin account.
pub const ADMIN_USER_UUID: UserUuid = UserUuid::from_uuid(ADMIN_UUID);

/// The fixed id of the demo customer account.
pub const CUSTOMER_USER_UUID: UserUuid = UserUuid::from_uuid(CUSTOMER_UUID);
