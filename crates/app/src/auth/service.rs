//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{
    ACCOUNTS, AuthServiceError, Credentials, IssuedSession, ParsedSessionToken, Session,
    SessionTokenVersion, User, UserUuid, format_session_token, generate_session_secret,
    parse_session_token,
};

/// How long an issued session stays valid.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Live sessions kept per user. Logging in past this revokes the oldest.
pub const MAX_SESSIONS_PER_USER: usize = 8;

#[derive(Debug, Clone)]
pub struct InMemoryAuthService {
    sessions: Arc<RwLock<FxHashMap<Uuid, Session>>>,
    session_ttl: SignedDuration,
}

impl Default for InMemoryAuthService {
    fn default() -> Self {
        Self::with_session_ttl(SESSION_TTL)
    }
}

impl InMemoryAuthService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session_ttl(session_ttl: SignedDuration) -> Self {
        Self {
            sessions: Arc::default(),
            session_ttl,
        }
    }

    /// Look up one of the demo accounts by id.
    #[must_use]
    pub fn find_user(user: UserUuid) -> Option<User> {
        ACCOUNTS
            .iter()
            .find(|account| account.uuid == user.into_uuid())
            .map(|account| account.user())
    }

    fn check_credentials(credentials: &Credentials) -> Result<User, AuthServiceError> {
        let email = credentials.email.trim();

        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        ACCOUNTS
            .iter()
            .find(|account| {
                account.email.eq_ignore_ascii_case(email) && account.password == credentials.password
            })
            .map(|account| account.user())
            .ok_or(AuthServiceError::InvalidCredentials)
    }

    fn parse(bearer_token: &str) -> Result<ParsedSessionToken, AuthServiceError> {
        parse_session_token(bearer_token).map_err(|_invalid| AuthServiceError::NotFound)
    }

    fn is_live(&self, session: &Session, now: Timestamp) -> bool {
        now.duration_since(session.created_at) < self.session_ttl
    }

    /// The live session matching both the token id and secret.
    fn verify<'s>(
        &self,
        sessions: &'s FxHashMap<Uuid, Session>,
        parsed: &ParsedSessionToken,
    ) -> Option<&'s Session> {
        let presented = blake3::hash(parsed.secret.as_bytes());

        sessions
            .get(&parsed.token_uuid)
            .filter(|session| session.secret_hash == presented)
            .filter(|session| self.is_live(session, Timestamp::now()))
    }

    /// Drop expired sessions and make room for one more session for `user`.
    fn prune(&self, sessions: &mut FxHashMap<Uuid, Session>, user: UserUuid, now: Timestamp) {
        sessions.retain(|_, session| self.is_live(session, now));

        let mut held: Vec<(Timestamp, Uuid)> = sessions
            .iter()
            .filter(|(_, session)| session.user == user)
            .map(|(token_uuid, session)| (session.created_at, *token_uuid))
            .collect();

        if held.len() < MAX_SESSIONS_PER_USER {
            return;
        }

        held.sort_unstable();

        let excess = held.len() + 1 - MAX_SESSIONS_PER_USER;

        for (_, token_uuid) in held.into_iter().take(excess) {
            sessions.remove(&token_uuid);

            debug!(user_uuid = %user, %token_uuid, "oldest session revoked");
        }
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    #[tracing::instrument(name = "auth.login", skip(self, credentials), err)]
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let user = Self::check_credentials(&credentials)?;

        let token_uuid = Uuid::now_v7();
        let secret = generate_session_secret();
        let token = format_session_token(token_uuid, SessionTokenVersion::V1, &secret);
        let created_at = Timestamp::now();

        let mut sessions = self.sessions.write().await;

        self.prune(&mut sessions, user.uuid, created_at);

        sessions.insert(
            token_uuid,
            Session {
                user: user.uuid,
                secret_hash: blake3::hash(secret.as_bytes()),
                created_at,
            },
        );

        drop(sessions);

        info!(user_uuid = %user.uuid, role = %user.role, "session issued");

        Ok(IssuedSession {
            token,
            user,
            created_at,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError> {
        let parsed = Self::parse(bearer_token)?;

        let sessions = self.sessions.read().await;

        let session = self
            .verify(&sessions, &parsed)
            .ok_or(AuthServiceError::NotFound)?;

        Self::find_user(session.user).ok_or(AuthServiceError::NotFound)
    }

    #[tracing::instrument(name = "auth.logout", skip(self, bearer_token), err)]
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let parsed = Self::parse(bearer_token)?;

        let mut sessions = self.sessions.write().await;

        if self.verify(&sessions, &parsed).is_none() {
            return Err(AuthServiceError::NotFound);
        }

        if let Some(session) = sessions.remove(&parsed.token_uuid) {
            info!(
                user_uuid = %session.user,
                issued_at = %session.created_at,
                "session revoked"
            );
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials against the demo accounts and issue a session.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve the user behind a bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError>;

    /// Revoke the session behind a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}
