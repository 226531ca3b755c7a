//! Session and profile use-cases.
//!
//! # Responsibility
//! - Track whether a user is logged in and which auth surface to show.
//! - Mirror the user record to local storage under [`USER_STORAGE_KEY`].
//!
//! # Invariants
//! - At most one user record is active.
//! - State and storage agree after every successful call; a failed write
//!   leaves the in-memory state unchanged.
//! - `LoggedOut` is both the initial state and the terminal one.

use crate::model::user::{ProfilePatch, UserProfile};
use crate::repo::local_storage::{LocalStorage, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Local storage key holding the serialized user record.
pub const USER_STORAGE_KEY: &str = "user";

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    /// Profile operation attempted without an active session.
    NotLoggedIn,
    /// Mock authentication still needs an email to identify the user.
    MissingEmail,
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoggedIn => write!(f, "no active session"),
            Self::MissingEmail => write!(f, "email must not be blank"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "cannot encode user record: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotLoggedIn | Self::MissingEmail => None,
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(UserProfile),
}

/// Surface shown while logged out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthSurface {
    #[default]
    Login,
    /// Shown after the account was deleted.
    Signup,
}

pub struct SessionService<S: LocalStorage> {
    storage: S,
    state: SessionState,
    surface: AuthSurface,
    save_delay: Duration,
}

impl<S: LocalStorage> SessionService<S> {
    /// Creates a logged-out session. Call [`SessionService::restore`] to pick
    /// up a previously stored user.
    pub fn new(storage: S, save_delay: Duration) -> Self {
        Self {
            storage,
            state: SessionState::LoggedOut,
            surface: AuthSurface::Login,
            save_delay,
        }
    }

    /// Reloads the session from storage.
    ///
    /// A missing or unreadable record yields `LoggedOut`; the unreadable
    /// record is left in place for inspection.
    pub fn restore(&mut self) -> SessionResult<&SessionState> {
        self.state = match self.storage.get_item(USER_STORAGE_KEY)? {
            None => SessionState::LoggedOut,
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => SessionState::LoggedIn(user),
                Err(err) => {
                    warn!(
                        "event=session_restore module=session status=error error_code=corrupt_record error={}",
                        err
                    );
                    SessionState::LoggedOut
                }
            },
        };
        info!(
            "event=session_restore module=session status=ok logged_in={}",
            self.is_logged_in()
        );
        Ok(&self.state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::LoggedIn(user) => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    pub fn auth_surface(&self) -> AuthSurface {
        self.surface
    }

    pub fn save_delay(&self) -> Duration {
        self.save_delay
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mock authentication: any record with an email is accepted.
    pub fn login(&mut self, user: UserProfile) -> SessionResult<&UserProfile> {
        if user.email.trim().is_empty() {
            return Err(SessionError::MissingEmail);
        }
        self.persist(&user)?;
        self.state = SessionState::LoggedIn(user);
        self.surface = AuthSurface::Login;
        info!("event=session_login module=session status=ok");
        self.current_user().ok_or(SessionError::NotLoggedIn)
    }

    pub fn sign_up(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> SessionResult<&UserProfile> {
        self.login(UserProfile::new(name, email))
    }

    /// Ends the session and routes to the login surface.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.clear(AuthSurface::Login)?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    /// Drops the stored user and routes to the signup surface.
    pub fn delete_account(&mut self) -> SessionResult<()> {
        self.clear(AuthSurface::Signup)?;
        info!("event=account_delete module=session status=ok");
        Ok(())
    }

    /// Merges `patch` into the user after the simulated save latency.
    ///
    /// `&mut self` is held across the wait, so saves on one session are
    /// serialized and the last call wins.
    pub async fn update_profile(&mut self, patch: ProfilePatch) -> SessionResult<UserProfile> {
        if !self.is_logged_in() {
            return Err(SessionError::NotLoggedIn);
        }
        tokio::time::sleep(self.save_delay).await;
        self.apply_profile_patch(patch)
    }

    /// Merges and persists `patch` immediately.
    ///
    /// Used by callers that run the save latency on their own thread.
    pub fn apply_profile_patch(&mut self, patch: ProfilePatch) -> SessionResult<UserProfile> {
        let mut updated = self
            .current_user()
            .cloned()
            .ok_or(SessionError::NotLoggedIn)?;
        updated.merge(patch);
        self.persist(&updated)?;
        self.state = SessionState::LoggedIn(updated.clone());
        info!("event=profile_update module=session status=ok");
        Ok(updated)
    }

    fn persist(&mut self, user: &UserProfile) -> SessionResult<()> {
        let raw = serde_json::to_string(user).map_err(SessionError::Encode)?;
        self.storage.set_item(USER_STORAGE_KEY, &raw)?;
        Ok(())
    }

    fn clear(&mut self, surface: AuthSurface) -> SessionResult<()> {
        self.storage.remove_item(USER_STORAGE_KEY)?;
        self.state = SessionState::LoggedOut;
        self.surface = surface;
        Ok(())
    }
}
