use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// Login prompt is showing; chatting is disabled.
    Unauthenticated,
    /// Client-only pseudo-session, no server credential.
    Guest { id: String },
    Authenticated(User),
}

impl Identity {
    pub fn guest() -> Self {
        Identity::Guest { id: Uuid::new_v4().to_string() }
    }

    pub fn is_signed_in(&self) -> bool {
        !matches!(self, Identity::Unauthenticated)
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::Authenticated(user) => Some(&user.email),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("identity provider error: {0}")]
pub struct IdentityError(pub String);

/// External sign-in service. Only the resulting user is ever read.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>, IdentityError>;
    async fn sign_out(&self) -> Result<(), IdentityError>;
}

/// In-process provider holding at most one signed-in user.
#[derive(Debug, Default)]
pub struct LocalIdentityProvider {
    user: Mutex<Option<User>>,
}

impl LocalIdentityProvider {
    pub fn new(user: Option<User>) -> Self {
        Self { user: Mutex::new(user) }
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self::new(Some(User {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
        }))
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_user(&self) -> Result<Option<User>, IdentityError> {
        let guard = self.user.lock().map_err(|e| IdentityError(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let mut guard = self.user.lock().map_err(|e| IdentityError(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
