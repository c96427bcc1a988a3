//! Seam to the external authentication service.

use async_trait::async_trait;
use thiserror::Error;

/// Proof of an authenticated identity, as handed out by the auth service.
///
/// Routing only cares whether one exists; the payload is carried through
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    raw: serde_json::Value,
}

impl Session {
    pub fn new(raw: serde_json::Value) -> Self {
        Self { raw }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session store could not be reached
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// A stored session exists but could not be read
    #[error("malformed session: {0}")]
    Malformed(String),
}

/// Answers "is somebody signed in right now?".
///
/// Futures are not `Send`: providers run on the browser event loop.
#[async_trait(?Send)]
pub trait SessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionError>;
}

#[async_trait(?Send)]
impl<P: SessionProvider + ?Sized> SessionProvider for std::rc::Rc<P> {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        (**self).current_session().await
    }
}
