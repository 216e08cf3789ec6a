//! Process-wide session ownership.
//!
//! [`SessionStore`] is the single owner of the current [`Session`]. It is held
//! by the composition root and handed only to the components allowed to write
//! it (session refresh and the sign-in/sign-out flows). Everything else gets a
//! [`SessionReader`].

use tokio::sync::watch;

use super::model::Session;

/// Owner of the current session. Updates replace the whole value.
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<Session>,
}

impl SessionStore {
    pub fn new(initial: Session) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a read-only handle observing this store.
    pub fn reader(&self) -> SessionReader {
        SessionReader {
            receiver: self.sender.subscribe(),
        }
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Atomically replaces the session, returning the previous value.
    pub fn replace(&self, session: Session) -> Session {
        tracing::debug!(
            "[SessionStore] replace: authenticated={}",
            session.is_authenticated()
        );
        self.sender.send_replace(session)
    }

    /// Tears the session down (logout semantics).
    pub fn clear(&self) {
        self.replace(Session::signed_out());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Session::signed_out())
    }
}

/// Read-only view of the [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionReader {
    receiver: watch::Receiver<Session>,
}

impl SessionReader {
    /// Returns a copy of the session as it is right now.
    pub fn snapshot(&self) -> Session {
        self.receiver.borrow().clone()
    }
}
