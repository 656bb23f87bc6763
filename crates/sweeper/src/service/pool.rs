//! Session factory and pool for stateful transports.
//!
//! The traversal holds one session for its whole duration, so every other
//! remote call (sibling listings, removals, the log upload) goes through a
//! pooled session instead. Borrows are scoped to a single call and never
//! overlap an in-flight traversal request.

use crate::error::Result;
use crate::service::DirectoryService;

/// Opens fresh, independent directory sessions.
pub trait SessionFactory {
    type Session: DirectoryService;

    fn connect(&self) -> Result<Self::Session>;
}

/// Reuses idle sessions across scoped borrows.
pub struct SessionPool<F: SessionFactory> {
    factory: F,
    idle: Vec<F::Session>,
}

impl<F: SessionFactory> SessionPool<F> {
    pub fn new(factory: F) -> Self {
        SessionPool {
            factory,
            idle: Vec::new(),
        }
    }

    /// Opens a dedicated session outside the pool. The caller owns it; it is
    /// never handed out by [`SessionPool::with`].
    pub fn connect(&self) -> Result<F::Session> {
        self.factory.connect()
    }

    /// Runs `f` with a pooled session. The session is returned to the pool on
    /// success and discarded on error, since a failed remote call leaves it in
    /// an unknown state.
    pub fn with<R, G>(&mut self, f: G) -> Result<R>
    where
        G: FnOnce(&mut F::Session) -> Result<R>,
    {
        let mut session = match self.idle.pop() {
            Some(session) => session,
            None => self.factory.connect()?,
        };

        match f(&mut session) {
            Ok(value) => {
                self.idle.push(session);
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    /// Number of idle sessions currently held.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }
}
