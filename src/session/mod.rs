use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

use crate::quiz::{AuthoringSession, QuizId, TakingSession};


/// The single in-flight activity of one user.
#[derive(Debug)]
pub enum ActiveSession {
    Authoring(AuthoringSession),
    Taking(TakingSession),
    /// The run of this quiz just ended. Late answers to it are dropped.
    Finished(QuizId),
}

pub type SessionHandle = Arc<Mutex<ActiveSession>>;

/// Where per-user sessions live between chat events.
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: u64) -> Option<SessionHandle>;

    /// Replaces whatever the user had open.
    fn insert(&self, user_id: u64, session: ActiveSession) -> SessionHandle;

    /// Removes the user's session unless it was replaced by a newer one.
    fn remove_if(&self, user_id: u64, session: &SessionHandle) -> bool;
}

#[derive(Default)]
pub struct InMemorySessions {
    sessions: RwLock<HashMap<u64, SessionHandle>>,
}

impl SessionStore for InMemorySessions {
    fn get(&self, user_id: u64) -> Option<SessionHandle> {
        self.sessions.read().get(&user_id).cloned()
    }

    fn insert(&self, user_id: u64, session: ActiveSession) -> SessionHandle {
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().insert(user_id, Arc::clone(&handle));
        handle
    }

    fn remove_if(&self, user_id: u64, session: &SessionHandle) -> bool {
        let mut sessions = self.sessions.write();
        let is_current = sessions
            .get(&user_id)
            .map_or(false, |current| Arc::ptr_eq(current, session));
        if is_current {
            sessions.remove(&user_id);
        }
        is_current
    }
}
