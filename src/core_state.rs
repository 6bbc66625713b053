//! Transport-agnostic application state.
//!
//! `CoreState` is built once at startup and shared by every request handler.
//! The reference tables are immutable; the only mutable part is the table of
//! per-client `AppState` values, guarded by an `RwLock`. The table is bounded:
//! idle sessions expire and the least recently used one is evicted at capacity.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use uuid::Uuid;

use crate::config::{MAX_SESSIONS, SESSION_IDLE_TTL};
use crate::intelligence::DefaultDecisionEngine;
use crate::reference::ClinicalReferenceData;
use crate::session::{AppState, SessionError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Internal lock poisoned")]
    LockPoisoned,

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Session(#[from] SessionError),
}

// ═══════════════════════════════════════════════════════════
// Session table
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    state: AppState,
    last_seen: Instant,
    /// Recency order; `Instant` alone can tie on coarse clocks.
    tick: u64,
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<Uuid, SessionEntry>,
    clock: u64,
}

impl SessionTable {
    fn next_tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, id: &Uuid) -> Option<&mut SessionEntry> {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(id)?;
        entry.last_seen = Instant::now();
        entry.tick = tick;
        Some(entry)
    }

    /// Drop expired sessions, then evict by recency until one slot is free.
    fn make_room(&mut self, max_sessions: usize, idle_ttl: Duration) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, e| now.duration_since(e.last_seen) < idle_ttl);

        while self.entries.len() >= max_sessions.max(1) {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.tick)
                .map(|(id, _)| *id)
            else {
                break;
            };
            self.entries.remove(&oldest);
        }

        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = self.entries.len(), "Sessions evicted");
        }
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    engine: DefaultDecisionEngine,
    sessions: RwLock<SessionTable>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl CoreState {
    pub fn new(reference: ClinicalReferenceData) -> Self {
        Self::with_engine(DefaultDecisionEngine::new(Arc::new(reference)))
    }

    pub fn with_engine(engine: DefaultDecisionEngine) -> Self {
        Self {
            engine,
            sessions: RwLock::new(SessionTable::default()),
            max_sessions: MAX_SESSIONS,
            idle_ttl: SESSION_IDLE_TTL,
        }
    }

    /// Override the session capacity and idle timeout.
    pub fn with_session_limits(mut self, max_sessions: usize, idle_ttl: Duration) -> Self {
        self.max_sessions = max_sessions;
        self.idle_ttl = idle_ttl;
        self
    }

    pub fn engine(&self) -> &DefaultDecisionEngine {
        &self.engine
    }

    pub fn reference(&self) -> &ClinicalReferenceData {
        self.engine.reference()
    }

    // ── Sessions ────────────────────────────────────────────

    /// Start a new session on the welcome page.
    pub fn create_session(&self) -> Result<(Uuid, AppState), CoreError> {
        let id = Uuid::new_v4();
        let state = AppState::default();

        let mut sessions = self.sessions.write().map_err(|_| CoreError::LockPoisoned)?;
        sessions.make_room(self.max_sessions, self.idle_ttl);
        let tick = sessions.next_tick();
        sessions.entries.insert(
            id,
            SessionEntry {
                state,
                last_seen: Instant::now(),
                tick,
            },
        );

        tracing::debug!(session = %id, "Session created");
        Ok((id, state))
    }

    /// Current state of a session (copied out). Counts as activity.
    pub fn session(&self, id: &Uuid) -> Result<AppState, CoreError> {
        self.sessions
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .touch(id)
            .map(|entry| entry.state)
            .ok_or(CoreError::SessionNotFound(*id))
    }

    /// Apply one transition to a session and store the result.
    /// On error the stored state is left unchanged.
    pub fn transition<F>(&self, id: &Uuid, f: F) -> Result<AppState, CoreError>
    where
        F: FnOnce(AppState) -> Result<AppState, SessionError>,
    {
        let mut sessions = self.sessions.write().map_err(|_| CoreError::LockPoisoned)?;
        let entry = sessions
            .touch(id)
            .ok_or(CoreError::SessionNotFound(*id))?;
        let next = f(entry.state)?;
        entry.state = next;
        tracing::debug!(session = %id, page = %next.page, role = %next.role, "Session transition");
        Ok(next)
    }

    /// Forget a session.
    pub fn end_session(&self, id: &Uuid) -> Result<(), CoreError> {
        self.sessions
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .entries
            .remove(id)
            .map(|_| tracing::debug!(session = %id, "Session ended"))
            .ok_or(CoreError::SessionNotFound(*id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.entries.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Page, Role};

    fn core() -> CoreState {
        CoreState::new(ClinicalReferenceData::load_test())
    }

    #[test]
    fn new_session_on_welcome() {
        let core = core();
        let (id, state) = core.create_session().unwrap();
        assert_eq!(state, AppState::default());
        assert_eq!(core.session(&id).unwrap(), state);
        assert_eq!(core.session_count(), 1);
    }

    #[test]
    fn transition_persists() {
        let core = core();
        let (id, _) = core.create_session().unwrap();
        core.transition(&id, |s| s.select_role(Role::Doctor)).unwrap();
        let state = core.transition(&id, AppState::enter).unwrap();
        assert_eq!(state.page, Page::Main);
        assert_eq!(core.session(&id).unwrap().page, Page::Main);
    }

    #[test]
    fn failed_transition_leaves_state() {
        let core = core();
        let (id, _) = core.create_session().unwrap();
        let err = core.transition(&id, AppState::enter).unwrap_err();
        assert!(matches!(err, CoreError::Session(SessionError::RoleNotSelected)));
        assert_eq!(core.session(&id).unwrap(), AppState::default());
    }

    #[test]
    fn unknown_session() {
        let core = core();
        let id = Uuid::new_v4();
        assert!(matches!(
            core.session(&id),
            Err(CoreError::SessionNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn end_session_removes_it() {
        let core = core();
        let (first, _) = core.create_session().unwrap();
        let (second, _) = core.create_session().unwrap();
        assert_eq!(core.session_count(), 2);

        core.end_session(&first).unwrap();
        assert_eq!(core.session_count(), 1);
        assert!(matches!(core.session(&first), Err(CoreError::SessionNotFound(_))));
        assert!(core.session(&second).is_ok());

        assert!(matches!(
            core.end_session(&first),
            Err(CoreError::SessionNotFound(_))
        ));
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let core = core().with_session_limits(2, Duration::from_secs(3600));
        let (first, _) = core.create_session().unwrap();
        let (second, _) = core.create_session().unwrap();

        // Touch the first so the second becomes the oldest.
        core.session(&first).unwrap();
        let (third, _) = core.create_session().unwrap();

        assert_eq!(core.session_count(), 2);
        assert!(core.session(&first).is_ok());
        assert!(matches!(core.session(&second), Err(CoreError::SessionNotFound(_))));
        assert!(core.session(&third).is_ok());
    }

    #[test]
    fn table_stays_bounded_under_many_creates() {
        let core = core().with_session_limits(8, Duration::from_secs(3600));
        for _ in 0..100 {
            core.create_session().unwrap();
        }
        assert_eq!(core.session_count(), 8);
    }

    #[test]
    fn idle_sessions_expire_on_create() {
        let core = core().with_session_limits(16, Duration::ZERO);
        let (stale, _) = core.create_session().unwrap();
        let (fresh, _) = core.create_session().unwrap();

        assert_eq!(core.session_count(), 1);
        assert!(matches!(core.session(&stale), Err(CoreError::SessionNotFound(_))));
        assert!(core.session(&fresh).is_ok());
    }
}
