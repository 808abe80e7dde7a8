//! Session registry — many isolated sessions in one process
//!
//! Each session sits behind its own lock. A spin holds that lock from
//! admission to `Idle`, so one session never runs two spins at once and
//! spins on different sessions never contend.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::engine::SlotMachine;
use crate::error::{SlotError, SlotResult};
use crate::session::{SessionState, SpinSession};
use crate::spin::SpinResult;

/// Shared handle to one session
pub type SessionHandle = Arc<Mutex<SpinSession>>;

/// Registry of player sessions keyed by session id
#[derive(Debug)]
pub struct SessionRegistry {
    machine: SlotMachine,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new(machine: SlotMachine) -> Self {
        Self {
            machine,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session seeded from the OS. An id that is already open is
    /// rejected; close it first.
    pub fn open(&self, id: impl Into<String>, balance: u64) -> SlotResult<SessionHandle> {
        let session = SpinSession::from_os_rng(self.machine.clone(), balance)?;
        self.insert(id.into(), session)
    }

    /// Open a reproducible session
    pub fn open_seeded(
        &self,
        id: impl Into<String>,
        balance: u64,
        seed: u64,
    ) -> SlotResult<SessionHandle> {
        let session = SpinSession::seeded(self.machine.clone(), balance, seed);
        self.insert(id.into(), session)
    }

    fn insert(&self, id: String, session: SpinSession) -> SlotResult<SessionHandle> {
        match self.sessions.write().entry(id) {
            Entry::Occupied(entry) => {
                log::warn!("session '{}' is already open", entry.key());
                Err(SlotError::SessionExists(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                log::info!("session '{}' opened: balance {}", entry.key(), session.balance());
                let handle = Arc::new(Mutex::new(session));
                entry.insert(Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    pub fn get(&self, id: &str) -> SlotResult<SessionHandle> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| SlotError::UnknownSession(id.to_string()))
    }

    /// Spin on one session
    pub fn spin(&self, id: &str, bet: u64) -> SlotResult<SpinResult> {
        let handle = self.get(id)?;
        let mut session = handle.lock();
        session.spin(bet)
    }

    /// Snapshot of one session's state
    pub fn state(&self, id: &str) -> SlotResult<SessionState> {
        Ok(self.get(id)?.lock().state())
    }

    /// Close a session, returning its final state
    pub fn close(&self, id: &str) -> SlotResult<SessionState> {
        let handle = self
            .sessions
            .write()
            .remove(id)
            .ok_or_else(|| SlotError::UnknownSession(id.to_string()))?;
        let state = handle.lock().state();
        log::info!("session '{id}' closed: balance {}", state.balance);
        Ok(state)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
