//! Actor records and the registry they live in.
//!
//! The registry is the single source of truth for every actor's lifecycle:
//! its role, private state slot, mailbox, and the `alive`/`busy` flags the
//! dispatcher uses for per-actor mutual exclusion. One process-wide mutex
//! (owned by the system, see [`super::actor_system`]) guards all of it; the
//! types here carry no locking of their own.

// Layer 1: Standard library imports
use std::any::Any;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Condvar;

// Layer 3: Internal module imports
use crate::actor::role::Role;
use crate::mailbox::Mailbox;
use crate::util::ids::ActorId;

/// Everything the registry knows about one actor.
///
/// Records are append-only: index `i` of the registry vector always holds
/// the record whose id is `i`, and records persist until the system is torn
/// down.
pub(crate) struct ActorRecord {
    pub(crate) id: ActorId,
    pub(crate) role: Arc<Role>,
    /// Opaque state owned by the actor, mutated only by its own handlers.
    pub(crate) state: Option<Box<dyn Any + Send>>,
    pub(crate) mailbox: Mailbox,
    /// Cleared once the actor processes a `GoDie`.
    pub(crate) alive: bool,
    /// Set while exactly one worker is processing a message of this actor.
    pub(crate) busy: bool,
    /// Signalled (with the registry mutex) when `busy` clears.
    pub(crate) released: Arc<Condvar>,
}

impl ActorRecord {
    pub(crate) fn new(id: ActorId, role: Arc<Role>, queue_limit: usize) -> Self {
        Self {
            id,
            role,
            state: None,
            mailbox: Mailbox::new(queue_limit),
            alive: true,
            busy: false,
            released: Arc::new(Condvar::new()),
        }
    }

    /// An actor counts as active while it is alive or still has queued
    /// messages to drain.
    pub(crate) fn is_active(&self) -> bool {
        self.alive || !self.mailbox.is_empty()
    }
}

/// Mutex-guarded interior of the actor system.
pub(crate) struct RegistryState {
    pub(crate) actors: Vec<ActorRecord>,
    /// Count of actors for which [`ActorRecord::is_active`] holds.
    pub(crate) active: usize,
    /// Monotone count of actors ever created.
    pub(crate) total_spawned: u64,
}

impl RegistryState {
    pub(crate) fn new() -> Self {
        Self {
            actors: Vec::new(),
            active: 0,
            total_spawned: 0,
        }
    }

    pub(crate) fn record(&self, id: ActorId) -> Option<&ActorRecord> {
        let index = usize::try_from(id.as_u64()).ok()?;
        self.actors.get(index)
    }

    pub(crate) fn record_mut(&mut self, id: ActorId) -> Option<&mut ActorRecord> {
        let index = usize::try_from(id.as_u64()).ok()?;
        self.actors.get_mut(index)
    }
}
