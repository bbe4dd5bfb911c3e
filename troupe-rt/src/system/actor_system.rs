//! The actor system: registry, dispatcher, and public surface.

// Layer 1: Standard library
use std::fmt;
use std::sync::{Arc, Weak};

// Layer 2: Third-party
use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, trace};

// Layer 3: Internal
use super::config::SystemConfig;
use super::errors::{SendError, SystemError};
use super::registry::{ActorRecord, RegistryState};
use crate::actor::context::ActorContext;
use crate::actor::role::Role;
use crate::fatal;
use crate::mailbox::MailboxError;
use crate::message::Message;
use crate::pool::{Task, WorkerPool};
use crate::util::ids::ActorId;

/// Handle to one actor system.
///
/// The handle is cheap to clone and may be shared across threads; all
/// clones refer to the same registry and worker pool. A system is created
/// with its first actor already greeted, runs until every actor has retired
/// and drained its mailbox, and is torn down by [`join`](ActorSystem::join).
///
/// # Concurrency contract
///
/// - Messages sent to one actor are processed strictly in the order their
///   successful `send` calls were observed by the registry.
/// - At most one handler of any single actor runs at a time; handlers of
///   distinct actors run in parallel up to the pool size.
/// - Handlers run without any runtime lock held and may call
///   [`send`](ActorContext::send) freely, including to their own actor.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use troupe_rt::actor::Role;
/// use troupe_rt::message::Message;
/// use troupe_rt::system::{ActorSystem, SystemConfig};
///
/// let role = Arc::new(
///     Role::builder()
///         .on_hello(|ctx, _creator| {
///             // First message of every actor.
///             let _ = ctx.id();
///         })
///         .build(),
/// );
///
/// let (system, first) = ActorSystem::create(SystemConfig::default(), role).unwrap();
/// system.send(first, Message::godie()).unwrap();
/// system.join(first);
/// ```
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<SystemShared>,
}

/// Shared interior of a system; the dispatcher lives here.
pub(crate) struct SystemShared {
    config: SystemConfig,
    registry: Mutex<RegistryState>,
    /// Signalled (with the registry mutex) when `active` reaches zero.
    all_idle: Condvar,
    pool: Mutex<Option<WorkerPool>>,
    /// Used by dispatch tasks so a task outliving the system is a no-op.
    self_weak: Weak<SystemShared>,
}

impl ActorSystem {
    /// Create a system running `role` as its first actor.
    ///
    /// Starts the worker pool, registers actor `0`, and delivers the
    /// automatic `Hello` greeting (with no creator). The returned id is the
    /// first actor's address.
    ///
    /// # Errors
    ///
    /// [`SystemError::Config`] when the configuration fails validation and
    /// [`SystemError::CastLimitTooSmall`] when the cast limit would not
    /// admit even the first actor.
    pub fn create(config: SystemConfig, role: Arc<Role>) -> Result<(Self, ActorId), SystemError> {
        config.validate().map_err(SystemError::Config)?;
        if config.cast_limit < 1 {
            return Err(SystemError::CastLimitTooSmall {
                cast_limit: config.cast_limit,
            });
        }

        let pool = WorkerPool::new(config.pool_size);
        let inner = Arc::new_cyclic(|self_weak| SystemShared {
            config,
            registry: Mutex::new(RegistryState::new()),
            all_idle: Condvar::new(),
            pool: Mutex::new(Some(pool)),
            self_weak: Weak::clone(self_weak),
        });

        let first = inner.spawn_actor(role);
        if let Err(err) = inner.send(first, Message::Hello(None)) {
            fatal!("greeting the first actor failed: {err}");
        }

        info!(
            pool_size = inner.config.pool_size,
            queue_limit = inner.config.queue_limit,
            cast_limit = inner.config.cast_limit,
            "actor system created"
        );
        Ok((Self { inner }, first))
    }

    /// Send a message to the actor at `target`.
    ///
    /// On success the message is queued on the target's mailbox and exactly
    /// one dispatch task is posted to the worker pool; per-target FIFO
    /// order follows the order in which successful sends returned.
    ///
    /// # Errors
    ///
    /// - [`SendError::UnknownActor`]: `target` names no actor here.
    /// - [`SendError::DeadActor`]: the target already processed a `GoDie`.
    /// - [`SendError::QueueFull`]: the target's mailbox is at capacity; the
    ///   caller decides whether to retry, drop, or fail.
    /// - [`SendError::InvalidKind`]: a user kind outside the target role's
    ///   handler table.
    pub fn send(&self, target: ActorId, message: Message) -> Result<(), SendError> {
        self.inner.send(target, message)
    }

    /// Block until no actor is active, then tear the system down.
    ///
    /// An actor is active while it is alive or still has queued messages;
    /// once the count reaches zero it can never rise again, so the wait is
    /// race-free. Teardown shuts the worker pool down (draining accepted
    /// tasks) and discards every actor record; subsequent sends report
    /// [`SendError::UnknownActor`].
    ///
    /// Ids numerically beyond the number of actors ever created are
    /// tolerated: such a `join` returns immediately and leaves the system
    /// untouched. Concurrent `join` calls are not supported; call it from
    /// one thread.
    pub fn join(&self, id: ActorId) {
        self.inner.join(id);
    }

    /// The configuration the system was created with.
    pub fn config(&self) -> &SystemConfig {
        &self.inner.config
    }

    /// Number of actors that are alive or still draining their mailbox.
    pub fn active_count(&self) -> usize {
        self.inner.registry.lock().active
    }

    /// Number of actors ever created in this system.
    pub fn total_spawned(&self) -> u64 {
        self.inner.registry.lock().total_spawned
    }

    /// Queued message count of one actor, `None` for unknown ids.
    pub fn queued_len(&self, id: ActorId) -> Option<usize> {
        let registry = self.inner.registry.lock();
        registry.record(id).map(|record| record.mailbox.len())
    }

    /// Whether one actor still accepts messages, `None` for unknown ids.
    pub fn is_alive(&self, id: ActorId) -> Option<bool> {
        let registry = self.inner.registry.lock();
        registry.record(id).map(|record| record.alive)
    }
}

impl fmt::Debug for ActorSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.lock();
        f.debug_struct("ActorSystem")
            .field("total_spawned", &registry.total_spawned)
            .field("active", &registry.active)
            .finish()
    }
}

impl SystemShared {
    /// Register a new actor and count it. The caller delivers the greeting.
    fn spawn_actor(&self, role: Arc<Role>) -> ActorId {
        let mut registry = self.registry.lock();
        registry.total_spawned += 1;
        if registry.total_spawned > self.config.cast_limit {
            drop(registry);
            fatal!("cast limit of {} exceeded", self.config.cast_limit);
        }

        let id = ActorId::from_raw(registry.actors.len() as u64);
        let record = ActorRecord::new(id, role, self.config.queue_limit);
        debug!(actor = record.id.as_u64(), "actor spawned");
        registry.actors.push(record);
        registry.active += 1;

        id
    }

    pub(crate) fn send(&self, target: ActorId, message: Message) -> Result<(), SendError> {
        let mut registry = self.registry.lock();
        let Some(record) = registry.record_mut(target) else {
            return Err(SendError::UnknownActor(target));
        };

        if !record.alive {
            return Err(SendError::DeadActor(target));
        }

        if let Message::User { kind, .. } = &message {
            let nprompts = record.role.nprompts();
            if *kind >= nprompts {
                return Err(SendError::InvalidKind {
                    kind: *kind,
                    nprompts,
                });
            }
        }

        trace!(
            actor = target.as_u64(),
            kind = message.kind_name(),
            nbytes = message.payload_len(),
            "message accepted"
        );
        match record.mailbox.try_push(message) {
            Ok(()) => {}
            Err(MailboxError::Full { capacity }) => {
                return Err(SendError::QueueFull {
                    id: target,
                    capacity,
                });
            }
        }

        // One dispatch task per queued message; the task carries the target
        // id by value so it survives the sender.
        let task = self.dispatch_task(target);
        match self.pool.lock().as_ref() {
            Some(pool) => pool.submit(task),
            None => fatal!("message accepted with no worker pool running"),
        }

        Ok(())
    }

    fn dispatch_task(&self, target: ActorId) -> Task {
        let system = Weak::clone(&self.self_weak);
        Box::new(move || {
            if let Some(system) = system.upgrade() {
                system.dispatch(target);
            }
        })
    }

    /// Process exactly one queued message of `target` on this worker.
    fn dispatch(&self, target: ActorId) {
        let mut registry = self.registry.lock();

        let released = match registry.record(target) {
            Some(record) => Arc::clone(&record.released),
            None => fatal!("dispatch task for unknown actor {target}"),
        };

        // Serialise behind whichever worker currently executes this actor.
        loop {
            let claimed = match registry.record_mut(target) {
                Some(record) if record.busy => false,
                Some(record) => {
                    record.busy = true;
                    true
                }
                None => fatal!("actor {target} vanished while a dispatch waited"),
            };
            if claimed {
                break;
            }
            released.wait(&mut registry);
        }

        let (role, mut state, message) = match registry.record_mut(target) {
            Some(record) => match record.mailbox.pop() {
                Some(message) => (Arc::clone(&record.role), record.state.take(), message),
                None => fatal!("dispatch task found an empty mailbox for actor {target}"),
            },
            None => fatal!("actor {target} vanished while a dispatch waited"),
        };
        drop(registry);

        trace!(
            actor = target.as_u64(),
            kind = message.kind_name(),
            "processing message"
        );
        self.process(target, &role, &mut state, message);

        let mut registry = self.registry.lock();
        if let Some(record) = registry.record_mut(target) {
            record.state = state;
        }
        let drained = registry
            .record(target)
            .is_some_and(|record| !record.is_active());
        if drained {
            registry.active -= 1;
            if registry.active == 0 {
                debug!("no actor active, signalling idle");
                self.all_idle.notify_all();
            }
        }
        if let Some(record) = registry.record_mut(target) {
            record.busy = false;
            record.released.notify_all();
        }
    }

    /// Run one message with the registry unlocked.
    fn process(
        &self,
        self_id: ActorId,
        role: &Role,
        state: &mut Option<Box<dyn std::any::Any + Send>>,
        message: Message,
    ) {
        match message {
            Message::Spawn(child_role) => {
                let child = self.spawn_actor(child_role);
                if let Err(err) = self.send(child, Message::Hello(Some(self_id))) {
                    fatal!("greeting actor {child} failed: {err}");
                }
            }
            Message::GoDie => {
                let mut registry = self.registry.lock();
                if let Some(record) = registry.record_mut(self_id) {
                    record.alive = false;
                }
                debug!(actor = self_id.as_u64(), "actor retired");
            }
            Message::Hello(creator) => {
                let mut ctx = ActorContext::new(self_id, state, self);
                role.invoke_hello(&mut ctx, creator);
            }
            Message::User { kind, payload } => {
                let mut ctx = ActorContext::new(self_id, state, self);
                if !role.invoke_prompt(&mut ctx, kind, payload) {
                    fatal!(
                        "message kind {kind} outside handler table of actor {self_id}"
                    );
                }
            }
        }
    }

    fn join(&self, id: ActorId) {
        let mut registry = self.registry.lock();
        if id.as_u64() >= registry.total_spawned {
            return;
        }

        while registry.active > 0 {
            self.all_idle.wait(&mut registry);
        }
        drop(registry);

        let pool = self.pool.lock().take();
        if let Some(pool) = pool {
            pool.shutdown();
        }
        self.registry.lock().actors.clear();
        info!("actor system torn down");
    }
}

impl Drop for SystemShared {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.get_mut().take() {
            pool.shutdown();
        }
    }
}
