// Layer 1: Standard library imports
use std::any::Any;
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::message::Message;
use crate::system::actor_system::SystemShared;
use crate::system::errors::SendError;
use crate::util::ids::ActorId;

/// Execution context handed to every handler invocation.
///
/// The context identifies the actor the handler is running as, gives typed
/// access to that actor's private state slot, and allows sending messages -
/// including to the current actor itself. It borrows the dispatch that
/// created it and never escapes the handler.
///
/// State is an opaque slot owned by the actor. Because the runtime
/// guarantees at most one handler of a given actor runs at a time, the slot
/// needs no synchronisation of its own; handlers read and replace it freely
/// through the typed accessors.
///
/// # Example
/// ```rust,ignore
/// let role = Role::builder()
///     .on_hello(|ctx, _creator| {
///         ctx.set_state(0u64);
///     })
///     .prompt(|ctx, _payload| {
///         if let Some(count) = ctx.state_mut::<u64>() {
///             *count += 1;
///         }
///     })
///     .build();
/// ```
pub struct ActorContext<'a> {
    id: ActorId,
    state: &'a mut Option<Box<dyn Any + Send>>,
    system: &'a SystemShared,
}

impl<'a> ActorContext<'a> {
    pub(crate) fn new(
        id: ActorId,
        state: &'a mut Option<Box<dyn Any + Send>>,
        system: &'a SystemShared,
    ) -> Self {
        Self { id, state, system }
    }

    /// Id of the actor this handler is running as.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Send a message to any actor in the system, the current one included.
    ///
    /// # Errors
    ///
    /// The same failures as [`ActorSystem::send`](crate::system::ActorSystem::send):
    /// unknown target, dead target, full mailbox, or an out-of-range user
    /// kind.
    pub fn send(&self, target: ActorId, message: Message) -> Result<(), SendError> {
        self.system.send(target, message)
    }

    /// Borrow the state slot, downcast to `T`.
    ///
    /// Returns `None` while the slot is empty or holds another type.
    pub fn state<T: 'static>(&self) -> Option<&T> {
        self.state.as_ref().and_then(|boxed| boxed.downcast_ref())
    }

    /// Mutably borrow the state slot, downcast to `T`.
    pub fn state_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.state.as_mut().and_then(|boxed| boxed.downcast_mut())
    }

    /// Replace the state slot with a new value.
    pub fn set_state<T: Any + Send>(&mut self, value: T) {
        *self.state = Some(Box::new(value));
    }
}

impl fmt::Debug for ActorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorContext")
            .field("id", &self.id)
            .field("has_state", &self.state.is_some())
            .finish()
    }
}
