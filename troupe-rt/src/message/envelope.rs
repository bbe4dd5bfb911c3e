// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use bytes::Bytes;

// Layer 3: Internal module imports
use crate::actor::role::Role;
use crate::util::ids::ActorId;

/// A message envelope addressed to one actor.
///
/// Three envelopes are interpreted by the runtime itself:
///
/// - [`Message::Spawn`] creates a new actor bound to the supplied role.
/// - [`Message::GoDie`] stops the receiver from accepting further messages;
///   whatever is already queued still drains in order.
/// - [`Message::Hello`] is delivered automatically to every new actor as its
///   first message and carries the creator's id (`None` for the first actor
///   of a system).
///
/// Everything else travels as [`Message::User`]: a `kind` indexing the
/// receiving role's handler table plus an immutable byte payload. The
/// envelope owns the payload view; cloning is cheap (`Bytes` is
/// reference-counted).
///
/// # Example
/// ```rust
/// use troupe_rt::message::Message;
///
/// const PING: usize = 0;
///
/// let msg = Message::user(PING, vec![1, 2, 3]);
/// assert_eq!(msg.kind_name(), "user");
///
/// let quit = Message::godie();
/// assert_eq!(quit.kind_name(), "godie");
/// ```
#[derive(Clone)]
pub enum Message {
    /// Create a new actor bound to the role and greet it with a `Hello`.
    Spawn(Arc<Role>),

    /// The receiver stops accepting new messages once this is processed.
    GoDie,

    /// First message of every actor; carries the creator's id.
    Hello(Option<ActorId>),

    /// Application-defined message routed to the role's handler table.
    User {
        /// Index into the receiving role's handler table.
        kind: usize,
        /// Immutable payload view handed to the handler.
        payload: Bytes,
    },
}

impl Message {
    /// Build a `Spawn` envelope for the given role.
    pub fn spawn(role: Arc<Role>) -> Self {
        Self::Spawn(role)
    }

    /// Build a `GoDie` envelope.
    pub fn godie() -> Self {
        Self::GoDie
    }

    /// Build a user envelope with a payload.
    ///
    /// # Example
    /// ```rust
    /// use troupe_rt::message::Message;
    ///
    /// let msg = Message::user(2, b"payload".to_vec());
    /// assert_eq!(msg.payload_len(), 7);
    /// ```
    pub fn user(kind: usize, payload: impl Into<Bytes>) -> Self {
        Self::User {
            kind,
            payload: payload.into(),
        }
    }

    /// Build a user envelope without a payload.
    pub fn user_empty(kind: usize) -> Self {
        Self::User {
            kind,
            payload: Bytes::new(),
        }
    }

    /// Short name of the envelope kind, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Spawn(_) => "spawn",
            Self::GoDie => "godie",
            Self::Hello(_) => "hello",
            Self::User { .. } => "user",
        }
    }

    /// Payload length in bytes; zero for lifecycle envelopes.
    pub fn payload_len(&self) -> usize {
        match self {
            Self::User { payload, .. } => payload.len(),
            _ => 0,
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(role) => f.debug_tuple("Spawn").field(&role.nprompts()).finish(),
            Self::GoDie => f.write_str("GoDie"),
            Self::Hello(creator) => f.debug_tuple("Hello").field(creator).finish(),
            Self::User { kind, payload } => f
                .debug_struct("User")
                .field("kind", kind)
                .field("nbytes", &payload.len())
                .finish(),
        }
    }
}
