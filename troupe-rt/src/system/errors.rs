//! System-level error types.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::util::ActorId;

/// Errors reported synchronously from [`send`](crate::system::ActorSystem::send).
///
/// These are the only recoverable failures in the runtime; the sender
/// decides how to react. Everything else terminates the process through the
/// fatal reporter.
#[derive(Error, Debug)]
pub enum SendError {
    /// The target id names no actor in this system.
    #[error("Unknown actor: {0}")]
    UnknownActor(ActorId),

    /// The target actor has processed a `GoDie` and accepts nothing new.
    #[error("Actor {0} is no longer accepting messages")]
    DeadActor(ActorId),

    /// The target actor's mailbox is at its configured limit.
    #[error("Mailbox of actor {id} is full (capacity: {capacity})")]
    QueueFull {
        /// The rejecting actor.
        id: ActorId,
        /// The mailbox capacity that was hit.
        capacity: usize,
    },

    /// A user message kind falls outside the target role's handler table.
    #[error("Message kind {kind} outside handler table of length {nprompts}")]
    InvalidKind {
        /// The offending kind.
        kind: usize,
        /// Handler table length of the target's role.
        nprompts: usize,
    },
}

impl SendError {
    /// Check if the error is transient (retrying later may succeed).
    ///
    /// Only a full mailbox is transient: the target may drain it. A dead or
    /// unknown actor never becomes sendable again, and an invalid kind is a
    /// protocol mismatch.
    pub fn is_transient(&self) -> bool {
        matches!(self, SendError::QueueFull { .. })
    }
}

/// Errors reported from [`create`](crate::system::ActorSystem::create).
#[derive(Error, Debug)]
pub enum SystemError {
    /// Configuration validation failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The cast limit does not allow even the first actor.
    #[error("Cast limit must admit at least one actor (got {cast_limit})")]
    CastLimitTooSmall {
        /// The rejected limit.
        cast_limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_actor_display() {
        let err = SendError::UnknownActor(ActorId::from_raw(9));
        let msg = err.to_string();
        assert!(msg.contains("Unknown actor"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn test_dead_actor_display() {
        let err = SendError::DeadActor(ActorId::from_raw(2));
        assert!(err.to_string().contains("no longer accepting"));
    }

    #[test]
    fn test_queue_full_display() {
        let err = SendError::QueueFull {
            id: ActorId::from_raw(1),
            capacity: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("full"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn test_invalid_kind_display() {
        let err = SendError::InvalidKind {
            kind: 7,
            nprompts: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_transient_errors() {
        let full = SendError::QueueFull {
            id: ActorId::from_raw(0),
            capacity: 4,
        };
        assert!(full.is_transient());

        assert!(!SendError::UnknownActor(ActorId::from_raw(0)).is_transient());
        assert!(!SendError::DeadActor(ActorId::from_raw(0)).is_transient());
        assert!(!SendError::InvalidKind {
            kind: 0,
            nprompts: 0
        }
        .is_transient());
    }

    #[test]
    fn test_system_error_display() {
        let err = SystemError::Config("pool_size must be > 0".to_string());
        assert!(err.to_string().contains("pool_size"));

        let err = SystemError::CastLimitTooSmall { cast_limit: 0 };
        assert!(err.to_string().contains("at least one actor"));
    }
}
