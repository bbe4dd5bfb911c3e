// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use super::queue::Fifo;
use crate::message::Message;

/// Error raised by [`Mailbox::try_push`].
#[derive(Debug, Error)]
pub enum MailboxError {
    /// The mailbox already holds `capacity` messages.
    #[error("Mailbox is full (capacity: {capacity})")]
    Full {
        /// Configured capacity of the rejecting mailbox.
        capacity: usize,
    },
}

/// Per-actor bounded message queue.
///
/// A [`Fifo`] with a capacity. Pushing against a full mailbox is rejected
/// with [`MailboxError::Full`]; the sender decides what to do with the
/// rejection. Like the underlying queue, the mailbox is not thread-safe on
/// its own - the dispatcher holds the registry mutex around every access.
///
/// # Example
/// ```rust
/// use troupe_rt::mailbox::{Mailbox, MailboxError};
/// use troupe_rt::message::Message;
///
/// let mut mailbox = Mailbox::new(2);
/// assert!(mailbox.try_push(Message::godie()).is_ok());
/// assert!(mailbox.try_push(Message::godie()).is_ok());
/// assert!(matches!(
///     mailbox.try_push(Message::godie()),
///     Err(MailboxError::Full { capacity: 2 })
/// ));
/// ```
pub struct Mailbox {
    queue: Fifo<Message>,
    capacity: usize,
}

impl Mailbox {
    /// Create an empty mailbox holding at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Fifo::new(),
            capacity,
        }
    }

    /// Enqueue a message, rejecting it when the mailbox is at capacity.
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::Full`] when `len() == capacity()`.
    pub fn try_push(&mut self, message: Message) -> Result<(), MailboxError> {
        if self.queue.len() >= self.capacity {
            return Err(MailboxError::Full {
                capacity: self.capacity,
            });
        }
        self.queue.push(message);
        Ok(())
    }

    /// Remove and return the oldest queued message.
    pub fn pop(&mut self) -> Option<Message> {
        self.queue.pop()
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no messages are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
