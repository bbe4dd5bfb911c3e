//! Message queuing for actors and the worker pool.
//!
//! Two layers live here:
//!
//! - [`Fifo`] - the unbounded strict-FIFO primitive. No internal locking;
//!   callers synchronise access themselves (the runtime holds its registry
//!   or pool mutex around every operation).
//! - [`Mailbox`] - the per-actor bounded queue built on [`Fifo`]. A push
//!   against a full mailbox is rejected with [`MailboxError::Full`] so the
//!   sender can apply its own back-pressure policy; there is no blocking
//!   send variant.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod bounded;
pub mod queue;

pub use bounded::{Mailbox, MailboxError};
pub use queue::Fifo;
