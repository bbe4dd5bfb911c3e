//! # troupe-rt - Role-Based Actor Runtime on a Fixed Worker Pool
//!
//! A small synchronous actor runtime: applications define *roles* (ordered
//! tables of message handlers), instantiate actors bound to those roles, and
//! exchange messages between them. All handler execution is multiplexed
//! onto a fixed-size pool of OS worker threads.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use troupe_rt::prelude::*;
//!
//! const POKE: usize = 0;
//!
//! // 1. Define a role: a hello handler plus a table of user handlers.
//! let role = Arc::new(
//!     Role::builder()
//!         .on_hello(|ctx, _creator| {
//!             ctx.set_state(0u32);
//!         })
//!         .prompt(|ctx, _payload| {
//!             if let Some(count) = ctx.state_mut::<u32>() {
//!                 *count += 1;
//!             }
//!         })
//!         .build(),
//! );
//!
//! // 2. Create the system; the first actor is greeted automatically.
//! let (system, first) = ActorSystem::create(SystemConfig::default(), role).unwrap();
//!
//! // 3. Exchange messages, then retire the actor and wait for quiescence.
//! system.send(first, Message::user_empty(POKE)).unwrap();
//! system.send(first, Message::godie()).unwrap();
//! system.join(first);
//! ```
//!
//! # Execution Model
//!
//! Every successful [`send`](system::ActorSystem::send) queues the message
//! on the target's private mailbox and posts exactly one dispatch task to
//! the worker pool. A worker running that task claims the target actor,
//! pops one message, and runs the handler with no runtime lock held -
//! handlers may therefore send freely, including to themselves.
//!
//! The runtime guarantees:
//!
//! - **Per-actor serial FIFO**: one actor's handlers never overlap, and
//!   messages are processed in the order their sends succeeded.
//! - **Parallelism across actors**: up to `pool_size` handlers of distinct
//!   actors run concurrently.
//! - **Eventual quiescence**: an actor leaves the active set once it has
//!   processed a [`GoDie`](message::Message::GoDie) and drained its mailbox;
//!   [`join`](system::ActorSystem::join) returns when no actor is active.
//!
//! # Lifecycle Messages
//!
//! Three envelopes are interpreted by the runtime itself:
//!
//! - [`Spawn`](message::Message::Spawn) creates a new actor bound to a role
//!   shipped in the envelope; the runtime greets the newcomer with a
//!   [`Hello`](message::Message::Hello) carrying the creator's id.
//! - [`GoDie`](message::Message::GoDie) retires the receiver: no new
//!   messages are accepted, already-queued ones still drain in order.
//! - [`Hello`](message::Message::Hello) is the first message every actor
//!   processes.
//!
//! # Failure Surface
//!
//! Send-time problems (unknown target, dead target, full mailbox, bad user
//! kind) come back synchronously as [`SendError`](system::SendError) values
//! and are never fatal. Contract violations the library cannot recover from
//! (the cast limit breached, a task submitted to a stopped pool, a broken
//! dispatch invariant) write one line to standard error through the
//! [`fatal!`] macro and terminate the process.
//!
//! # Module Organization
//!
//! - [`actor`] - roles, the role builder, and the handler context
//! - [`message`] - the message envelope
//! - [`mailbox`] - FIFO primitive and the bounded per-actor mailbox
//! - [`pool`] - the fixed worker pool
//! - [`system`] - system handle, configuration, errors, dispatch core
//! - [`util`] - actor ids

pub mod actor;
pub mod mailbox;
pub mod message;
pub mod pool;
pub mod system;
pub mod util;

// Re-export commonly used types
pub use actor::{ActorContext, Role, RoleBuilder};
pub use mailbox::{Fifo, Mailbox, MailboxError};
pub use message::Message;
pub use pool::WorkerPool;
pub use system::{ActorSystem, SendError, SystemConfig, SystemError};
pub use util::ActorId;

/// Convenience imports for applications.
pub mod prelude {
    pub use crate::actor::{ActorContext, Role, RoleBuilder};
    pub use crate::message::Message;
    pub use crate::system::{ActorSystem, SendError, SystemConfig, SystemError};
    pub use crate::util::ActorId;
}
