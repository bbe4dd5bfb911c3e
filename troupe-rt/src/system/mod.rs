//! System creation, configuration, dispatch, and teardown.
//!
//! # Components
//!
//! - [`ActorSystem`] - the public handle: `create`, `send`, `join`, and
//!   observability accessors.
//! - [`SystemConfig`] - the three capacity parameters (`pool_size`,
//!   `queue_limit`, `cast_limit`) with builder and validation.
//! - [`SendError`] / [`SystemError`] - the recoverable failure surface.
//! - [`fatal`] - the unrecoverable one: a single stderr line, then process
//!   exit.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod actor_system;
pub mod config;
pub mod errors;
pub mod fatal;
pub(crate) mod registry;

pub use actor_system::ActorSystem;
pub use config::{
    SystemConfig, SystemConfigBuilder, DEFAULT_CAST_LIMIT, DEFAULT_POOL_SIZE, DEFAULT_QUEUE_LIMIT,
};
pub use errors::{SendError, SystemError};
