//! Roles and the handler execution context.
//!
//! An actor's behaviour is its [`Role`]: an immutable, shared table of
//! message handlers. Handlers receive an [`ActorContext`] giving them their
//! own id, typed access to the actor-owned state slot, and re-entrant
//! sending.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod context;
pub mod role;

pub use context::ActorContext;
pub use role::{Role, RoleBuilder};
