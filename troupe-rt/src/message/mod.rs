//! Message envelopes exchanged between actors.
//!
//! A message is either one of the three lifecycle envelopes the runtime
//! interprets itself ([`Message::Spawn`], [`Message::GoDie`],
//! [`Message::Hello`]) or an application-defined envelope
//! ([`Message::User`]) whose `kind` indexes the receiving role's handler
//! table.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod envelope;

pub use envelope::Message;
