// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use bytes::Bytes;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::util::ids::ActorId;

/// Handler invoked for the automatic greeting every new actor receives.
///
/// The second argument is the creator's id, `None` for the first actor of a
/// system.
pub type HelloHandler = dyn Fn(&mut ActorContext<'_>, Option<ActorId>) + Send + Sync;

/// Handler invoked for one user message kind.
///
/// The payload is the immutable byte view carried by the envelope.
pub type PromptHandler = dyn Fn(&mut ActorContext<'_>, Bytes) + Send + Sync;

/// An actor's behaviour: a greeting handler plus an ordered table of user
/// message handlers ("prompts").
///
/// Roles are immutable and shared: the same `Arc<Role>` may back any number
/// of actors, and a role passed inside a [`Spawn`](crate::message::Message::Spawn)
/// envelope stays alive as long as any actor bound to it. A user message
/// with kind `k` reaches `prompts[k]`; kinds at or beyond
/// [`nprompts`](Role::nprompts) are rejected at send time.
///
/// # Example
/// ```rust
/// use troupe_rt::actor::Role;
///
/// const GREETED: usize = 0;
///
/// let role = Role::builder()
///     .on_hello(|ctx, creator| {
///         ctx.set_state(creator); // remember who spawned us
///     })
///     .prompt(|_ctx, payload| {
///         assert!(!payload.is_empty());
///     })
///     .build();
///
/// assert_eq!(role.nprompts(), 1);
/// ```
pub struct Role {
    hello: Box<HelloHandler>,
    prompts: Vec<Box<PromptHandler>>,
}

impl Role {
    /// Create a new role builder.
    pub fn builder() -> RoleBuilder {
        RoleBuilder::new()
    }

    /// Length of the user handler table.
    pub fn nprompts(&self) -> usize {
        self.prompts.len()
    }

    pub(crate) fn invoke_hello(&self, ctx: &mut ActorContext<'_>, creator: Option<ActorId>) {
        (self.hello)(ctx, creator);
    }

    /// Run the handler for `kind`; `false` when the kind is out of range.
    pub(crate) fn invoke_prompt(
        &self,
        ctx: &mut ActorContext<'_>,
        kind: usize,
        payload: Bytes,
    ) -> bool {
        match self.prompts.get(kind) {
            Some(prompt) => {
                prompt(ctx, payload);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Role")
            .field("nprompts", &self.nprompts())
            .finish()
    }
}

/// Builder for [`Role`] with a fluent API.
///
/// Prompts are appended in call order; the first [`prompt`](RoleBuilder::prompt)
/// registers kind `0`, the second kind `1`, and so on. A role built without
/// [`on_hello`](RoleBuilder::on_hello) greets silently.
pub struct RoleBuilder {
    hello: Option<Box<HelloHandler>>,
    prompts: Vec<Box<PromptHandler>>,
}

impl RoleBuilder {
    fn new() -> Self {
        Self {
            hello: None,
            prompts: Vec::new(),
        }
    }

    /// Set the greeting handler.
    pub fn on_hello(
        mut self,
        handler: impl Fn(&mut ActorContext<'_>, Option<ActorId>) + Send + Sync + 'static,
    ) -> Self {
        self.hello = Some(Box::new(handler));
        self
    }

    /// Append a user message handler; its kind is the current table length.
    pub fn prompt(
        mut self,
        handler: impl Fn(&mut ActorContext<'_>, Bytes) + Send + Sync + 'static,
    ) -> Self {
        self.prompts.push(Box::new(handler));
        self
    }

    /// Finish the role.
    pub fn build(self) -> Role {
        Role {
            hello: self.hello.unwrap_or_else(|| Box::new(|_, _| {})),
            prompts: self.prompts,
        }
    }
}

impl fmt::Debug for RoleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleBuilder")
            .field("has_hello", &self.hello.is_some())
            .field("nprompts", &self.prompts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_role() {
        let role = Role::builder().build();
        assert_eq!(role.nprompts(), 0);
    }

    #[test]
    fn test_prompt_table_length() {
        let role = Role::builder()
            .prompt(|_, _| {})
            .prompt(|_, _| {})
            .prompt(|_, _| {})
            .build();
        assert_eq!(role.nprompts(), 3);
    }

    #[test]
    fn test_builder_debug() {
        let builder = Role::builder().prompt(|_, _| {});
        let debug = format!("{builder:?}");
        assert!(debug.contains("has_hello: false"));
        assert!(debug.contains("nprompts: 1"));
    }

    #[test]
    fn test_role_debug() {
        let role = Role::builder().prompt(|_, _| {}).build();
        assert!(format!("{role:?}").contains("nprompts: 1"));
    }
}
