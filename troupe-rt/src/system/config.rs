//! System configuration with sensible defaults.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
// (none)

/// Default number of worker threads.
pub const DEFAULT_POOL_SIZE: usize = 3;

/// Default per-actor mailbox capacity.
pub const DEFAULT_QUEUE_LIMIT: usize = 1024;

/// Default cap on the number of actors ever created in one system lifetime.
pub const DEFAULT_CAST_LIMIT: u64 = 1_048_576;

/// Capacity parameters of one actor system, fixed at creation.
///
/// # Examples
///
/// ```rust
/// use troupe_rt::system::{SystemConfig, DEFAULT_POOL_SIZE};
///
/// // Use default configuration
/// let config = SystemConfig::default();
/// assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
///
/// // Use builder for custom configuration
/// let config = SystemConfig::builder()
///     .with_pool_size(8)
///     .with_queue_limit(64)
///     .build()
///     .unwrap();
/// assert_eq!(config.pool_size, 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Number of worker threads dispatching handler invocations.
    pub pool_size: usize,

    /// Maximum messages queued per actor.
    pub queue_limit: usize,

    /// Maximum number of actors ever created in one system lifetime.
    pub cast_limit: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            queue_limit: DEFAULT_QUEUE_LIMIT,
            cast_limit: DEFAULT_CAST_LIMIT,
        }
    }
}

impl SystemConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SystemConfigBuilder {
        SystemConfigBuilder::default()
    }

    /// Validate configuration values.
    ///
    /// `pool_size` and `queue_limit` must be non-zero. The cast limit is
    /// deliberately not checked here; a limit that admits no actor is
    /// reported by [`create`](crate::system::ActorSystem::create) instead.
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_size == 0 {
            return Err("pool_size must be > 0".to_string());
        }

        if self.queue_limit == 0 {
            return Err("queue_limit must be > 0".to_string());
        }

        Ok(())
    }
}

/// Builder for [`SystemConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct SystemConfigBuilder {
    config: SystemConfig,
}

impl SystemConfigBuilder {
    /// Set the number of worker threads.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.config.pool_size = pool_size;
        self
    }

    /// Set the per-actor mailbox capacity.
    pub fn with_queue_limit(mut self, queue_limit: usize) -> Self {
        self.config.queue_limit = queue_limit;
        self
    }

    /// Set the cap on actors ever created.
    pub fn with_cast_limit(mut self, cast_limit: u64) -> Self {
        self.config.cast_limit = cast_limit;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation message if any value is invalid.
    pub fn build(self) -> Result<SystemConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
