// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Identity of an actor within one system.
///
/// Ids are assigned sequentially on creation as the next index in the
/// registry (`0, 1, 2, …`), are stable for the lifetime of the system, and
/// are never reused. They are cheap to copy, compare, hash, and order.
///
/// # Example
/// ```rust
/// use troupe_rt::util::ActorId;
///
/// let first = ActorId::from_raw(0);
/// let second = ActorId::from_raw(1);
/// assert!(first < second);
/// assert_eq!(first.as_u64(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Create an ActorId from a raw index.
    ///
    /// The runtime assigns ids itself; this constructor exists so
    /// applications can reconstruct ids they carried through message
    /// payloads or configuration.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying index.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Encode the id as little-endian bytes for use inside a message payload.
    ///
    /// # Example
    /// ```rust
    /// use troupe_rt::util::ActorId;
    ///
    /// let id = ActorId::from_raw(7);
    /// let bytes = id.to_le_bytes();
    /// assert_eq!(ActorId::from_le_bytes(bytes), id);
    /// ```
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Decode an id from little-endian bytes.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Decode an id from the first eight bytes of a payload.
    ///
    /// Returns `None` if the payload is shorter than eight bytes.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let bytes: [u8; 8] = payload.get(..8)?.try_into().ok()?;
        Some(Self::from_le_bytes(bytes))
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
