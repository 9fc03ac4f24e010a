//! Identity newtypes.
//!
//! Each id wraps a primitive so the compiler keeps the different
//! addressing schemes apart: a connected session is not an account, and
//! neither is the durable-record key of a match.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A connected-session handle, assigned by the transport layer.
///
/// Sessions are ephemeral: a session maps to an account only while the
/// connection (and the caller's session table) lives. The core never
/// stores sessions past match creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// A durable account identity, the key for account records in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal correlation key for a live match.
///
/// Only meaningful inside one server process; the durable key for
/// persistence lookups is [`GameKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M-{}", self.0)
    }
}

/// The durable-record key of a match, generated at creation and used
/// for every store lookup of that match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameKey(pub String);

impl GameKey {
    /// Generates a fresh random key: 16 lowercase hex characters
    /// (64 bits of entropy).
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; 8] = rng.random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
