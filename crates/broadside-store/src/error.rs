//! Error type for the store boundary.

/// Errors surfaced by a [`MatchStore`](crate::MatchStore) implementation.
///
/// Store errors never reach a player-facing action result; the callers
/// in the persistence layer log them and move on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed (connection, query, encoding).
    #[error("store backend error: {0}")]
    Backend(String),
}
