//! Identity-resolution hook: mapping a connected session to an account.
//!
//! Broadside does not own a session table. The transport/session layer
//! implements this trait and the registry calls it once per participant
//! at match creation. A resolution failure there produces a degraded
//! match that never enters gameplay; the abort path does not need the
//! resolver at all because it carries identities explicitly.

use broadside_types::{AccountId, SessionId};

use crate::MatchError;

/// Maps a connected session to its authenticated account identity.
///
/// `Send + Sync + 'static` so one resolver can be shared by every match
/// creation the registry performs.
pub trait IdentityResolver: Send + Sync + 'static {
    /// Resolves a session to its account, or fails with
    /// [`MatchError::UnresolvedSession`] when the session maps to no
    /// known account.
    fn resolve(
        &self,
        session: SessionId,
    ) -> impl Future<Output = Result<AccountId, MatchError>> + Send;
}
