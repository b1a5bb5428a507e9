use crate::transport::Session;
use dao_wallet_core::WalletError;

/// Callbacks for session lifecycle events.
///
/// Installing an observer also decides how failed proposals are reported: with an observer
/// they go to [`on_session_rejected`](Self::on_session_rejected), without one they are
/// returned to the caller.
pub trait SessionObserver: Send + Sync {
    fn on_session_approved(&self, _session: &Session) {}

    fn on_session_rejected(&self, _proposal_id: u64, _error: &WalletError) {}

    fn on_session_deleted(&self, _topic: &str) {}
}
