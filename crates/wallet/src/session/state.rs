use dao_wallet_core::{Network, StacksAddress, WalletError, error::Result};
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// What the router knows about one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
    pub topic: String,
    /// The account bound to this session, `None` while locked.
    pub account: Option<StacksAddress>,
    /// Network used when a request names none.
    pub network: Network,
}

impl SessionContext {
    pub fn new(topic: impl Into<String>, account: Option<StacksAddress>, network: Network) -> Self {
        Self { topic: topic.into(), account, network }
    }

    /// The bound account, or [`WalletError::NoAccount`].
    pub fn require_account(&self) -> Result<&StacksAddress> {
        self.account.as_ref().ok_or(WalletError::NoAccount)
    }
}

/// All live sessions, keyed by topic.
///
/// Cloning shares the underlying map.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SessionContext>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session, replacing any previous one with the same topic.
    pub fn insert(&self, session: SessionContext) {
        self.sessions.write().insert(session.topic.clone(), session);
    }

    /// A snapshot of the session's current state.
    pub fn get(&self, topic: &str) -> Option<SessionContext> {
        self.sessions.read().get(topic).cloned()
    }

    pub fn remove(&self, topic: &str) -> Option<SessionContext> {
        self.sessions.write().remove(topic)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.sessions.read().contains_key(topic)
    }

    /// Binds `account` to the session, or locks it with `None`.
    pub fn set_account(&self, topic: &str, account: Option<StacksAddress>) -> Result<()> {
        let mut sessions = self.sessions.write();
        let session =
            sessions.get_mut(topic).ok_or_else(|| WalletError::SessionNotFound(topic.to_string()))?;
        session.account = account;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<_> = self.sessions.read().keys().cloned().collect();
        topics.sort();
        topics
    }
}
