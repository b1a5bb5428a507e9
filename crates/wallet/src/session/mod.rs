//! Session negotiation and per-session state.

mod negotiator;
pub use negotiator::{NamespaceNegotiator, NegotiatedSession};

mod state;
pub use state::{SessionContext, SessionRegistry};
