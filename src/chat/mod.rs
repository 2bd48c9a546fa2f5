//! Chat widget back end.
//!
//! ARCHITECTURE
//! ============
//! `canned` and `completion` are the two answer sources, `router` picks
//! between them and records turns, `transcript` holds the turns, and
//! `session` scopes a transcript to one open chat widget.

pub mod canned;
pub mod completion;
pub mod router;
pub mod session;
pub mod transcript;

pub use canned::CannedResponses;
pub use completion::CompletionClient;
pub use router::QueryRouter;
pub use session::SessionStore;
