//! Menu handler layer. Handlers stay thin: collect input, delegate to
//! services, print through the output helpers. Recoverable conditions
//! (absent titles, empty collections, failed lookups) are reported and
//! swallowed; anything that escapes a handler aborts the session.

pub mod catalog;
pub mod users;
