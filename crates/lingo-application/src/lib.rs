//! Lingo application layer.
//!
//! Owns the mapping from conversation identifiers to sessions and the
//! per-conversation serialization guarantee. Presentation surfaces
//! (REPL, bot adapters) talk to [`SessionService`] and never hold
//! session state themselves.

mod service;

pub use service::SessionService;
