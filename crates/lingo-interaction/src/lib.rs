//! Lingo interaction: text transform implementations.
//!
//! The engine in `lingo-core` treats every capability as an opaque
//! [`TextTransform`]; this crate supplies the implementations - a
//! hosted-LLM messages-API transform with per-capability instruction
//! profiles, plus deterministic mocks for tests and offline use.

pub mod api_transform;
pub mod config;
pub mod mock;
pub mod profiles;

pub use api_transform::LlmApiTransform;
pub use config::{ApiCredentials, SecretConfig};
pub use profiles::{profile, CapabilityProfile};

use lingo_core::{Dispatcher, OptionRegistry, Result, TextTransform};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Builds a dispatcher for a registry, backing every capability the
/// registry implies with a hosted-LLM transform.
///
/// All transforms share one set of credentials loaded from the secret
/// file or environment.
///
/// # Errors
///
/// Returns [`LingoError::Config`](lingo_core::LingoError::Config) if no
/// API key is configured.
pub fn build_dispatcher(registry: OptionRegistry) -> Result<Dispatcher> {
    let credentials = ApiCredentials::load()?;

    let kinds: BTreeSet<_> = registry.entries().iter().map(|e| e.id.kind()).collect();

    let mut dispatcher = Dispatcher::new(registry);
    for kind in kinds {
        let transform: Arc<dyn TextTransform> = Arc::new(LlmApiTransform::new(
            kind,
            credentials.api_key.clone(),
            credentials.model.clone(),
        ));
        dispatcher = dispatcher.register(kind, transform);
    }

    Ok(dispatcher)
}
