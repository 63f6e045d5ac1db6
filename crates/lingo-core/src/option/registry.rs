//! Deployment option registry.
//!
//! A deployment declares which options from the closed catalog it
//! supports and how they are labelled in its menu. The registry is
//! static configuration; it never changes during a session.

use super::model::OptionId;
use crate::error::{LingoError, Result};
use strum::IntoEnumIterator;

/// The set of options one deployment offers, with display labels.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    entries: Vec<RegistryEntry>,
}

/// One selectable menu entry.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// The option identifier.
    pub id: OptionId,
    /// Human-readable menu label (e.g. "Grammar Correction").
    pub label: &'static str,
}

impl OptionRegistry {
    /// Creates a registry from an explicit option subset.
    pub fn new(options: impl IntoIterator<Item = OptionId>) -> Self {
        let entries = options
            .into_iter()
            .map(|id| RegistryEntry {
                id,
                label: default_label(id),
            })
            .collect();
        Self { entries }
    }

    /// Creates a registry offering the full option catalog.
    pub fn full() -> Self {
        Self::new(OptionId::iter())
    }

    /// Returns the registry entries in menu order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Checks whether this deployment supports an option.
    pub fn supports(&self, id: OptionId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Validates an option against this registry.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::UnknownOption`] if the option is not offered
    /// by this deployment.
    pub fn validate(&self, id: OptionId) -> Result<OptionId> {
        if self.supports(id) {
            Ok(id)
        } else {
            Err(LingoError::unknown_option(id.to_string()))
        }
    }
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::full()
    }
}

fn default_label(id: OptionId) -> &'static str {
    match id {
        OptionId::Correction => "Grammar Correction",
        OptionId::Vocabulary => "Vocabulary Polish",
        OptionId::Explanation => "Explanation",
        OptionId::TranslateHindi => "English → Hindi",
        OptionId::TranslateTelugu => "English → Telugu",
        OptionId::ExamStyle => "Exam-style Rewriting",
        OptionId::TwelveTenses => "12 Tenses",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_registry_supports_everything() {
        let registry = OptionRegistry::full();
        assert_eq!(registry.entries().len(), 7);
        assert!(registry.supports(OptionId::Correction));
        assert!(registry.supports(OptionId::TwelveTenses));
    }

    #[test]
    fn test_subset_registry_rejects_unsupported_option() {
        let registry =
            OptionRegistry::new([OptionId::Correction, OptionId::TranslateHindi]);

        assert!(registry.validate(OptionId::Correction).is_ok());

        let err = registry.validate(OptionId::TranslateTelugu).unwrap_err();
        assert_eq!(
            err,
            LingoError::unknown_option("translate-telugu")
        );
    }
}
