//! Per-capability instruction profiles.
//!
//! The original pretrained models were steered with textual prefixes
//! (a `grammar: ` task prefix, a `<2te> ` target-language tag); the
//! hosted-LLM transforms carry the equivalent steering as a system
//! instruction per capability.

use lingo_core::TransformKind;

/// The instruction profile for one transform capability.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityProfile {
    /// The capability this profile steers.
    pub kind: TransformKind,
    /// Short description of the capability.
    pub description: &'static str,
    /// System instruction sent with every request.
    pub instruction: &'static str,
}

/// Returns the instruction profile for a capability.
pub fn profile(kind: TransformKind) -> CapabilityProfile {
    match kind {
        TransformKind::Grammar => CapabilityProfile {
            kind,
            description: "Grammar and vocabulary correction",
            instruction: "Correct the grammar and word choice of the user's English \
                          sentence. Reply with the corrected sentence only, no commentary.",
        },
        TransformKind::Explanation => CapabilityProfile {
            kind,
            description: "Plain-language explanation",
            instruction: "Explain the meaning of the user's English sentence in simple \
                          words a language learner can follow. Keep it to two or three \
                          short sentences.",
        },
        TransformKind::ExamStyle => CapabilityProfile {
            kind,
            description: "Exam-style rewriting",
            instruction: "Rewrite the user's sentence in formal, exam-appropriate \
                          English. Reply with the rewritten sentence only.",
        },
        TransformKind::TranslateHindi => CapabilityProfile {
            kind,
            description: "English to Hindi translation",
            instruction: "Translate the user's English sentence into Hindi. Reply with \
                          the Hindi translation only, in Devanagari script.",
        },
        TransformKind::TranslateTelugu => CapabilityProfile {
            kind,
            description: "English to Telugu translation",
            instruction: "Translate the user's English sentence into Telugu. Reply with \
                          the Telugu translation only, in Telugu script.",
        },
        TransformKind::Tenses => CapabilityProfile {
            kind,
            description: "Twelve-tense conjugation",
            instruction: "Rewrite the user's English sentence in each of the twelve \
                          English tenses. Reply as a list with one line per tense, \
                          formatted as 'Tense name: sentence'.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_capability_has_a_profile() {
        for kind in TransformKind::iter() {
            let profile = profile(kind);
            assert_eq!(profile.kind, kind);
            assert!(!profile.instruction.is_empty());
        }
    }
}
