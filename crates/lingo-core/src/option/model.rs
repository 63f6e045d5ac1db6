//! Option catalog: the closed set of selectable options and the distinct
//! transform capabilities behind them.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A user-selectable processing option.
///
/// This is a closed set; a given deployment supports a subset of it
/// (declared by its [`OptionRegistry`](super::OptionRegistry)).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OptionId {
    /// Grammar correction of the submitted sentence.
    Correction,
    /// Vocabulary polish; routes to the same grammar transform as Correction.
    Vocabulary,
    /// Plain-language explanation of the sentence.
    Explanation,
    /// English → Hindi translation.
    TranslateHindi,
    /// English → Telugu translation.
    TranslateTelugu,
    /// Exam-style (formal) rewriting.
    ExamStyle,
    /// Conjugation of the sentence across the twelve English tenses.
    TwelveTenses,
}

impl OptionId {
    /// Returns the distinct transform capability this option routes to.
    ///
    /// `Correction` and `Vocabulary` both map to [`TransformKind::Grammar`];
    /// selecting both must invoke the grammar transform once.
    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Correction | Self::Vocabulary => TransformKind::Grammar,
            Self::Explanation => TransformKind::Explanation,
            Self::TranslateHindi => TransformKind::TranslateHindi,
            Self::TranslateTelugu => TransformKind::TranslateTelugu,
            Self::ExamStyle => TransformKind::ExamStyle,
            Self::TwelveTenses => TransformKind::Tenses,
        }
    }
}

/// A distinct transform capability backed by one collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    Grammar,
    Explanation,
    ExamStyle,
    TranslateHindi,
    TranslateTelugu,
    Tenses,
}

impl TransformKind {
    /// Section label used when rendering this capability's output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grammar => "Corrected",
            Self::Explanation => "Explanation",
            Self::ExamStyle => "Exam style",
            Self::TranslateHindi => "Hindi",
            Self::TranslateTelugu => "Telugu",
            Self::Tenses => "Tenses",
        }
    }

    /// Whether this capability consumes the corrected working value when a
    /// grammar option was co-selected (the data-dependency rule).
    pub fn consumes_corrected(&self) -> bool {
        !matches!(self, Self::Grammar)
    }
}

/// Fixed evaluation order for dispatch, independent of toggle order:
/// correction first (producing the corrected working value used
/// downstream), then explanation, exam-style rewriting, translations,
/// and tense conjugation.
pub const EVALUATION_ORDER: [TransformKind; 6] = [
    TransformKind::Grammar,
    TransformKind::Explanation,
    TransformKind::ExamStyle,
    TransformKind::TranslateHindi,
    TransformKind::TranslateTelugu,
    TransformKind::Tenses,
];
