//! Core data structures for affix segmentation results.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::eagles::UdPos;

/// Which side of the token an affix rule operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// Outcome of a successful rule application for one token.
///
/// The engine never touches host-owned token state; it returns this record
/// and the caller's [`Retokenizer`] applies it to the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segmentation {
    /// Key of the rule group that produced this result.
    pub rule_key: String,
    /// Affix side of the winning rule.
    pub kind: AffixKind,
    /// Whether the token is structurally split into `pieces`. When false,
    /// only the tag and lemma update in place.
    pub should_split: bool,
    /// Output token texts in surface order. For suffix rules the stem comes
    /// first; for prefix rules it comes last.
    pub pieces: Vec<String>,
    /// Syntactic head of each piece as an offset from itself: `0` = self,
    /// `1` = previous piece, `-1` = next piece. Offsets survive host-side
    /// token renumbering, absolute indices would not.
    pub heads: Vec<i32>,
    /// Resolved UD coarse part-of-speech for the token (or stem piece).
    pub pos: UdPos,
    /// Pipe-joined, sorted `Name=Value` feature string; empty when the
    /// resolved reading carries no features.
    pub tag: String,
    /// Lemma override, when lemma replacement is enabled and the rule
    /// resolves one.
    pub lemma: Option<String>,
    /// The transformed stem form that was found in the lexicon.
    pub matched_stem: String,
    /// Number of affix pieces split off the stem.
    pub affix_count: usize,
}

impl Segmentation {
    /// Resolve the head offsets to absolute piece indices.
    pub fn head_indices(&self) -> Vec<usize> {
        self.heads
            .iter()
            .enumerate()
            .map(|(index, &offset)| (index as i32 - offset) as usize)
            .collect()
    }

    /// Index of the stem piece within `pieces`.
    pub fn stem_index(&self) -> usize {
        match self.kind {
            AffixKind::Suffix => 0,
            AffixKind::Prefix => self.pieces.len().saturating_sub(1),
        }
    }
}

/// Per-token attributes exposed to the host document model after a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AffixAttrs {
    /// True once a rule has segmented this token in the current pass.
    pub has_affixes: bool,
    /// Key of the rule group that fired.
    pub rule_key: Option<String>,
    /// Affix side of the rule that fired.
    pub kind: Option<AffixKind>,
    /// The lexicon-verified stem form.
    pub matched_stem: Option<String>,
    /// Number of affix pieces split off.
    pub affix_count: usize,
    /// Resolved lemma override.
    pub lemma: Option<String>,
}

impl AffixAttrs {
    pub fn from_segmentation(segmentation: &Segmentation) -> Self {
        AffixAttrs {
            has_affixes: true,
            rule_key: Some(segmentation.rule_key.clone()),
            kind: Some(segmentation.kind),
            matched_stem: Some(segmentation.matched_stem.clone()),
            affix_count: segmentation.affix_count,
            lemma: segmentation.lemma.clone(),
        }
    }
}

/// Host-side retokenization adapter.
///
/// Implementations own the document structure: they perform the actual
/// token split, reattach heads, and record tag/lemma/attribute updates.
/// Called at most once per token per pass.
pub trait Retokenizer {
    fn retokenize(&mut self, token_index: usize, segmentation: &Segmentation)
    -> anyhow::Result<()>;
}
