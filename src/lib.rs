//! Rule-based affix segmentation and EAGLES-to-UD tag mapping for Spanish.
//!
//! A host tokenizer leaves fused forms like `dímelo` or `rápidamente` as
//! single tokens. This crate decodes legacy EAGLES tag codes into Universal
//! Dependencies POS + features, and splits fused tokens by trying ordered
//! affix rules whose residual stems are verified against a lexicon.

pub mod eagles;
pub mod segmentation;

#[cfg(test)]
mod segmentation_test;

pub use eagles::{DecodedTag, UNKNOWN_TAG, UdPos, decode};
pub use segmentation::lexicon::{Lexicon, LexiconEntry, LexiconRecord};
pub use segmentation::models::{AffixAttrs, AffixKind, Retokenizer, Segmentation};
pub use segmentation::prefilter::{AutomatonPrefilter, CandidateMatcher, RegexPrefilter};
pub use segmentation::rules::{AffixRule, AffixRuleRecord, RuleSet};
pub use segmentation::{AffixEngine, EngineConfig, SplitOn};
