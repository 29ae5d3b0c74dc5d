//! Affix Segmentation Engine
//!
//! This module applies ordered affix-removal rules to fused Spanish word
//! forms (clitic-attached verbs, adverbial compounds, prefixed words),
//! verifies the residual stem against a lexicon under a part-of-speech
//! constraint, and produces a [`Segmentation`] describing how to split the
//! token, which heads the new pieces attach to, and the resolved lemma.

pub mod lemma;
pub mod lexicon;
pub mod models;
pub mod normalize;
pub mod prefilter;
pub mod rules;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, ensure};
use log::{debug, info};

use crate::eagles::{self, UdPos};
use crate::segmentation::lemma::LemmaContext;
use crate::segmentation::lexicon::Lexicon;
use crate::segmentation::models::{AffixKind, Retokenizer, Segmentation};
use crate::segmentation::prefilter::CandidateMatcher;
use crate::segmentation::rules::{AffixRule, RuleSet};

/// Which resulting UD POS values trigger an actual structural split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOn {
    /// Split whenever a rule matches, regardless of resulting POS.
    Any,
    /// Split only when the resulting POS is in the set.
    Pos(HashSet<UdPos>),
}

impl SplitOn {
    /// Never split structurally; rules still update tags and lemmas.
    pub fn none() -> Self {
        SplitOn::Pos(HashSet::new())
    }

    pub fn matches(&self, pos: UdPos) -> bool {
        match self {
            SplitOn::Any => true,
            SplitOn::Pos(set) => set.contains(&pos),
        }
    }
}

impl Default for SplitOn {
    /// Verbs only.
    fn default() -> Self {
        SplitOn::Pos(HashSet::from([UdPos::Verb]))
    }
}

/// Caller-facing engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub split_on: SplitOn,
    /// When false, rules never override the lemma.
    pub replace_lemma: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        EngineConfig {
            split_on: SplitOn::default(),
            replace_lemma: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::new()
    }
}

/// The affix rule engine.
///
/// Holds the immutable lexicon and rule tables behind `Arc`s: the engine is
/// stateless across calls, so independent documents may be processed in
/// parallel from clones sharing the same tables.
#[derive(Debug, Clone)]
pub struct AffixEngine {
    lexicon: Arc<Lexicon>,
    rules: Arc<RuleSet>,
    config: EngineConfig,
}

impl AffixEngine {
    /// Create an engine with the default configuration (split on verbs,
    /// lemma replacement enabled).
    ///
    /// Fails when either table is empty: the engine cannot operate
    /// partially and does not fetch data itself.
    pub fn new(lexicon: Arc<Lexicon>, rules: Arc<RuleSet>) -> Result<Self> {
        Self::with_config(lexicon, rules, EngineConfig::new())
    }

    pub fn with_config(
        lexicon: Arc<Lexicon>,
        rules: Arc<RuleSet>,
        config: EngineConfig,
    ) -> Result<Self> {
        ensure!(
            !lexicon.is_empty(),
            "affix segmentation requires a lexicon; the supplied one is empty"
        );
        ensure!(
            !rules.is_empty(),
            "affix segmentation requires affix rules; the supplied table is empty"
        );
        info!(
            "affix engine ready: {} word forms, {} rules",
            lexicon.len(),
            rules.len()
        );
        Ok(AffixEngine {
            lexicon,
            rules,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Try every rule group in table order; the first success wins.
    ///
    /// Returns `None` for tokens already segmented in this pass, tokens no
    /// rule matches, and tokens whose every stem candidate fails lexicon
    /// verification. A failed attempt leaves nothing behind.
    pub fn apply(&self, token: &str, already_segmented: bool) -> Option<Segmentation> {
        if already_segmented {
            return None;
        }
        self.rules
            .groups()
            .find_map(|group| self.try_rules(token, &group.rules))
    }

    /// Try only the rules of one group (the key a pre-filter matched), in
    /// record order.
    pub fn apply_group(
        &self,
        token: &str,
        key: &str,
        already_segmented: bool,
    ) -> Option<Segmentation> {
        if already_segmented {
            return None;
        }
        self.try_rules(token, self.rules.get(key)?)
    }

    /// Run one pass over a document's tokens.
    ///
    /// The pre-filter narrows each token to candidate rule groups; the
    /// first group that succeeds claims the token and its result goes to
    /// the retokenizer. The segmented-guard is local to this call: it never
    /// leaks across documents or threads.
    pub fn process_document<T, R>(
        &self,
        tokens: &[T],
        matcher: &dyn CandidateMatcher,
        retokenizer: &mut R,
    ) -> Result<Vec<Option<Segmentation>>>
    where
        T: AsRef<str>,
        R: Retokenizer,
    {
        let mut results = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            let mut segmentation = None;
            for key in matcher.candidate_keys(token) {
                // A token segmented once in this pass is never reprocessed,
                // even if another group's trigger matches it.
                if let Some(result) = self.apply_group(token, key, segmentation.is_some()) {
                    retokenizer.retokenize(index, &result)?;
                    segmentation = Some(result);
                }
            }
            results.push(segmentation);
        }
        Ok(results)
    }

    fn try_rules(&self, token: &str, rules: &[AffixRule]) -> Option<Segmentation> {
        rules.iter().find_map(|rule| self.apply_rule(token, rule))
    }

    fn apply_rule(&self, token: &str, rule: &AffixRule) -> Option<Segmentation> {
        // The pre-filter is allowed to over-approximate; re-validate.
        if !rule.pattern.is_match(token) {
            return None;
        }

        let form = token.to_lowercase();
        if !rule.always_apply
            && self
                .lexicon
                .find_reading(&form, &rule.pos_constraint)
                .is_some()
        {
            // The whole token is already an acceptable reading; splitting
            // it would over-segment.
            debug!("rule {}: `{token}` is already a valid reading", rule.key);
            return None;
        }

        let remainder = rule.pattern.replace(token, "").into_owned();
        if remainder.is_empty() || remainder == token {
            return None;
        }

        for add in &rule.affix_add {
            let stem = normalize::transform_stem(&remainder, rule.kind, add, rule.strip_accent);
            if stem.is_empty() {
                continue;
            }
            let stem_lower = stem.to_lowercase();
            let Some(entry) = self.lexicon.find_reading(&stem_lower, &rule.pos_constraint)
            else {
                continue;
            };

            let (pos, tag) = match &rule.assign_pos {
                Some(code) => {
                    let decoded = eagles::decode(code);
                    (decoded.pos, decoded.feature_string())
                }
                None => (entry.ud, entry.tags.clone()),
            };

            let lemma = if self.config.replace_lemma {
                let affix_joined = rule.affix_text.concat();
                match (&rule.assign_lemma, rule.kind) {
                    (Some(template), _) => Some(template.resolve(&LemmaContext {
                        stem: &stem_lower,
                        affix: &affix_joined,
                        lemma: &entry.lemma,
                        form: &form,
                    })),
                    (None, AffixKind::Suffix) => Some(entry.lemma.clone()),
                    (None, AffixKind::Prefix) => None,
                }
            } else {
                None
            };

            let affix_count = if rule.affix_text.is_empty() {
                usize::from(!add.is_empty())
            } else {
                rule.affix_text.len()
            };

            let (pieces, heads) = build_pieces(rule, &remainder);
            let should_split = pieces.len() > 1 && self.config.split_on.matches(pos);

            debug!(
                "rule {}: `{token}` -> stem `{stem_lower}` ({}), split={should_split}",
                rule.key, entry.eagle
            );
            return Some(Segmentation {
                rule_key: rule.key.clone(),
                kind: rule.kind,
                should_split,
                pieces,
                heads,
                pos,
                tag,
                lemma,
                matched_stem: stem,
                affix_count,
            });
        }
        None
    }
}

/// Output pieces in surface order with head offsets: the stem is
/// self-headed and every affix piece chains toward it.
fn build_pieces(rule: &AffixRule, remainder: &str) -> (Vec<String>, Vec<i32>) {
    match rule.kind {
        AffixKind::Suffix => {
            let mut pieces = Vec::with_capacity(1 + rule.affix_text.len());
            pieces.push(remainder.to_string());
            pieces.extend(rule.affix_text.iter().cloned());
            let mut heads = vec![0];
            heads.resize(pieces.len(), 1);
            (pieces, heads)
        }
        AffixKind::Prefix => {
            let mut pieces: Vec<String> = rule.affix_text.clone();
            pieces.push(remainder.to_string());
            let mut heads = vec![-1; rule.affix_text.len()];
            heads.push(0);
            (pieces, heads)
        }
    }
}
