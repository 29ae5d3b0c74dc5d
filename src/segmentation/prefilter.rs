//! Candidate pre-filtering for affix rule groups.
//!
//! Before the engine runs full rule application, the host narrows each
//! token down to the rule groups whose trigger could match. That check is a
//! capability behind [`CandidateMatcher`], so a per-group regex scan and a
//! single multi-pattern automaton are interchangeable. The engine
//! re-validates the full trigger pattern on application either way, so a
//! pre-filter may over-approximate but must never under-approximate.

use aho_corasick::AhoCorasick;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::segmentation::models::AffixKind;
use crate::segmentation::rules::RuleSet;

/// Pattern-matcher capability: which rule groups could apply to a token.
pub trait CandidateMatcher: Send + Sync {
    /// Keys of candidate rule groups, in rule-table order.
    fn candidate_keys(&self, token: &str) -> Vec<&str>;
}

/// Per-group compiled-regex pre-filter.
#[derive(Debug)]
pub struct RegexPrefilter {
    entries: Vec<(String, Regex)>,
}

impl RegexPrefilter {
    pub fn new(rules: &RuleSet) -> Self {
        // All rules in a group share the trigger, so the first rule's
        // compiled pattern covers the whole group.
        let entries = rules
            .groups()
            .map(|group| (group.key.clone(), group.rules[0].pattern.clone()))
            .collect();
        RegexPrefilter { entries }
    }
}

impl CandidateMatcher for RegexPrefilter {
    fn candidate_keys(&self, token: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, pattern)| pattern.is_match(token))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

/// Matches trigger strings that contain regex metacharacters and therefore
/// cannot go into the literal automaton.
static NON_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\\.^$|?*+()\[\]{}]").expect("Invalid regex pattern"));

/// Automaton-based pre-filter: one Aho-Corasick pass over all literal
/// triggers, with the match span checked against the rule kind's anchor.
/// Groups with non-literal triggers fall back to their compiled regex.
pub struct AutomatonPrefilter {
    keys: Vec<String>,
    automaton: Option<AhoCorasick>,
    /// Pattern id -> (group index, kind) for automaton matches.
    literal: Vec<(usize, AffixKind)>,
    /// (group index, pattern) for triggers the automaton cannot express.
    fallback: Vec<(usize, Regex)>,
}

impl AutomatonPrefilter {
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let mut keys = Vec::new();
        let mut triggers = Vec::new();
        let mut literal = Vec::new();
        let mut fallback = Vec::new();

        for (index, group) in rules.groups().enumerate() {
            let rule = &group.rules[0];
            keys.push(group.key.clone());
            if NON_LITERAL.is_match(&rule.trigger) {
                fallback.push((index, rule.pattern.clone()));
            } else {
                triggers.push(rule.trigger.to_lowercase());
                literal.push((index, rule.kind));
            }
        }

        let automaton = if triggers.is_empty() {
            None
        } else {
            Some(AhoCorasick::new(&triggers)?)
        };

        Ok(AutomatonPrefilter {
            keys,
            automaton,
            literal,
            fallback,
        })
    }
}

impl CandidateMatcher for AutomatonPrefilter {
    fn candidate_keys(&self, token: &str) -> Vec<&str> {
        let lower = token.to_lowercase();
        let mut hits = vec![false; self.keys.len()];

        if let Some(automaton) = &self.automaton {
            for ac_match in automaton.find_overlapping_iter(&lower) {
                let (group_index, kind) = self.literal[ac_match.pattern().as_usize()];
                let anchored = match kind {
                    AffixKind::Suffix => ac_match.end() == lower.len(),
                    AffixKind::Prefix => ac_match.start() == 0,
                };
                if anchored {
                    hits[group_index] = true;
                }
            }
        }
        for (group_index, pattern) in &self.fallback {
            if pattern.is_match(token) {
                hits[*group_index] = true;
            }
        }

        hits.iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(index, _)| self.keys[index].as_str())
            .collect()
    }
}
