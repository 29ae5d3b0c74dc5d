//! Affix rule records and the compiled rule table.
//!
//! Rules arrive as collaborator-supplied records, get validated and
//! compiled here, and are grouped under a key derived from the affix side
//! and the trigger substring (`suffix_melo`). A group may own several
//! rules; their record order is the order the engine tries them in.
//! Malformed records are rejected at construction and never reach the
//! engine.

use std::collections::HashMap;

use anyhow::{Context, Result, bail, ensure};
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::segmentation::lemma::LemmaTemplate;
use crate::segmentation::models::AffixKind;

/// One affix rule as supplied by a collaborator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AffixRuleRecord {
    /// Trigger substring (a regex fragment). Leading `^` / trailing `$`
    /// anchors from pre-anchored interchange data are accepted and
    /// stripped; the table re-anchors by kind.
    pub pattern: String,
    /// `"prefix"` or `"suffix"`.
    pub kind: String,
    /// Regex over EAGLES codes that acceptable lexicon readings must match.
    #[serde(alias = "pos_re")]
    pub pos_constraint: String,
    /// Optional EAGLES code overriding the matched reading's tag.
    #[serde(default)]
    pub assign_pos: Option<String>,
    /// Strip accents from the residual stem before lexicon lookup.
    #[serde(default)]
    pub strip_accent: bool,
    /// Optional lemma template (`R`/`A`/`L`/`F` directives).
    #[serde(default)]
    pub assign_lemma: Option<String>,
    /// Apply even when the whole token already has an acceptable reading.
    #[serde(default)]
    pub always_apply: bool,
    /// Candidate strings attached to the stem before lookup; `""` (or the
    /// interchange spelling `"*"`) means "try the stem unmodified".
    #[serde(default)]
    pub affix_add: Vec<String>,
    /// Literal texts of the split-off affix tokens.
    #[serde(default)]
    pub affix_text: Vec<String>,
}

/// A validated, compiled affix rule.
#[derive(Debug, Clone)]
pub struct AffixRule {
    /// Group key: `"{kind}_{trigger}"`.
    pub key: String,
    /// Raw trigger substring, without anchors.
    pub trigger: String,
    /// Anchored, case-insensitive trigger regex.
    pub pattern: Regex,
    pub kind: AffixKind,
    /// Start-anchored, case-insensitive EAGLES-code constraint.
    pub pos_constraint: Regex,
    pub assign_pos: Option<String>,
    pub strip_accent: bool,
    pub assign_lemma: Option<LemmaTemplate>,
    pub always_apply: bool,
    pub affix_add: Vec<String>,
    pub affix_text: Vec<String>,
}

impl AffixRule {
    /// Validate and compile one record.
    pub fn from_record(record: AffixRuleRecord) -> Result<Self> {
        let Ok(kind) = record.kind.parse::<AffixKind>() else {
            bail!("unknown affix kind `{}`", record.kind);
        };
        let trigger = record
            .pattern
            .trim_start_matches('^')
            .trim_end_matches('$')
            .to_string();
        ensure!(!trigger.is_empty(), "affix rule has an empty trigger");

        let anchored = match kind {
            AffixKind::Suffix => format!("(?i)({trigger})$"),
            AffixKind::Prefix => format!("(?i)^({trigger})"),
        };
        let pattern = Regex::new(&anchored)
            .with_context(|| format!("invalid trigger pattern `{}`", record.pattern))?;
        let pos_constraint = Regex::new(&format!("(?i)^(?:{})", record.pos_constraint))
            .with_context(|| format!("invalid POS constraint `{}`", record.pos_constraint))?;

        // No candidates means "try the bare stem".
        let mut affix_add: Vec<String> = record
            .affix_add
            .into_iter()
            .map(|add| if add == "*" { String::new() } else { add })
            .collect();
        if affix_add.is_empty() {
            affix_add.push(String::new());
        }

        Ok(AffixRule {
            key: format!("{kind}_{trigger}"),
            trigger,
            pattern,
            kind,
            pos_constraint,
            assign_pos: record.assign_pos,
            strip_accent: record.strip_accent,
            assign_lemma: record.assign_lemma.as_deref().map(LemmaTemplate::parse),
            always_apply: record.always_apply,
            affix_add,
            affix_text: record.affix_text,
        })
    }
}

/// Rules sharing a trigger key, in record order.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub key: String,
    pub rules: Vec<AffixRule>,
}

/// The compiled, read-only affix rule table.
///
/// Groups keep the order their first rule appeared in; lookups by key are
/// constant-time.
#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    groups: Vec<RuleGroup>,
    by_key: HashMap<String, usize>,
    rule_count: usize,
}

impl RuleSet {
    /// Validate, compile, and group a sequence of records.
    pub fn from_records(records: impl IntoIterator<Item = AffixRuleRecord>) -> Result<Self> {
        let mut set = RuleSet::default();
        for (index, record) in records.into_iter().enumerate() {
            let rule = AffixRule::from_record(record)
                .with_context(|| format!("affix rule record {index} is malformed"))?;
            set.push(rule);
        }
        info!(
            "compiled {} affix rules in {} groups",
            set.rule_count,
            set.groups.len()
        );
        Ok(set)
    }

    /// Parse the key-grouped JSON interchange format:
    /// `{"suffix_melo": [{…rule…}, …], …}`. Group order follows the
    /// document; keys are re-derived from the records themselves.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).context("malformed affix rule JSON")?;
        let mut records = Vec::new();
        for (key, value) in parsed {
            let group: Vec<AffixRuleRecord> = serde_json::from_value(value)
                .with_context(|| format!("malformed rules under key `{key}`"))?;
            records.extend(group);
        }
        Self::from_records(records)
    }

    fn push(&mut self, rule: AffixRule) {
        match self.by_key.get(&rule.key) {
            Some(&index) => self.groups[index].rules.push(rule),
            None => {
                self.by_key.insert(rule.key.clone(), self.groups.len());
                self.groups.push(RuleGroup {
                    key: rule.key.clone(),
                    rules: vec![rule],
                });
            }
        }
        self.rule_count += 1;
    }

    /// Rules for one group key, in record order.
    pub fn get(&self, key: &str) -> Option<&[AffixRule]> {
        self.by_key
            .get(key)
            .map(|&index| self.groups[index].rules.as_slice())
    }

    /// All groups, in table order.
    pub fn groups(&self) -> impl Iterator<Item = &RuleGroup> {
        self.groups.iter()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }
}
