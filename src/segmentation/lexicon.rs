//! Word-form lexicon index.
//!
//! Maps a word form to its readings: one or more (EAGLES code, UD POS,
//! feature string, lemma) entries. The index is built once from
//! collaborator-supplied records and is read-only afterwards, so shared
//! references are safe across threads without locking.

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::eagles::{self, UdPos};

/// One lexicon record as supplied by a collaborator.
///
/// `ud` and `tags` are optional: when absent they are derived from decoding
/// the EAGLES code.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LexiconRecord {
    pub word: String,
    pub lemma: String,
    pub eagle: String,
    #[serde(default)]
    pub ud: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

/// One reading of a word form, validated and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub lemma: String,
    pub eagle: String,
    pub ud: UdPos,
    pub tags: String,
}

/// JSON body of one reading in the word-keyed interchange format.
#[derive(Debug, Deserialize)]
struct EntryRecord {
    lemma: String,
    eagle: String,
    #[serde(default)]
    ud: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

/// Read-only word-form index.
///
/// Entry order per word is preserved from construction: lookups under a POS
/// constraint return the first acceptable reading deterministically.
#[derive(Debug, Default, Clone)]
pub struct Lexicon {
    entries: HashMap<String, Vec<LexiconEntry>>,
    entry_count: usize,
}

impl Lexicon {
    /// Build an index from flat records.
    pub fn from_records(records: impl IntoIterator<Item = LexiconRecord>) -> Self {
        let mut lexicon = Lexicon::default();
        for record in records {
            lexicon.push(record.word, record.lemma, record.eagle, record.ud, record.tags);
        }
        info!(
            "indexed {} readings across {} word forms",
            lexicon.entry_count,
            lexicon.entries.len()
        );
        lexicon
    }

    /// Parse the word-keyed JSON interchange format:
    /// `{"word": [{"lemma": …, "eagle": …, "ud": …, "tags": …}, …], …}`.
    ///
    /// The input is a string; acquiring it (file, cache, download) is the
    /// collaborator's job.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: HashMap<String, Vec<EntryRecord>> =
            serde_json::from_str(json).context("malformed lexicon JSON")?;
        let mut lexicon = Lexicon::default();
        for (word, readings) in parsed {
            for reading in readings {
                lexicon.push(
                    word.clone(),
                    reading.lemma,
                    reading.eagle,
                    reading.ud,
                    reading.tags,
                );
            }
        }
        info!(
            "indexed {} readings across {} word forms",
            lexicon.entry_count,
            lexicon.entries.len()
        );
        Ok(lexicon)
    }

    fn push(
        &mut self,
        word: String,
        lemma: String,
        eagle: String,
        ud: Option<String>,
        tags: Option<String>,
    ) {
        // Derive missing fields from the EAGLES code. The full decoder is
        // used so auxiliary and proper-noun codes derive their promoted POS.
        let decoded = eagles::decode(&eagle);
        let ud = ud
            .as_deref()
            .map(|s| s.parse::<UdPos>().unwrap_or(UdPos::X))
            .unwrap_or(decoded.pos);
        let tags = tags.unwrap_or_else(|| {
            if decoded.is_unknown() {
                String::new()
            } else {
                decoded.feature_string()
            }
        });
        self.entries.entry(word).or_default().push(LexiconEntry {
            lemma,
            eagle,
            ud,
            tags,
        });
        self.entry_count += 1;
    }

    /// All readings for a word form, in construction order.
    pub fn lookup(&self, word: &str) -> Option<&[LexiconEntry]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// First reading whose EAGLES code satisfies the POS constraint.
    pub fn find_reading(&self, word: &str, constraint: &Regex) -> Option<&LexiconEntry> {
        self.entries
            .get(word)?
            .iter()
            .find(|entry| constraint.is_match(&entry.eagle))
    }

    /// Number of distinct word forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of readings.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}
