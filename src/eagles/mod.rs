//! EAGLES to Universal Dependencies tag decoding.
//!
//! EAGLES codes are short positional strings: the first character selects a
//! coarse category and every following character position encodes one
//! morphological feature according to a category-specific schema. This
//! module decodes such codes into a UD coarse part-of-speech plus an
//! ordered set of `Name=Value` features.
//!
//! Decoding is total: any input, including the empty string and codes with
//! an unknown category character, produces a result. Unknown categories map
//! to the `X__X` sentinel, which is distinct from a known category that
//! decodes to zero features (`"{POS}__"`).

pub mod tables;

use serde::Serialize;
use strum::{Display, EnumString};

use self::tables::{Category, Feature};

/// Rendered sentinel for codes whose category character is unrecognized.
pub const UNKNOWN_TAG: &str = "X__X";

/// Separator between the coarse POS and the feature string in rendered tags.
const TAG_SEPARATOR: &str = "__";

/// Universal Dependencies coarse part-of-speech.
///
/// `Conj` is the legacy undifferentiated conjunction tag kept for codes that
/// carry no coordinating/subordinating marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UdPos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Conj,
    Det,
    Intj,
    Noun,
    Num,
    Pron,
    Propn,
    Punct,
    Sconj,
    Verb,
    X,
}

/// Result of decoding one EAGLES code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTag {
    /// UD coarse part-of-speech (after any reclassification).
    pub pos: UdPos,
    /// `Name=Value` pairs, sorted lexicographically.
    ///
    /// For the unknown-category sentinel this holds the single literal `X`.
    pub features: Vec<String>,
}

impl DecodedTag {
    /// The sentinel returned for unrecognized category characters.
    pub fn unknown() -> Self {
        DecodedTag {
            pos: UdPos::X,
            features: vec!["X".to_string()],
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.pos == UdPos::X && self.features.len() == 1 && self.features[0] == "X"
    }

    /// Pipe-joined feature string (empty for a feature-less decode).
    pub fn feature_string(&self) -> String {
        self.features.join("|")
    }

    /// Full tag rendering: `"{POS}__{features}"`.
    pub fn tag_string(&self) -> String {
        format!("{}{}{}", self.pos, TAG_SEPARATOR, self.feature_string())
    }
}

/// Decode an EAGLES code into a UD POS and sorted morphological features.
///
/// Never fails. Unknown categories return [`DecodedTag::unknown`]; every
/// other irregularity (short codes, overlong codes, undefined position
/// characters) degrades to fewer features, not an error.
pub fn decode(code: &str) -> DecodedTag {
    let Some(category) = code.chars().next().and_then(Category::from_code_char) else {
        return DecodedTag::unknown();
    };

    // Preposition contractions carry a `+` infix joining two codes. Outside
    // the verb category that marks the fused form itself; the check runs
    // before the trailing qualifier is stripped.
    if category != Category::Verb && code.contains('+') {
        return DecodedTag {
            pos: UdPos::Adp,
            features: vec!["AdpType=Preppron".to_string()],
        };
    }

    // Verb codes may carry a `+`-separated qualifier; decode the base code.
    let code = code.split('+').next().unwrap_or(code);

    if category == Category::Punctuation {
        let features = match tables::punctuation_features(code) {
            Some(joined) if !joined.is_empty() => {
                joined.split('|').map(str::to_string).collect()
            }
            // Registered as feature-less, or not registered at all: either
            // way the POS stands and the feature set is empty.
            _ => Vec::new(),
        };
        return DecodedTag {
            pos: UdPos::Punct,
            features,
        };
    }

    let mut pos = category.ud_pos();
    let slots = category.slots();
    if slots.is_empty() {
        // Interjections and numerals: bare POS.
        return DecodedTag {
            pos,
            features: Vec::new(),
        };
    }

    let chars: Vec<char> = code.chars().collect();
    if let Some(&second) = chars.get(1) {
        if let Some(promoted) = tables::reclassify(category, second) {
            pos = promoted;
        }
    }

    let mut features = Vec::new();
    for (position, &ch) in chars.iter().enumerate().skip(1) {
        let Some(candidates) = slots.get(position - 1) else {
            break;
        };
        for &feature in *candidates {
            let Some(value) = feature.value(ch) else {
                continue;
            };
            features.push(format!("{}={}", feature.name(), value));
            emit_implied_features(feature, value, &mut features);
            break;
        }
    }

    features.sort();
    DecodedTag { pos, features }
}

/// Derivation side-effects: some feature values imply an additional feature.
fn emit_implied_features(feature: Feature, value: &str, features: &mut Vec<String>) {
    match feature {
        // Any resolved mood except the conditional marks a finite form.
        Feature::Mood if value != "Cnd" => features.push("VerbForm=Fin".to_string()),
        Feature::PronType if value == "Ind" => features.push("Definite=Ind".to_string()),
        Feature::PronType if value == "Art" => features.push("Definite=Def".to_string()),
        // A possessor number can only appear on possessives.
        Feature::NumberPsor => features.push("Poss=Yes".to_string()),
        _ => {}
    }
}
