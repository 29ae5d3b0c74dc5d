//! Static EAGLES tag tables.
//!
//! This module holds the fixed dictionaries that drive positional tag
//! decoding: the coarse category table, the per-category feature-slot
//! schemas, the code-character to feature-value tables, the punctuation
//! code table, and the category reclassification pairs. Everything here is
//! immutable process-wide data; decoding logic lives in the parent module.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::eagles::UdPos;

/// Coarse EAGLES category, encoded as the first character of a tag code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Adjective,    // A
    Adverb,       // R
    Conjunction,  // C
    Determiner,   // D
    Interjection, // I
    Noun,         // N
    Numeral,      // Z
    Adposition,   // S
    Pronoun,      // P
    Punctuation,  // F
    Verb,         // V
}

impl Category {
    /// Resolve a category from the leading character of a tag code.
    pub fn from_code_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Category::Adjective),
            'R' => Some(Category::Adverb),
            'C' => Some(Category::Conjunction),
            'D' => Some(Category::Determiner),
            'I' => Some(Category::Interjection),
            'N' => Some(Category::Noun),
            'Z' => Some(Category::Numeral),
            'S' => Some(Category::Adposition),
            'P' => Some(Category::Pronoun),
            'F' => Some(Category::Punctuation),
            'V' => Some(Category::Verb),
            _ => None,
        }
    }

    /// The UD coarse part-of-speech this category maps to before any
    /// reclassification applies.
    pub fn ud_pos(self) -> UdPos {
        match self {
            Category::Adjective => UdPos::Adj,
            Category::Adverb => UdPos::Adv,
            Category::Conjunction => UdPos::Conj,
            Category::Determiner => UdPos::Det,
            Category::Interjection => UdPos::Intj,
            Category::Noun => UdPos::Noun,
            Category::Numeral => UdPos::Num,
            Category::Adposition => UdPos::Adp,
            Category::Pronoun => UdPos::Pron,
            Category::Punctuation => UdPos::Punct,
            Category::Verb => UdPos::Verb,
        }
    }

    /// Positional feature-slot schema for this category.
    ///
    /// Entry `i` covers character position `i + 1` of the tag code (position
    /// zero is the category itself). Each entry lists candidate features in
    /// priority order: the first candidate with a defined value for the code
    /// character wins. An empty entry means the position carries no feature
    /// (either reserved, or consumed by reclassification).
    pub fn slots(self) -> &'static [&'static [Feature]] {
        use Feature::*;
        match self {
            Category::Adjective => &[
                &[NumType, Poss],
                &[Degree, NumType],
                &[Gender],
                &[Number],
                &[Person],
                &[NumberPsor],
            ],
            Category::Adverb => &[&[PronType]],
            Category::Determiner => &[
                &[PronType],
                &[Person],
                &[Gender],
                &[Number],
                &[NumberPsor],
                &[],
            ],
            Category::Noun => &[&[], &[Gender], &[Number], &[NameType], &[], &[]],
            Category::Pronoun => &[
                &[PronType],
                &[Person],
                &[Gender],
                &[Number],
                &[Case, PrepCase],
                &[Polite],
            ],
            Category::Conjunction => &[&[]],
            Category::Adposition => &[&[AdpType]],
            Category::Verb => &[
                &[],
                &[Mood, VerbForm],
                &[Tense, Mood],
                &[Person],
                &[Number],
                &[Gender],
            ],
            // Interjections and numerals carry the bare POS; punctuation
            // bypasses positional decoding entirely.
            Category::Interjection | Category::Numeral | Category::Punctuation => &[],
        }
    }
}

/// Morphological feature names used by the positional schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    AdpType,
    Case,
    Degree,
    Gender,
    Mood,
    NameType,
    NumType,
    Number,
    NumberPsor,
    Person,
    Polite,
    Poss,
    PrepCase,
    PronType,
    Tense,
    VerbForm,
}

impl Feature {
    /// The UD feature name as it appears in emitted `Name=Value` pairs.
    pub fn name(self) -> &'static str {
        match self {
            Feature::AdpType => "AdpType",
            Feature::Case => "Case",
            Feature::Degree => "Degree",
            Feature::Gender => "Gender",
            Feature::Mood => "Mood",
            Feature::NameType => "NameType",
            Feature::NumType => "NumType",
            Feature::Number => "Number",
            Feature::NumberPsor => "Number[psor]",
            Feature::Person => "Person",
            Feature::Polite => "Polite",
            Feature::Poss => "Poss",
            Feature::PrepCase => "PrepCase",
            Feature::PronType => "PronType",
            Feature::Tense => "Tense",
            Feature::VerbForm => "VerbForm",
        }
    }

    /// The feature value encoded by `code`, if this feature defines one.
    pub fn value(self, code: char) -> Option<&'static str> {
        match self {
            Feature::AdpType => match code {
                'P' => Some("Prep"),
                _ => None,
            },
            Feature::Case => match code {
                'A' => Some("Acc"),
                'D' => Some("Dat"),
                'N' => Some("Nom"),
                _ => None,
            },
            Feature::Degree => match code {
                'S' => Some("Sup"),
                'V' => Some("Pos"),
                _ => None,
            },
            Feature::Gender => match code {
                'F' => Some("Fem"),
                'M' => Some("Masc"),
                _ => None,
            },
            Feature::Mood => match code {
                'C' => Some("Cnd"),
                'I' => Some("Ind"),
                'M' => Some("Imp"), // imperativo
                'S' => Some("Sub"),
                _ => None,
            },
            Feature::NameType => match code {
                'G' => Some("Geo"),
                'O' => Some("Com"),
                'S' => Some("Prs"),
                'V' => Some("Oth"),
                _ => None,
            },
            Feature::NumType => match code {
                'O' => Some("Ord"),
                'p' => Some("Frac"),
                _ => None,
            },
            Feature::Number | Feature::NumberPsor => match code {
                'P' => Some("Plur"),
                'S' => Some("Sing"),
                _ => None,
            },
            Feature::Person => match code {
                '1' => Some("1"),
                '2' => Some("2"),
                '3' => Some("3"),
                _ => None,
            },
            Feature::Polite => match code {
                'P' => Some("Form"),
                _ => None,
            },
            Feature::Poss => match code {
                'P' => Some("Yes"),
                _ => None,
            },
            Feature::PrepCase => match code {
                'O' => Some("Pre"),
                _ => None,
            },
            Feature::PronType => match code {
                'A' => Some("Art"),
                'D' => Some("Dem"),
                'E' => Some("Exc"),
                'I' => Some("Ind"),
                'N' => Some("Neg"),
                'P' => Some("Prs"),
                'R' => Some("Rel"),
                'T' => Some("Int"),
                _ => None,
            },
            Feature::Tense => match code {
                'F' => Some("Fut"),
                'I' => Some("Imp"), // imperfecto
                'P' => Some("Pres"),
                'S' => Some("Past"),
                _ => None,
            },
            Feature::VerbForm => match code {
                'G' => Some("Ger"),
                'N' => Some("Inf"),
                'P' => Some("Part"),
                _ => None,
            },
        }
    }
}

/// Category reclassification: certain second-position characters promote the
/// coarse UD POS before positional decoding.
pub fn reclassify(category: Category, second: char) -> Option<UdPos> {
    match (category, second) {
        (Category::Verb, 'A' | 'S') => Some(UdPos::Aux),
        (Category::Conjunction, 'C') => Some(UdPos::Cconj),
        (Category::Conjunction, 'S') => Some(UdPos::Sconj),
        (Category::Noun, 'P') => Some(UdPos::Propn),
        _ => None,
    }
}

/// Punctuation code table: the full code maps directly to a pre-joined
/// feature string, bypassing the positional schema.
static PUNCTUATION_TAGS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Fd", "PunctType=Colo"),
        ("Fc", "PunctType=Comm"),
        ("Fs", ""),
        ("Faa", "PunctSide=Ini|PunctType=Excl"),
        ("Fat", "PunctSide=Fin|PunctType=Excl"),
        ("Fg", "PunctType=Dash"),
        ("Fz", ""),
        ("Ft", ""),
        ("Fp", "PunctType=Peri"),
        ("Fia", "PunctSide=Ini|PunctType=Qest"),
        ("Fit", "PunctSide=Fin|PunctType=Qest"),
        ("Fe", "PunctType=Quot"),
        ("Fra", "PunctSide=Ini|PunctType=Quot"),
        ("Frc", "PunctSide=Fin|PunctType=Quot"),
        ("Fx", "PunctType=Semi"),
        ("Fh", ""),
        ("Fpa", "PunctSide=Ini|PunctType=Brck"),
        ("Fpt", "PunctSide=Fin|PunctType=Brck"),
        ("Fca", "PunctSide=Ini|PunctType=Brck"),
        ("Fct", "PunctSide=Fin|PunctType=Brck"),
        ("Fla", "PunctSide=Ini|PunctType=Brck"),
        ("Flt", "PunctSide=Fin|PunctType=Brck"),
    ])
});

/// Look up the registered feature string for a punctuation code.
pub fn punctuation_features(code: &str) -> Option<&'static str> {
    PUNCTUATION_TAGS.get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for (c, pos) in [
            ('A', UdPos::Adj),
            ('R', UdPos::Adv),
            ('C', UdPos::Conj),
            ('D', UdPos::Det),
            ('N', UdPos::Noun),
            ('V', UdPos::Verb),
            ('P', UdPos::Pron),
            ('S', UdPos::Adp),
            ('F', UdPos::Punct),
            ('I', UdPos::Intj),
            ('Z', UdPos::Num),
        ] {
            let category = Category::from_code_char(c).expect("known category");
            assert_eq!(category.ud_pos(), pos);
        }
        assert!(Category::from_code_char('W').is_none());
        assert!(Category::from_code_char('x').is_none());
    }

    #[test]
    fn test_first_candidate_priority() {
        // Position 2 of adjectives tries Degree before NumType; 'S' is only
        // defined for Degree, 'O' only for NumType.
        assert_eq!(Feature::Degree.value('S'), Some("Sup"));
        assert_eq!(Feature::NumType.value('S'), None);
        assert_eq!(Feature::Degree.value('O'), None);
        assert_eq!(Feature::NumType.value('O'), Some("Ord"));
    }

    #[test]
    fn test_numtype_fraction_is_lowercase() {
        assert_eq!(Feature::NumType.value('p'), Some("Frac"));
        assert_eq!(Feature::NumType.value('P'), None);
    }

    #[test]
    fn test_punctuation_lookup() {
        assert_eq!(punctuation_features("Fc"), Some("PunctType=Comm"));
        assert_eq!(punctuation_features("Fs"), Some(""));
        assert_eq!(punctuation_features("Fq"), None);
    }

    #[test]
    fn test_reclassification_pairs() {
        assert_eq!(reclassify(Category::Verb, 'A'), Some(UdPos::Aux));
        assert_eq!(reclassify(Category::Verb, 'S'), Some(UdPos::Aux));
        assert_eq!(reclassify(Category::Verb, 'M'), None);
        assert_eq!(reclassify(Category::Conjunction, 'C'), Some(UdPos::Cconj));
        assert_eq!(reclassify(Category::Conjunction, 'S'), Some(UdPos::Sconj));
        assert_eq!(reclassify(Category::Noun, 'P'), Some(UdPos::Propn));
        assert_eq!(reclassify(Category::Noun, 'C'), None);
    }
}
