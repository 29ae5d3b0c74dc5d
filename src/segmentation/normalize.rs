//! Accent stripping and stem transformation.
//!
//! Residual stems often carry a prosodic accent that the lexicon form lacks
//! (`cuénta` from `cuéntamelo` vs. lexicon `cuenta`). Rules that request it
//! get NFD-based accent stripping; the tilde of `ñ` is a letter distinction
//! in Spanish, not an accent, and always survives.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::segmentation::models::AffixKind;

/// Stems that keep their accent even when the matched rule asks for
/// stripping. These are lexicon forms that are themselves accented
/// (`comúnmente` must verify against `común`, not `comun`).
pub const ACCENT_STRIP_EXCEPTIONS: &[&str] = &["común", "cortés"];

const COMBINING_TILDE: char = '\u{0303}';

/// Remove combining accent marks, preserving the tilde (`ñ`/`Ñ`).
pub fn strip_accents(text: &str) -> String {
    text.nfd()
        .filter(|&c| !is_combining_mark(c) || c == COMBINING_TILDE)
        .nfc()
        .collect()
}

/// Whether a stem is exempt from accent stripping.
pub fn is_accent_exception(stem: &str) -> bool {
    let lower = stem.to_lowercase();
    ACCENT_STRIP_EXCEPTIONS.iter().any(|e| *e == lower)
}

/// Produce the candidate lexicon form for a residual stem: optionally strip
/// accents, then attach the `affix_add` candidate on the rule's side.
pub fn transform_stem(stem: &str, kind: AffixKind, add: &str, strip_accent: bool) -> String {
    let base = if strip_accent && !is_accent_exception(stem) {
        strip_accents(stem)
    } else {
        stem.to_string()
    };
    if add.is_empty() {
        return base;
    }
    match kind {
        AffixKind::Prefix => format!("{add}{base}"),
        AffixKind::Suffix => format!("{base}{add}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_accents_removes_acutes() {
        assert_eq!(strip_accents("cuénta"), "cuenta");
        assert_eq!(strip_accents("dámelo"), "damelo");
        assert_eq!(strip_accents("automática"), "automatica");
    }

    #[test]
    fn test_strip_accents_preserves_tilde() {
        assert_eq!(strip_accents("año"), "año");
        assert_eq!(strip_accents("añádase"), "añadase");
        assert_eq!(strip_accents("ÑOÑO"), "ÑOÑO");
    }

    #[test]
    fn test_strip_accents_plain_text_unchanged() {
        assert_eq!(strip_accents("cantando"), "cantando");
        assert_eq!(strip_accents(""), "");
    }

    #[test]
    fn test_accent_exceptions_survive_stripping() {
        assert!(is_accent_exception("común"));
        assert!(is_accent_exception("Común"));
        assert!(!is_accent_exception("automática"));
        assert_eq!(
            transform_stem("común", AffixKind::Suffix, "", true),
            "común"
        );
    }

    #[test]
    fn test_transform_appends_candidate_by_kind() {
        assert_eq!(
            transform_stem("gat", AffixKind::Suffix, "o", false),
            "gato"
        );
        assert_eq!(
            transform_stem("tabaco", AffixKind::Prefix, "x", false),
            "xtabaco"
        );
    }

    #[test]
    fn test_transform_strips_then_attaches() {
        assert_eq!(
            transform_stem("cuénta", AffixKind::Suffix, "r", true),
            "cuentar"
        );
        assert_eq!(transform_stem("dí", AffixKind::Suffix, "", true), "di");
    }
}
