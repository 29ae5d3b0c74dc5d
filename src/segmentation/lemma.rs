//! Lemma-assignment template language.
//!
//! A template is a `+`-separated sequence of tokens. Single-character
//! tokens `R`, `A`, `L`, and `F` are directives; every other token is a
//! literal emitted verbatim. Resolution is plain left-to-right
//! concatenation with no recursion or escaping.

/// One resolved piece of a lemma template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LemmaPiece {
    /// `R`: the transformed stem that matched the lexicon.
    Stem,
    /// `A`: the rule's literal affix text pieces, concatenated.
    Affix,
    /// `L`: the lemma of the matched lexicon entry.
    Lemma,
    /// `F`: the lower-cased original token text.
    Form,
    /// Anything else, emitted as-is.
    Literal(String),
}

/// Substitution variables available during resolution.
#[derive(Debug, Clone, Copy)]
pub struct LemmaContext<'a> {
    pub stem: &'a str,
    pub affix: &'a str,
    pub lemma: &'a str,
    pub form: &'a str,
}

/// A parsed lemma-assignment template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaTemplate {
    pieces: Vec<LemmaPiece>,
}

impl LemmaTemplate {
    /// Parse a template specification. Unknown single characters and
    /// multi-character tokens are literals; empty tokens are dropped.
    pub fn parse(template: &str) -> Self {
        let pieces = template
            .split('+')
            .filter(|token| !token.is_empty())
            .map(|token| match token {
                "R" => LemmaPiece::Stem,
                "A" => LemmaPiece::Affix,
                "L" => LemmaPiece::Lemma,
                "F" => LemmaPiece::Form,
                other => LemmaPiece::Literal(other.to_string()),
            })
            .collect();
        LemmaTemplate { pieces }
    }

    pub fn pieces(&self) -> &[LemmaPiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Resolve the template against the given substitution variables.
    pub fn resolve(&self, ctx: &LemmaContext<'_>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            out.push_str(match piece {
                LemmaPiece::Stem => ctx.stem,
                LemmaPiece::Affix => ctx.affix,
                LemmaPiece::Lemma => ctx.lemma,
                LemmaPiece::Form => ctx.form,
                LemmaPiece::Literal(text) => text,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: LemmaContext<'_> = LemmaContext {
        stem: "rapida",
        affix: "mente",
        lemma: "rápido",
        form: "rapidamente",
    };

    #[test]
    fn test_parse_directives() {
        let template = LemmaTemplate::parse("R+A");
        assert_eq!(
            template.pieces(),
            &[LemmaPiece::Stem, LemmaPiece::Affix]
        );
    }

    #[test]
    fn test_resolve_directives() {
        assert_eq!(LemmaTemplate::parse("L").resolve(&CTX), "rápido");
        assert_eq!(LemmaTemplate::parse("R+A").resolve(&CTX), "rapidamente");
        assert_eq!(LemmaTemplate::parse("F").resolve(&CTX), "rapidamente");
    }

    #[test]
    fn test_unknown_single_char_is_literal() {
        assert_eq!(LemmaTemplate::parse("R+x+L").resolve(&CTX), "rapidaxrápido");
    }

    #[test]
    fn test_multichar_tokens_are_literals() {
        // "RA" is not the two directives R and A.
        assert_eq!(LemmaTemplate::parse("RA").resolve(&CTX), "RA");
        assert_eq!(
            LemmaTemplate::parse("L+mente").resolve(&CTX),
            "rápidomente"
        );
    }

    #[test]
    fn test_empty_tokens_dropped() {
        let template = LemmaTemplate::parse("+R++L+");
        assert_eq!(template.pieces().len(), 2);
        assert_eq!(template.resolve(&CTX), "rapidarápido");
        assert!(LemmaTemplate::parse("").is_empty());
    }
}
