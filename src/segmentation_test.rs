//! End-to-end tests for affix segmentation.
//!
//! These drive the public engine API against a small fixture lexicon and
//! rule table: clitic splitting, adverbial `-mente` retagging, prefix
//! chains, the accent-exception list, and the no-op guarantees.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::eagles::UdPos;
    use crate::segmentation::lexicon::{Lexicon, LexiconRecord};
    use crate::segmentation::models::{AffixKind, Retokenizer, Segmentation};
    use crate::segmentation::prefilter::{AutomatonPrefilter, RegexPrefilter};
    use crate::segmentation::rules::{AffixRuleRecord, RuleSet};
    use crate::segmentation::{AffixEngine, EngineConfig, SplitOn};

    fn lexicon_record(word: &str, lemma: &str, eagle: &str) -> LexiconRecord {
        LexiconRecord {
            word: word.to_string(),
            lemma: lemma.to_string(),
            eagle: eagle.to_string(),
            ud: None,
            tags: None,
        }
    }

    fn rule_record(pattern: &str, kind: &str, pos: &str) -> AffixRuleRecord {
        AffixRuleRecord {
            pattern: pattern.to_string(),
            kind: kind.to_string(),
            pos_constraint: pos.to_string(),
            assign_pos: None,
            strip_accent: false,
            assign_lemma: None,
            always_apply: false,
            affix_add: vec![String::new()],
            affix_text: vec![],
        }
    }

    fn fixture_lexicon() -> Arc<Lexicon> {
        Arc::new(Lexicon::from_records([
            lexicon_record("di", "decir", "VMM02S0"),
            lexicon_record("cuenta", "contar", "VMM02S0"),
            lexicon_record("decir", "decir", "VMN0000"),
            lexicon_record("tabaco", "tabaco", "NCMS000"),
            lexicon_record("caramelo", "caramelo", "NCMS000"),
            lexicon_record("rapida", "rápido", "AQ0FS00"),
            lexicon_record("común", "común", "AQ0CS00"),
            lexicon_record("cosa", "cosa", "NCFS000"),
            lexicon_record("cosas", "cosa", "NCFP000"),
            lexicon_record("gato", "gato", "NCMS000"),
        ]))
    }

    fn fixture_rules() -> Vec<AffixRuleRecord> {
        let mut melo = rule_record("melo", "suffix", "V");
        melo.strip_accent = true;
        melo.affix_text = vec!["me".to_string(), "lo".to_string()];

        let mut me = rule_record("me", "suffix", "V");
        me.strip_accent = true;
        me.affix_text = vec!["me".to_string()];

        let mut mente = rule_record("mente", "suffix", "A");
        mente.strip_accent = true;
        mente.assign_pos = Some("RG".to_string());
        mente.affix_text = vec!["mente".to_string()];

        let mut anti = rule_record("anti", "prefix", "N");
        anti.affix_text = vec!["anti".to_string()];

        let mut plural = rule_record("s", "suffix", "N");
        plural.affix_text = vec!["s".to_string()];

        vec![melo, me, mente, anti, plural]
    }

    fn engine() -> AffixEngine {
        let rules = Arc::new(RuleSet::from_records(fixture_rules()).unwrap());
        AffixEngine::new(fixture_lexicon(), rules).unwrap()
    }

    fn engine_with_config(config: EngineConfig) -> AffixEngine {
        let rules = Arc::new(RuleSet::from_records(fixture_rules()).unwrap());
        AffixEngine::with_config(fixture_lexicon(), rules, config).unwrap()
    }

    #[derive(Default)]
    struct RecordingRetokenizer {
        calls: Vec<(usize, Segmentation)>,
    }

    impl Retokenizer for RecordingRetokenizer {
        fn retokenize(
            &mut self,
            token_index: usize,
            segmentation: &Segmentation,
        ) -> anyhow::Result<()> {
            self.calls.push((token_index, segmentation.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_clitic_split_with_default_config() {
        let seg = engine().apply("dímelo", false).expect("should segment");
        assert_eq!(seg.rule_key, "suffix_melo");
        assert_eq!(seg.kind, AffixKind::Suffix);
        assert!(seg.should_split);
        assert_eq!(seg.pieces, vec!["dí", "me", "lo"]);
        assert_eq!(seg.heads, vec![0, 1, 1]);
        // Each affix piece heads to the immediately preceding piece; the
        // stem heads itself.
        assert_eq!(seg.head_indices(), vec![0, 0, 1]);
        assert_eq!(seg.pos, UdPos::Verb);
        // Lemma comes from the lexicon entry, not the surface form.
        assert_eq!(seg.lemma.as_deref(), Some("decir"));
        assert_eq!(seg.matched_stem, "di");
        assert_eq!(seg.affix_count, 2);
    }

    #[test]
    fn test_tag_comes_from_lexicon_entry() {
        let seg = engine().apply("dímelo", false).unwrap();
        assert_eq!(seg.tag, "Mood=Imp|Number=Sing|Person=2|VerbForm=Fin");
    }

    #[test]
    fn test_failed_verification_is_a_no_op() {
        // "caramelo" matches the clitic trigger but "cara" is not a verb in
        // the lexicon: every candidate fails and the token stays untouched.
        assert!(engine().apply("caramelo", false).is_none());
    }

    #[test]
    fn test_accent_exception_stem_survives() {
        let seg = engine().apply("comúnmente", false).expect("should match");
        // The -mente rule strips accents, but `común` is on the exception
        // list; stripping it would have missed the lexicon entry entirely.
        assert_eq!(seg.matched_stem, "común");
        assert_eq!(seg.lemma.as_deref(), Some("común"));
    }

    #[test]
    fn test_adverb_retag_without_split() {
        let seg = engine().apply("rápidamente", false).expect("should match");
        // assign_pos overrides the matched adjective reading.
        assert_eq!(seg.pos, UdPos::Adv);
        assert_eq!(seg.tag, "");
        assert_eq!(seg.lemma.as_deref(), Some("rápido"));
        // ADV is not in the default split set: tags update in place.
        assert!(!seg.should_split);
        assert_eq!(seg.pieces, vec!["rápida", "mente"]);
    }

    #[test]
    fn test_prefix_chain_mirrors_suffix_chain() {
        let config = EngineConfig {
            split_on: SplitOn::Any,
            replace_lemma: true,
        };
        let seg = engine_with_config(config)
            .apply("antitabaco", false)
            .expect("should segment");
        assert_eq!(seg.kind, AffixKind::Prefix);
        assert!(seg.should_split);
        assert_eq!(seg.pieces, vec!["anti", "tabaco"]);
        assert_eq!(seg.heads, vec![-1, 0]);
        assert_eq!(seg.head_indices(), vec![1, 1]);
        assert_eq!(seg.stem_index(), 1);
        // Prefix rules without a template leave the lemma alone.
        assert_eq!(seg.lemma, None);
    }

    #[test]
    fn test_prefix_split_suppressed_by_default_config() {
        let seg = engine().apply("antitabaco", false).expect("should match");
        assert_eq!(seg.pos, UdPos::Noun);
        assert!(!seg.should_split);
    }

    #[test]
    fn test_skip_guard_protects_valid_words() {
        // "cosas" is itself a noun reading, so the non-always_apply plural
        // rule must leave it alone.
        assert!(engine().apply("cosas", false).is_none());

        let mut plural = rule_record("s", "suffix", "N");
        plural.affix_text = vec!["s".to_string()];
        plural.always_apply = true;
        let rules = Arc::new(RuleSet::from_records([plural]).unwrap());
        let forced = AffixEngine::new(fixture_lexicon(), rules).unwrap();
        let seg = forced.apply("cosas", false).expect("always_apply fires");
        assert_eq!(seg.matched_stem, "cosa");
    }

    #[test]
    fn test_already_segmented_token_is_never_reprocessed() {
        let engine = engine();
        assert!(engine.apply("dímelo", true).is_none());
        assert!(engine.apply_group("dímelo", "suffix_melo", true).is_none());
    }

    #[test]
    fn test_lemma_replacement_can_be_disabled() {
        let config = EngineConfig {
            split_on: SplitOn::default(),
            replace_lemma: false,
        };
        let seg = engine_with_config(config).apply("dímelo", false).unwrap();
        assert_eq!(seg.lemma, None);
        assert_eq!(seg.pos, UdPos::Verb);
    }

    #[test]
    fn test_lemma_template_resolution() {
        let mut mente = rule_record("mente", "suffix", "A");
        mente.strip_accent = true;
        mente.assign_lemma = Some("R+mente".to_string());
        let rules = Arc::new(RuleSet::from_records([mente]).unwrap());
        let engine = AffixEngine::new(fixture_lexicon(), rules).unwrap();
        let seg = engine.apply("rápidamente", false).unwrap();
        assert_eq!(seg.lemma.as_deref(), Some("rapidamente"));
    }

    #[test]
    fn test_affix_add_candidates_tried_in_order() {
        let mut diminutive = rule_record("ito", "suffix", "N");
        diminutive.affix_add = vec!["*".to_string(), "o".to_string()];
        diminutive.affix_text = vec!["ito".to_string()];
        let rules = Arc::new(RuleSet::from_records([diminutive]).unwrap());
        let engine = AffixEngine::new(fixture_lexicon(), rules).unwrap();
        let seg = engine.apply("gatito", false).expect("second candidate hits");
        assert_eq!(seg.matched_stem, "gato");
        assert_eq!(seg.lemma.as_deref(), Some("gato"));
        assert_eq!(seg.pieces, vec!["gat", "ito"]);
        assert_eq!(seg.affix_count, 1);
    }

    #[test]
    fn test_split_on_explicit_pos_set() {
        let config = EngineConfig {
            split_on: SplitOn::Pos(HashSet::from([UdPos::Noun])),
            replace_lemma: true,
        };
        let engine = engine_with_config(config);
        // Noun results split, verb results no longer do.
        assert!(engine.apply("antitabaco", false).unwrap().should_split);
        assert!(!engine.apply("dímelo", false).unwrap().should_split);

        // An empty split set disables structural splits entirely; tags and
        // lemmas still update.
        let muted = engine_with_config(EngineConfig {
            split_on: SplitOn::none(),
            replace_lemma: true,
        });
        let seg = muted.apply("dímelo", false).unwrap();
        assert!(!seg.should_split);
        assert_eq!(seg.lemma.as_deref(), Some("decir"));
    }

    #[test]
    fn test_process_document_pass() {
        let engine = engine();
        let prefilter = RegexPrefilter::new(engine.rules());
        let mut retokenizer = RecordingRetokenizer::default();

        let tokens = ["Cuéntamelo", "bien", "y", "caramelo"];
        let results = engine
            .process_document(&tokens, &prefilter, &mut retokenizer)
            .unwrap();

        assert_eq!(results.len(), 4);
        let seg = results[0].as_ref().expect("clitic token segments");
        assert_eq!(seg.pieces, vec!["Cuénta", "me", "lo"]);
        assert_eq!(seg.lemma.as_deref(), Some("contar"));
        assert!(results[1].is_none());
        assert!(results[2].is_none());
        assert!(results[3].is_none());

        assert_eq!(retokenizer.calls.len(), 1);
        assert_eq!(retokenizer.calls[0].0, 0);
    }

    #[test]
    fn test_process_document_with_automaton_prefilter() {
        let engine = engine();
        let prefilter = AutomatonPrefilter::new(engine.rules()).unwrap();
        let mut retokenizer = RecordingRetokenizer::default();

        let tokens = ["dímelo", "claro"];
        let results = engine
            .process_document(&tokens, &prefilter, &mut retokenizer)
            .unwrap();
        assert!(results[0].is_some());
        assert!(results[1].is_none());
    }

    #[test]
    fn test_construction_requires_both_tables() {
        let empty_lexicon = Arc::new(Lexicon::from_records([]));
        let empty_rules = Arc::new(RuleSet::from_records([]).unwrap());
        let rules = Arc::new(RuleSet::from_records(fixture_rules()).unwrap());

        assert!(AffixEngine::new(empty_lexicon.clone(), rules).is_err());
        assert!(AffixEngine::new(fixture_lexicon(), empty_rules).is_err());
        assert!(
            AffixEngine::new(
                empty_lexicon,
                Arc::new(RuleSet::from_records([]).unwrap())
            )
            .is_err()
        );
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = engine();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine.apply("dímelo", false).map(|seg| seg.pieces.len())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(3));
        }
    }
}
