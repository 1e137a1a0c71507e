//! Dependency-parse-stand-in subject-verb-object extraction (§4.5 #1),
//! working off the preprocess stage's coarse POS tags rather than a real
//! dependency parse: the first verb lemma in a sentence that maps onto a
//! relation type links the two earliest mentions in that sentence as
//! subject and object.

use astrobiomers_model::{Mention, Sentence};

use crate::candidate::{mentions_in_span, Candidate};
use crate::verb_map::relation_for_lemma;

const SVO_CONFIDENCE: f64 = 0.85;

pub fn svo_candidates(sentence: &Sentence, mentions: &[Mention]) -> Vec<Candidate> {
    let in_span = mentions_in_span(mentions, sentence.start, sentence.end);
    if in_span.len() < 2 {
        return Vec::new();
    }

    let relation_type = sentence
        .lemmas
        .iter()
        .zip(sentence.pos_tags.iter().chain(std::iter::repeat(&String::new())))
        .find_map(|(lemma, pos)| {
            if pos == "VERB" {
                relation_for_lemma(lemma)
            } else {
                None
            }
        });

    let Some(relation_type) = relation_type else {
        return Vec::new();
    };

    vec![Candidate {
        subject: in_span[0].clone(),
        object: in_span[1].clone(),
        relation_type,
        confidence: SVO_CONFIDENCE,
        evidence_sentence: sentence.text.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrobiomers_model::{EntityKind, Extractor, Span};

    fn mention(text: &str, kind: EntityKind, start: usize, end: usize) -> Mention {
        Mention {
            paper_id: "1".into(),
            text: text.into(),
            canonical_name: text.to_lowercase(),
            kind,
            span: Span::new(start, end),
            confidence: 0.9,
            extractor: Extractor::Pattern,
            external_ids: Default::default(),
            ontology_terms: Default::default(),
        }
    }

    #[test]
    fn links_two_mentions_via_mapped_verb() {
        let sentence = Sentence {
            text: "Microgravity induces bone loss".into(),
            start: 0,
            end: 31,
            tokens: vec!["Microgravity".into(), "induces".into(), "bone".into(), "loss".into()],
            lemmas: vec!["microgravity".into(), "induc".into(), "bone".into(), "loss".into()],
            pos_tags: vec!["NOUN".into(), "VERB".into(), "NOUN".into(), "NOUN".into()],
        };
        let mentions = vec![
            mention("Microgravity", EntityKind::Stressor, 0, 12),
            mention("bone loss", EntityKind::Phenotype, 22, 31),
        ];
        let candidates = svo_candidates(&sentence, &mentions);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].subject.canonical_name, "microgravity");
        assert_eq!(candidates[0].object.canonical_name, "bone loss");
    }

    #[test]
    fn no_mapped_verb_yields_no_candidates() {
        let sentence = Sentence {
            text: "Microgravity was observed near bone loss".into(),
            start: 0,
            end: 42,
            tokens: vec![],
            lemmas: vec!["observ".into()],
            pos_tags: vec!["VERB".into()],
        };
        let mentions = vec![
            mention("Microgravity", EntityKind::Stressor, 0, 12),
            mention("bone loss", EntityKind::Phenotype, 32, 41),
        ];
        assert!(svo_candidates(&sentence, &mentions).is_empty());
    }

    #[test]
    fn fewer_than_two_mentions_yields_no_candidates() {
        let sentence = Sentence {
            text: "Microgravity induces changes".into(),
            start: 0,
            end: 29,
            tokens: vec![],
            lemmas: vec!["induc".into()],
            pos_tags: vec!["VERB".into()],
        };
        let mentions = vec![mention("Microgravity", EntityKind::Stressor, 0, 12)];
        assert!(svo_candidates(&sentence, &mentions).is_empty());
    }
}
