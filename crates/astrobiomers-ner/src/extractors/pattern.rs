//! Pattern-based matcher for domain-specific classes underrepresented by
//! generic models: stressors, phenotypes, interventions, organism aliases
//! (§4.4, #3).

use aho_corasick::{AhoCorasick, MatchKind};

use astrobiomers_model::{EntityKind, Span};

use super::{NerExtractor, RawMention};

const PATTERNS: &[(&str, EntityKind, f64)] = &[
    // Stressors
    ("microgravity", EntityKind::Stressor, 0.90),
    ("simulated microgravity", EntityKind::Stressor, 0.90),
    ("cosmic radiation", EntityKind::Stressor, 0.90),
    ("ionizing radiation", EntityKind::Stressor, 0.88),
    ("isolation", EntityKind::Stressor, 0.88),
    ("spaceflight", EntityKind::Stressor, 0.90),
    ("altered gravity", EntityKind::Stressor, 0.89),
    ("hindlimb unloading", EntityKind::Stressor, 0.89),
    ("hypergravity", EntityKind::Stressor, 0.89),
    // Phenotypes
    ("bone loss", EntityKind::Phenotype, 0.90),
    ("bone density loss", EntityKind::Phenotype, 0.89),
    ("muscle atrophy", EntityKind::Phenotype, 0.90),
    ("immune dysfunction", EntityKind::Phenotype, 0.88),
    ("cardiovascular deconditioning", EntityKind::Phenotype, 0.88),
    ("vision impairment", EntityKind::Phenotype, 0.88),
    // Interventions
    ("resistive exercise", EntityKind::Intervention, 0.88),
    ("artificial gravity", EntityKind::Intervention, 0.89),
    ("countermeasure exercise", EntityKind::Intervention, 0.88),
    ("bisphosphonate treatment", EntityKind::Intervention, 0.88),
    // Organism aliases
    ("c. elegans", EntityKind::Organism, 0.90),
    ("mouse", EntityKind::Organism, 0.88),
    ("mice", EntityKind::Organism, 0.88),
    ("rat", EntityKind::Organism, 0.88),
    ("fruit fly", EntityKind::Organism, 0.88),
    ("zebrafish", EntityKind::Organism, 0.90),
];

pub struct PatternMatcher {
    automaton: AhoCorasick,
    kinds: Vec<EntityKind>,
    confidences: Vec<f64>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        let patterns: Vec<&str> = PATTERNS.iter().map(|(p, _, _)| *p).collect();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(patterns)
            .expect("lexicon automaton build should never fail on static patterns");
        Self {
            automaton,
            kinds: PATTERNS.iter().map(|(_, k, _)| *k).collect(),
            confidences: PATTERNS.iter().map(|(_, _, c)| *c).collect(),
        }
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NerExtractor for PatternMatcher {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, text: &str) -> Vec<RawMention> {
        self.automaton
            .find_iter(text)
            .map(|m| {
                let idx = m.pattern().as_usize();
                RawMention {
                    text: text[m.start()..m.end()].to_string(),
                    kind: self.kinds[idx],
                    span: Span::new(m.start(), m.end()),
                    confidence: self.confidences[idx],
                    extractor: super::ExtractorTag::Pattern,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_stressor_terms() {
        let matcher = PatternMatcher::new();
        let mentions = matcher.extract("Exposure to microgravity and cosmic radiation during spaceflight.");
        assert!(mentions.iter().any(|m| m.text.eq_ignore_ascii_case("microgravity") && m.kind == EntityKind::Stressor));
        assert!(mentions.iter().any(|m| m.text.eq_ignore_ascii_case("cosmic radiation")));
    }

    #[test]
    fn confidence_is_within_fixed_high_band() {
        let matcher = PatternMatcher::new();
        let mentions = matcher.extract("microgravity");
        assert!(mentions[0].confidence >= 0.88 && mentions[0].confidence <= 0.90);
    }

    #[test]
    fn longest_match_wins_for_overlapping_patterns() {
        let matcher = PatternMatcher::new();
        let mentions = matcher.extract("simulated microgravity exposure");
        assert!(mentions.iter().any(|m| m.text.eq_ignore_ascii_case("simulated microgravity")));
        assert!(!mentions.iter().any(|m| m.text.eq_ignore_ascii_case("microgravity") && m.span.start > 0 && m.text.len() < "simulated microgravity".len()));
    }
}
