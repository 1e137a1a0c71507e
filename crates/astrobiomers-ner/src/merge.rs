//! Overlap resolution across extractors (§4.4 "Merging rules").

use astrobiomers_model::EntityKind;

use crate::extractors::RawMention;

/// Fixed kind-priority table for tiebreaking equal-confidence overlaps.
/// More specific domain kinds outrank generic ones, since the whole point
/// of the pattern extractor is to catch what generic models miss.
fn kind_priority(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Stressor => 9,
        EntityKind::Phenotype => 8,
        EntityKind::Intervention => 7,
        EntityKind::Gene => 6,
        EntityKind::Protein => 5,
        EntityKind::Chemical => 4,
        EntityKind::Disease => 3,
        EntityKind::CellType => 2,
        EntityKind::Organism => 1,
    }
}

/// Merge overlapping mentions from different extractors: higher confidence
/// wins; ties broken by kind-priority. Non-overlapping mentions all survive.
pub fn merge_overlaps(mut mentions: Vec<RawMention>) -> Vec<RawMention> {
    mentions.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.span.end.cmp(&a.span.end))
    });

    let mut result: Vec<RawMention> = Vec::new();
    for mention in mentions {
        match result.iter().position(|kept: &RawMention| kept.span.overlaps(&mention.span)) {
            None => result.push(mention),
            Some(idx) => {
                if beats(&mention, &result[idx]) {
                    result[idx] = mention;
                }
            }
        }
    }
    result
}

fn beats(candidate: &RawMention, incumbent: &RawMention) -> bool {
    if candidate.confidence != incumbent.confidence {
        return candidate.confidence > incumbent.confidence;
    }
    kind_priority(candidate.kind) > kind_priority(incumbent.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ExtractorTag;
    use astrobiomers_model::Span;

    fn mention(start: usize, end: usize, kind: EntityKind, confidence: f64) -> RawMention {
        RawMention {
            text: "x".repeat(end - start),
            kind,
            span: Span::new(start, end),
            confidence,
            extractor: ExtractorTag::Pattern,
        }
    }

    #[test]
    fn non_overlapping_mentions_all_survive() {
        let mentions = vec![
            mention(0, 5, EntityKind::Gene, 0.9),
            mention(10, 15, EntityKind::Disease, 0.8),
        ];
        assert_eq!(merge_overlaps(mentions).len(), 2);
    }

    #[test]
    fn higher_confidence_wins_overlap() {
        let mentions = vec![
            mention(0, 10, EntityKind::Gene, 0.80),
            mention(2, 8, EntityKind::Disease, 0.95),
        ];
        let merged = merge_overlaps(mentions);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].kind, EntityKind::Disease);
    }

    #[test]
    fn tie_breaks_by_kind_priority() {
        let mentions = vec![
            mention(0, 10, EntityKind::Organism, 0.90),
            mention(0, 10, EntityKind::Stressor, 0.90),
        ];
        let merged = merge_overlaps(mentions);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].kind, EntityKind::Stressor);
    }
}
