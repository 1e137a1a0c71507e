//! Sentence segmentation with offsets into the original text (§4.3).

use std::sync::OnceLock;

use regex::Regex;

use crate::clean::blank_out_matches;

fn boundary_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Split after '.', '!', or '?' followed by whitespace and an uppercase
    // letter or end of string; common abbreviations ("et al.", "Fig.",
    // "vs.") are protected by a lookbehind-free heuristic: we don't split on
    // a period if the preceding token is a known abbreviation.
    RE.get_or_init(|| Regex::new(r"[.!?]+[\s]+").expect("invalid boundary regex"))
}

const ABBREVIATIONS: &[&str] = &["et al", "fig", "vs", "e.g", "i.e", "approx", "dr", "mr", "mrs", "ms", "no"];

fn ends_with_abbreviation(preceding: &str) -> bool {
    let word = preceding
        .trim_end_matches(['.', '!', '?'])
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

/// One sentence with offsets into the original (pre-cleaning) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Segment `original_text` into sentences. Citations/URLs are blanked
/// out (length-preserving) before segmentation so sentence boundaries and
/// offsets are computed on text of the same length as the original, then
/// the returned sentence text is re-sliced from `original_text` so nothing
/// is lost for display — only offset math uses the blanked copy.
pub fn segment_sentences(original_text: &str) -> Vec<RawSentence> {
    let blanked = blank_out_matches(original_text);
    let mut sentences = Vec::new();
    let mut start = 0usize;

    let boundaries: Vec<(usize, usize)> = boundary_pattern()
        .find_iter(&blanked)
        .map(|m| (m.start(), m.end()))
        .collect();

    for (b_start, b_end) in boundaries {
        if ends_with_abbreviation(&blanked[start..b_start]) {
            continue;
        }
        let end = b_start + trailing_punct_len(&blanked[b_start..b_end.min(blanked.len())]);
        push_if_nonempty(&mut sentences, original_text, start, end);
        start = b_end;
    }
    push_if_nonempty(&mut sentences, original_text, start, original_text.len());

    sentences
}

fn trailing_punct_len(boundary_match: &str) -> usize {
    boundary_match
        .chars()
        .take_while(|c| matches!(c, '.' | '!' | '?'))
        .count()
}

fn push_if_nonempty(out: &mut Vec<RawSentence>, original: &str, start: usize, end: usize) {
    if start >= end || end > original.len() {
        return;
    }
    let slice = &original[start..end];
    if slice.trim().is_empty() {
        return;
    }
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = end - (slice.len() - slice.trim_end().len());
    out.push(RawSentence {
        text: original[trimmed_start..trimmed_end].to_string(),
        start: trimmed_start,
        end: trimmed_end,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_sentence_boundaries() {
        let text = "Microgravity induces bone loss. Astronauts are affected.";
        let sentences = segment_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Microgravity induces bone loss.");
        assert_eq!(sentences[1].text, "Astronauts are affected.");
    }

    #[test]
    fn offsets_point_into_original_text() {
        let text = "Bone loss occurs in microgravity. See more below.";
        let sentences = segment_sentences(text);
        assert_eq!(&text[sentences[0].start..sentences[0].end], sentences[0].text);
        assert_eq!(&text[sentences[1].start..sentences[1].end], sentences[1].text);
    }

    #[test]
    fn does_not_split_on_abbreviations() {
        let text = "This has been shown previously (Smith et al. 2019) in rodents.";
        let sentences = segment_sentences(text);
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn offsets_survive_citation_stripping() {
        let text = "Bone loss is common [12, 13]. Muscle atrophy is also reported.";
        let sentences = segment_sentences(text);
        assert_eq!(sentences.len(), 2);
        // Offsets still point at the ORIGINAL text, citation brackets intact.
        assert_eq!(&text[sentences[0].start..sentences[0].end], sentences[0].text);
    }

    #[test]
    fn empty_text_yields_no_sentences() {
        assert!(segment_sentences("").is_empty());
    }

    #[test]
    fn whitespace_only_text_yields_no_sentences() {
        assert!(segment_sentences("   \n\t  ").is_empty());
    }
}
