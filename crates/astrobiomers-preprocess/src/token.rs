//! Tokenization, lemmatization, POS tagging, and stopword removal (§4.3):
//! small rule-based heuristics rather than a stub for a missing dependency,
//! since no general-purpose NLP crate available here covers
//! lemmatization/POS for this domain.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Standard English stopwords plus the domain augmentation named in §4.3.
fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            "a", "an", "the", "and", "or", "but", "if", "then", "of", "to", "in", "on", "at",
            "by", "for", "with", "about", "as", "is", "are", "was", "were", "be", "been", "being",
            "this", "that", "these", "those", "it", "its", "we", "our", "they", "their", "from",
            "into", "than", "such", "also", "can", "may", "not", "no", "do", "does", "did",
            // Domain augmentation (§4.3).
            "fig", "figure", "et al", "vs",
        ]
        .into_iter()
        .collect()
    })
}

/// Split a sentence into word tokens, keeping hyphenated and alphanumeric
/// tokens intact and dropping standalone punctuation.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Heuristic lemmatizer: strips common inflectional suffixes. Good enough
/// for downstream pattern/co-occurrence matching; not a substitute for a
/// real morphological analyzer.
pub fn lemmatize(token: &str) -> String {
    let lower = token.to_lowercase();
    for suffix in ["ies", "ied"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() >= 2 {
                return format!("{stem}y");
            }
        }
    }
    for suffix in ["sses", "shes", "ches", "xes"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() >= 2 {
                return stem.to_string();
            }
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() >= 3 {
                return stem.to_string();
            }
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.len() >= 3 && !stem.ends_with('s') {
            return stem.to_string();
        }
    }
    lower
}

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Verb,
    Noun,
    Adjective,
    Other,
}

impl Pos {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verb => "VERB",
            Self::Noun => "NOUN",
            Self::Adjective => "ADJ",
            Self::Other => "OTHER",
        }
    }
}

/// Heuristic POS tagger driven by suffix shape, sufficient for the
/// dependency-parse-like SVO heuristics in stage 4 (§4.5) which only need
/// to distinguish likely verbs from likely nouns/modifiers.
pub fn tag_pos(token: &str) -> Pos {
    let lower = token.to_lowercase();
    if lower.ends_with("ing") || lower.ends_with("ed") || lower.ends_with("ize") || lower.ends_with("ise") {
        Pos::Verb
    } else if lower.ends_with("ive") || lower.ends_with("ous") || lower.ends_with("al") {
        Pos::Adjective
    } else {
        Pos::Noun
    }
}

pub fn is_stopword(lemma: &str) -> bool {
    stopwords().contains(lemma)
}
