//! Class-based term frequency keyword extraction (§4.6 "Each cluster's
//! representative keywords are computed from the class-based term
//! frequencies of its member abstracts").

use std::collections::HashMap;

/// Top `top_n` most frequent lemmas across a cluster's member papers,
/// ties broken alphabetically for determinism.
pub fn top_keywords(member_lemmas: &[Vec<String>], top_n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for lemmas in member_lemmas {
        for lemma in lemmas {
            *counts.entry(lemma.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(top_n).map(|(term, _)| term.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_frequency_then_alphabetically() {
        let docs = vec![
            vec!["bone".to_string(), "loss".to_string()],
            vec!["bone".to_string(), "density".to_string()],
            vec!["muscle".to_string()],
        ];
        let top = top_keywords(&docs, 2);
        assert_eq!(top, vec!["bone".to_string(), "density".to_string()]);
    }

    #[test]
    fn empty_input_yields_no_keywords() {
        assert!(top_keywords(&[], 5).is_empty());
    }
}
