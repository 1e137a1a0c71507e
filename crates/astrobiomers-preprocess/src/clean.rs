//! Citation/figure-reference stripping and URL removal (§4.3, first two
//! operations, run before sentence segmentation).

use std::sync::OnceLock;

use regex::Regex;

fn citation_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches "(Smith et al., 2019)", "[12]", "[12, 13]", "(Fig. 3)".
    RE.get_or_init(|| {
        Regex::new(r"(\[\d+(,\s*\d+)*\])|(\([A-Z][a-zA-Z]*(\s+et al\.?)?,?\s*\d{4}[a-z]?\))|(\(Fig(ure)?\.?\s*\d+[a-zA-Z]?\))")
            .expect("invalid citation regex")
    })
}

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("invalid url regex"))
}

/// Strip inline citations, figure references, and URLs, collapsing the
/// resulting whitespace runs. Use this for display/tokenization text where
/// character offsets into the original don't matter.
pub fn clean_text(text: &str) -> String {
    collapse_whitespace(&blank_out_matches(text))
}

/// Same stripping, but replaces each match with spaces of equal byte length
/// rather than collapsing — the result has the same length as `text`, so
/// character offsets computed against it still point into the original
/// (§4.3 "character offsets between original and sentence list are
/// retained").
pub fn blank_out_matches(text: &str) -> String {
    let mut out = text.to_string();
    for re in [citation_pattern(), url_pattern()] {
        out = blank_matches(&out, re);
    }
    out
}

fn blank_matches(text: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        out.extend(std::iter::repeat(' ').take(m.as_str().chars().count()));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bracketed_citations() {
        let text = "Bone loss occurs in microgravity [12, 13].";
        assert_eq!(clean_text(text), "Bone loss occurs in microgravity .");
    }

    #[test]
    fn strips_author_year_citations() {
        let text = "This was shown previously (Smith et al., 2019).";
        assert_eq!(clean_text(text), "This was shown previously .");
    }

    #[test]
    fn strips_figure_references() {
        let text = "As shown in (Fig. 3), bone density declined.";
        assert_eq!(clean_text(text), "As shown in , bone density declined.");
    }

    #[test]
    fn strips_urls() {
        let text = "See https://example.com/data for details.";
        assert_eq!(clean_text(text), "See for details.");
    }

    #[test]
    fn leaves_plain_text_unchanged() {
        let text = "Microgravity induces bone loss in astronauts.";
        assert_eq!(clean_text(text), text);
    }

    #[test]
    fn blank_out_matches_preserves_length_and_offsets() {
        let text = "Bone loss occurs in microgravity [12, 13].";
        let blanked = blank_out_matches(text);
        assert_eq!(blanked.chars().count(), text.chars().count());
        assert_eq!(&blanked[..33], &text[..33]);
    }
}
