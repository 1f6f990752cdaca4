use super::round4;

/// Literal match outcome for one evidence block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactMatch {
    pub score: f64,
    pub matched_signals: Vec<String>,
}

/// Fraction of `signals` whose lowercased form occurs in `normalized_text`.
///
/// Blank signals never match, so an empty or blank block scores 0.0.
pub fn score_block(normalized_text: &str, signals: &[String]) -> ExactMatch {
    if signals.is_empty() {
        return ExactMatch {
            score: 0.0,
            matched_signals: Vec::new(),
        };
    }

    let matched_signals: Vec<String> = signals
        .iter()
        .filter(|signal| {
            let needle = signal.to_lowercase();
            !needle.trim().is_empty() && normalized_text.contains(&needle)
        })
        .cloned()
        .collect();

    let score = (matched_signals.len() as f64 / signals.len() as f64).min(1.0);

    ExactMatch {
        score: round4(score),
        matched_signals,
    }
}

/// First sentence containing each signal, in signal order, without repeats.
///
/// A signal whose first containing sentence was already recorded for an
/// earlier signal contributes nothing.
pub fn extract_snippets(sentences: &[String], signals: &[String]) -> Vec<String> {
    let lowered: Vec<String> = sentences.iter().map(|s| s.to_lowercase()).collect();
    let mut recorded: Vec<usize> = Vec::new();

    for signal in signals {
        let needle = signal.to_lowercase();
        if needle.trim().is_empty() {
            continue;
        }

        if let Some(index) = lowered.iter().position(|sentence| sentence.contains(&needle)) {
            if !recorded.iter().any(|&i| sentences[i] == sentences[index]) {
                recorded.push(index);
            }
        }
    }

    recorded.into_iter().map(|i| sentences[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_signal_list_scores_zero() {
        let result = score_block("anything at all", &[]);
        assert_eq!(result.score, 0.0);
        assert!(result.matched_signals.is_empty());
    }

    #[test]
    fn blank_signals_never_match() {
        let result = score_block("document control", &strings(&["", "  "]));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn partial_matches_are_fractional_and_rounded() {
        let text = "the quality manual describes document control";
        let result = score_block(
            text,
            &strings(&["Quality Manual", "document control", "audit schedule"]),
        );
        assert_eq!(result.score, 0.6667);
        assert_eq!(
            result.matched_signals,
            strings(&["Quality Manual", "document control"])
        );
    }

    #[test]
    fn snippets_follow_signal_order_without_duplicates() {
        let sentences = strings(&[
            "Scope of the manual",
            "Document control and annual review are performed",
            "Annual review minutes are filed",
        ]);
        let snippets = extract_snippets(
            &sentences,
            &strings(&["annual review", "document control", "minutes"]),
        );

        assert_eq!(
            snippets,
            strings(&[
                "Document control and annual review are performed",
                "Annual review minutes are filed",
            ])
        );
    }

    #[test]
    fn snippets_skip_unmatched_signals() {
        let sentences = strings(&["Hand hygiene audit"]);
        assert!(extract_snippets(&sentences, &strings(&["waste segregation"])).is_empty());
    }
}
