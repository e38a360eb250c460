/// Positional similarity between a cluster template and a token
/// sequence of the same length.
///
/// Wildcard positions in the template are tallied separately as
/// `param_count` and only contribute to the score when `include_params`
/// is set. Training passes `false`, so a heavily generalized template
/// gets harder to match; querying passes `true`, so lines are not
/// punished for landing on wildcard positions.
///
/// Panics when the sequences differ in length: tree descent guarantees
/// equality, so a mismatch is a bug, not an input condition.
pub fn seq_distance(
    template: &[String],
    tokens: &[String],
    wildcard: &str,
    include_params: bool,
) -> (f64, usize) {
    assert_eq!(template.len(), tokens.len(), "sequences must be of equal length");

    let mut sim_tokens = 0usize;
    let mut param_count = 0usize;
    for (tpl, tok) in template.iter().zip(tokens) {
        if tpl == wildcard {
            param_count += 1;
        } else if tpl == tok {
            sim_tokens += 1;
        }
    }
    if include_params {
        sim_tokens += param_count;
    }
    (sim_tokens as f64 / template.len() as f64, param_count)
}

/// Elementwise merge of a token sequence into a template: positions
/// that agree keep their token, positions that differ become the
/// wildcard. A position that is already the wildcard stays the wildcard.
///
/// Panics on unequal lengths, same as [`seq_distance`].
pub fn merge_template(template: &[String], tokens: &[String], wildcard: &str) -> Vec<String> {
    assert_eq!(template.len(), tokens.len(), "sequences must be of equal length");

    template
        .iter()
        .zip(tokens)
        .map(|(tpl, tok)| if tpl == tok { tok.clone() } else { wildcard.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn identical_sequences_score_one() {
        let (sim, params) = seq_distance(&toks("a b c"), &toks("a b c"), "<*>", false);
        assert_eq!(sim, 1.0);
        assert_eq!(params, 0);
    }

    #[test]
    fn wildcards_only_count_when_params_included() {
        let template = toks("a <*> c");
        let tokens = toks("a x c");
        let (sim, params) = seq_distance(&template, &tokens, "<*>", false);
        assert_eq!(sim, 2.0 / 3.0);
        assert_eq!(params, 1);

        let (sim, params) = seq_distance(&template, &tokens, "<*>", true);
        assert_eq!(sim, 1.0);
        assert_eq!(params, 1);
    }

    #[test]
    fn disjoint_sequences_score_zero() {
        let (sim, params) = seq_distance(&toks("a b"), &toks("x y"), "<*>", false);
        assert_eq!(sim, 0.0);
        assert_eq!(params, 0);
    }

    #[test]
    fn merge_keeps_agreement_and_wildcards_difference() {
        let merged = merge_template(&toks("a b c"), &toks("a x c"), "<*>");
        assert_eq!(merged, toks("a <*> c"));
    }

    #[test]
    fn merge_never_reverts_a_wildcard() {
        let merged = merge_template(&toks("a <*> c"), &toks("a b c"), "<*>");
        assert_eq!(merged, toks("a <*> c"));
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn length_mismatch_is_a_bug() {
        seq_distance(&toks("a b"), &toks("a"), "<*>", false);
    }
}
