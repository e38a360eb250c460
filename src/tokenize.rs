/// Splits a log line into tokens: surrounding whitespace is trimmed,
/// every occurrence of each extra delimiter is replaced by a space, and
/// the result is split on single spaces. Runs of spaces produce empty
/// tokens, which are preserved.
pub fn tokenize(content: &str, extra_delimiters: &[String]) -> Vec<String> {
    let mut content = content.trim().to_string();
    for delimiter in extra_delimiters {
        content = content.replace(delimiter.as_str(), " ");
    }
    content.split(' ').map(str::to_string).collect()
}

/// True iff any character of the token is a digit in the Unicode sense.
pub fn has_digit(token: &str) -> bool {
    token.chars().any(char::is_numeric)
}
