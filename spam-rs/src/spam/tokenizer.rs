//! Whitespace tokenizer
//!
//! Documents are split on whitespace and each piece is lower-cased. Only
//! pieces made up entirely of `a`-`z` are kept; anything carrying digits,
//! punctuation or non-ASCII letters is discarded rather than trimmed.

/// Check whether an already lower-cased string is a token
pub fn is_token(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_lowercase())
}

/// Iterate over the tokens of a document, in order, repeats included
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| is_token(word))
}
