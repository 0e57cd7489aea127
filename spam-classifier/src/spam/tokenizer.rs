//! Text tokenization
//!
//! Both training and scoring go through [`tokenize`], so identical text
//! always yields identical tokens.

use regex::Regex;
use std::sync::LazyLock;

/// Decimal numbers with `.`/`,` separators, or runs of Unicode
/// alphanumerics, underscores and apostrophes.
const TOKEN_PATTERN: &str = r"(?:[0-9]+[.,])+[0-9]+|[\p{Alphabetic}\p{Nd}_']+";

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"));

/// Split text into lowercase word tokens, dropping pure numbers
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    TOKEN_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_only_digits(token))
        .map(str::to_string)
        .collect()
}

fn is_only_digits(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_digit())
}
