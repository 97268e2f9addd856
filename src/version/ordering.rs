//! Ordering of numeric prefixes and qualifier-aware suffix comparison.

use super::parse::SuffixToken;
use std::cmp::Ordering;

/// Qualifier order of unqualified suffixes (and of versions without one).
pub const UNQUALIFIED_ORDER: i32 = 0;
pub const SP_ORDER: i32 = 2;
pub const RELEASE_ORDER: i32 = 1;
pub const SNAPSHOT_ORDER: i32 = -1;
pub const NIGHTLY_ORDER: i32 = -2;
pub const RC_ORDER: i32 = -3;
pub const MILESTONE_ORDER: i32 = -4;
pub const BETA_ORDER: i32 = -5;
pub const ALPHA_ORDER: i32 = -6;
pub const DEV_ORDER: i32 = -7;

/// Precedence of a recognized qualifier word; higher is more released.
pub fn qualifier_order(word: &str) -> Option<i32> {
    let order = match word {
        "sp" => SP_ORDER,
        "release" | "r" | "ga" | "final" => RELEASE_ORDER,
        "snapshot" => SNAPSHOT_ORDER,
        "nightly" => NIGHTLY_ORDER,
        "rc" | "cr" => RC_ORDER,
        "milestone" | "m" => MILESTONE_ORDER,
        "beta" | "b" => BETA_ORDER,
        "alpha" | "a" => ALPHA_ORDER,
        "dev" | "pr" => DEV_ORDER,
        _ => return None,
    };
    Some(order)
}

/// Order of the first recognized qualifier word, scanning left to right.
pub fn tokens_order(tokens: &[SuffixToken]) -> i32 {
    tokens
        .iter()
        .filter_map(SuffixToken::as_word)
        .find_map(qualifier_order)
        .unwrap_or(UNQUALIFIED_ORDER)
}

/// Compare numeric prefixes position by position; on a tie the longer one wins.
pub fn compare_numbers(numbers1: &[u64], numbers2: &[u64]) -> Ordering {
    numbers1
        .iter()
        .zip(numbers2)
        .map(|(a, b)| a.cmp(b))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| numbers1.len().cmp(&numbers2.len()))
}

/// Compare suffix tokens: qualifier order first, then token by token
/// (numbers beat words), then length.
pub fn compare_suffix_tokens(tokens1: &[SuffixToken], tokens2: &[SuffixToken]) -> Ordering {
    let by_order = tokens_order(tokens1).cmp(&tokens_order(tokens2));
    if by_order.is_ne() {
        return by_order;
    }

    tokens1
        .iter()
        .zip(tokens2)
        .map(|(a, b)| compare_tokens(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| tokens1.len().cmp(&tokens2.len()))
}

fn compare_tokens(token1: &SuffixToken, token2: &SuffixToken) -> Ordering {
    match (token1, token2) {
        (SuffixToken::Number(a), SuffixToken::Number(b)) => a.cmp(b),
        (SuffixToken::Number(_), SuffixToken::Word(_)) => Ordering::Greater,
        (SuffixToken::Word(_), SuffixToken::Number(_)) => Ordering::Less,
        (SuffixToken::Word(a), SuffixToken::Word(b)) => a.cmp(b),
    }
}
