//! Version string grammar and suffix tokenization.
//!
//! A version string is a dot-separated numeric prefix followed by a free-form
//! suffix made of ASCII letters, digits and `- . + _`:
//!
//! - `1.2.3` → numbers `[1, 2, 3]`, no suffix
//! - `1.2.3-rc.4` → numbers `[1, 2, 3]`, suffix `-rc.4`, tokens `["rc", 4]`
//! - `5.2.0.RELEASE` → numbers `[5, 2, 0]`, suffix `.RELEASE`, tokens `["release"]`

use super::error::VersionError;
use regex::Regex;
use std::sync::LazyLock;

/// The grammar every version string must match, as shown in format errors.
pub const VERSION_PATTERN: &str = r"^(?<numbers>[0-9]+(?:\.[0-9]+)*)(?<suffix>[-.+_a-zA-Z0-9]*)$";

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_PATTERN).expect("version pattern is a valid regex"));

/// One piece of a version suffix: either a digit run or a lowercase letter run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SuffixToken {
    Number(u64),
    Word(String),
}

impl SuffixToken {
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(word) => Some(word),
            Self::Number(_) => None,
        }
    }
}

impl From<u64> for SuffixToken {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for SuffixToken {
    fn from(word: &str) -> Self {
        Self::Word(word.to_string())
    }
}

/// The two halves of a version string that matched [`VERSION_PATTERN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMatch<'a> {
    pub numbers: &'a str,
    pub suffix: &'a str,
}

/// Match a version string against the grammar, without trimming.
pub fn match_version(version: &str) -> Result<VersionMatch<'_>, VersionError> {
    if version.is_empty() {
        return Err(VersionError::Empty);
    }

    let captures = VERSION_REGEX
        .captures(version)
        .ok_or_else(|| VersionError::format(version))?;

    Ok(VersionMatch {
        numbers: captures.name("numbers").map_or("", |m| m.as_str()),
        suffix: captures.name("suffix").map_or("", |m| m.as_str()),
    })
}

pub fn parse_numbers_string(version: &str) -> Result<&str, VersionError> {
    Ok(match_version(version)?.numbers)
}

pub fn parse_numbers(version: &str) -> Result<Vec<u64>, VersionError> {
    let numbers = parse_numbers_string(version)?;
    split_numbers(numbers).ok_or_else(|| VersionError::format(version))
}

pub fn parse_suffix_string(version: &str) -> Result<&str, VersionError> {
    Ok(match_version(version)?.suffix)
}

pub fn parse_suffix_tokens(version: &str) -> Result<Vec<SuffixToken>, VersionError> {
    Ok(tokenize_suffix(parse_suffix_string(version)?))
}

/// Split an already-matched numeric prefix. `None` if a segment overflows.
pub(crate) fn split_numbers(numbers: &str) -> Option<Vec<u64>> {
    numbers
        .split('.')
        .map(|segment| segment.parse::<u64>().ok())
        .collect()
}

/// Lower-case the suffix, break it at every letter/digit boundary and at
/// `- . + _`, and classify each non-empty piece.
pub(crate) fn tokenize_suffix(suffix: &str) -> Vec<SuffixToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in suffix.chars().map(|c| c.to_ascii_lowercase()) {
        if matches!(c, '-' | '.' | '+' | '_') {
            flush_token(&mut current, &mut tokens);
            continue;
        }

        let boundary = current
            .chars()
            .last()
            .is_some_and(|prev| prev.is_ascii_digit() != c.is_ascii_digit());
        if boundary {
            flush_token(&mut current, &mut tokens);
        }
        current.push(c);
    }
    flush_token(&mut current, &mut tokens);

    tokens
}

fn flush_token(current: &mut String, tokens: &mut Vec<SuffixToken>) {
    if current.is_empty() {
        return;
    }

    let piece = std::mem::take(current);
    // Digit runs too long for u64 stay words
    let token = if piece.bytes().all(|b| b.is_ascii_digit()) {
        piece
            .parse::<u64>()
            .map_or_else(|_| SuffixToken::Word(piece.clone()), SuffixToken::Number)
    } else {
        SuffixToken::Word(piece)
    };
    tokens.push(token);
}
