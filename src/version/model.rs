use super::error::VersionError;
use super::ordering::{
    ALPHA_ORDER, BETA_ORDER, MILESTONE_ORDER, RC_ORDER, RELEASE_ORDER, SNAPSHOT_ORDER,
    compare_numbers, compare_suffix_tokens, tokens_order,
};
use super::parse::{SuffixToken, match_version, split_numbers, tokenize_suffix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Highest position [`Version::with_number_at`] will zero-fill up to.
pub const MAX_POSITION: usize = 1024;

/// A parsed version: a non-empty numeric prefix plus a free-form suffix.
///
/// Values are immutable; every `with_*` / `without_*` operation returns a new
/// `Version`. Positions are 1-based throughout.
#[derive(Debug, Clone)]
pub struct Version {
    numbers: Vec<u64>,
    suffix: String,
    suffix_tokens: Vec<SuffixToken>,
}

impl Version {
    /// Strict parse. The whole string must match the version grammar.
    pub fn new(version: &str) -> Result<Self, VersionError> {
        let matched = match_version(version)?;
        let numbers =
            split_numbers(matched.numbers).ok_or_else(|| VersionError::format(version))?;
        Ok(Self::from_parts(numbers, matched.suffix))
    }

    /// Lenient parse: surrounding whitespace is trimmed and blank input means
    /// "no version" rather than an error.
    pub fn parse(text: &str) -> Result<Option<Self>, VersionError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Self::new(text).map(Some)
    }

    fn from_parts(numbers: Vec<u64>, suffix: &str) -> Self {
        Self {
            suffix_tokens: tokenize_suffix(suffix),
            suffix: suffix.to_string(),
            numbers,
        }
    }

    pub fn numbers(&self) -> Vec<u64> {
        self.numbers.clone()
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn suffix_tokens(&self) -> &[SuffixToken] {
        &self.suffix_tokens
    }

    /// Number at `pos`, or `None` past the end of the numeric prefix.
    pub fn number_at(&self, pos: usize) -> Result<Option<u64>, VersionError> {
        check_position(pos, 1)?;
        Ok(self.numbers.get(pos - 1).copied())
    }

    pub fn with_numbers(&self, numbers: &[u64]) -> Result<Self, VersionError> {
        if numbers.is_empty() {
            return Err(VersionError::argument("numbers must not be empty"));
        }
        Ok(Self {
            numbers: numbers.to_vec(),
            suffix: self.suffix.clone(),
            suffix_tokens: self.suffix_tokens.clone(),
        })
    }

    /// Set the number at `pos`, zero-filling any missing positions before it.
    pub fn with_number_at(&self, pos: usize, value: u64) -> Result<Self, VersionError> {
        check_position(pos, 1)?;
        if pos > MAX_POSITION {
            return Err(VersionError::argument(format!(
                "pos must be less or equal to {}: {}",
                MAX_POSITION, pos
            )));
        }
        let mut numbers = self.numbers.clone();
        if numbers.len() < pos {
            numbers.resize(pos, 0);
        }
        numbers[pos - 1] = value;
        self.with_numbers(&numbers)
    }

    /// Drop the number at `pos` and everything after it. The first number
    /// can never be dropped.
    pub fn without_number_at(&self, pos: usize) -> Result<Self, VersionError> {
        check_position(pos, 2)?;
        if pos > self.numbers.len() {
            return Ok(self.clone());
        }
        self.with_numbers(&self.numbers[..pos - 1])
    }

    pub fn increment_number_at(&self, pos: usize, step: u64) -> Result<Self, VersionError> {
        let current = self.number_at(pos)?.unwrap_or(0);
        let value = current.checked_add(step).ok_or_else(|| {
            VersionError::argument(format!(
                "number at {} overflows: {} + {}",
                pos, current, step
            ))
        })?;
        self.with_number_at(pos, value)
    }

    pub fn increment_number(&self, pos: usize) -> Result<Self, VersionError> {
        self.increment_number_at(pos, 1)
    }

    /// Replace the suffix. A suffix starting with a letter or digit gets a `-`
    /// separator; one starting with punctuation brings its own. The result is
    /// re-parsed, so `1.2` with suffix `.3` becomes `1.2.3`.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self, VersionError> {
        let suffix = match suffix.chars().next() {
            None => String::new(),
            Some(first) if first.is_ascii_alphanumeric() => format!("-{}", suffix),
            Some(_) => suffix.to_string(),
        };
        Self::new(&format!("{}{}", join_numbers(&self.numbers), suffix))
    }

    /// Same numbers, no suffix. A bare numeric prefix always matches the
    /// grammar, so this cannot fail.
    pub fn without_suffix(&self) -> Self {
        Self::from_parts(self.numbers.clone(), "")
    }

    /// Total order over versions: numeric prefix first, then suffix tokens.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        compare_numbers(&self.numbers, &other.numbers)
            .then_with(|| compare_suffix_tokens(&self.suffix_tokens, &other.suffix_tokens))
    }

    fn qualifier_order(&self) -> i32 {
        tokens_order(&self.suffix_tokens)
    }

    /// True when the suffix carries at least one word, not just numbers.
    pub fn has_suffix(&self) -> bool {
        self.suffix_tokens
            .iter()
            .any(|token| matches!(token, SuffixToken::Word(_)))
    }

    pub fn is_release(&self) -> bool {
        !self.has_suffix() || self.qualifier_order() >= RELEASE_ORDER
    }

    pub fn is_snapshot(&self) -> bool {
        self.qualifier_order() == SNAPSHOT_ORDER
    }

    pub fn is_rc(&self) -> bool {
        self.qualifier_order() == RC_ORDER
    }

    pub fn is_milestone(&self) -> bool {
        self.qualifier_order() == MILESTONE_ORDER
    }

    pub fn is_beta(&self) -> bool {
        self.qualifier_order() == BETA_ORDER
    }

    pub fn is_alpha(&self) -> bool {
        self.qualifier_order() == ALPHA_ORDER
    }
}

fn check_position(pos: usize, min: usize) -> Result<(), VersionError> {
    if pos < min {
        return Err(VersionError::argument(format!(
            "pos must be greater or equal to {}: {}",
            min, pos
        )));
    }
    Ok(())
}

fn join_numbers(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

// Tokens are derived from the suffix, so numbers and suffix identify a value.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.numbers == other.numbers && self.suffix == other.suffix
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numbers.hash(state);
        self.suffix.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", join_numbers(&self.numbers), self.suffix)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::new(text).unwrap()
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Version::parse("").unwrap(), None);
        assert_eq!(Version::parse(" ").unwrap(), None);
        assert_eq!(Version::parse("\t\n").unwrap(), None);
        assert_eq!(Version::parse("1.2").unwrap().unwrap().to_string(), "1.2");
        assert_eq!(Version::parse("  1.2  ").unwrap().unwrap().to_string(), "1.2");
    }

    #[test]
    fn test_parse_lenient_still_rejects_garbage() {
        assert!(matches!(Version::parse(" abc "), Err(VersionError::Format { .. })));
    }

    #[test]
    fn test_new_is_strict() {
        assert_eq!(Version::new(""), Err(VersionError::Empty));
        assert!(matches!(Version::new(" 1.2"), Err(VersionError::Format { .. })));
        assert!(matches!("x1".parse::<Version>(), Err(VersionError::Format { .. })));
    }

    #[test]
    fn test_to_string() {
        assert_eq!(v("1-snapshot2").to_string(), "1-snapshot2");
        assert_eq!(v("5.2.0.RELEASE").to_string(), "5.2.0.RELEASE");
        assert_eq!(v("01.002").to_string(), "1.2");
    }

    #[test]
    fn test_reparse_is_idempotent() {
        for text in ["1", "1.2.3-rc.4", "5.2.0.RELEASE", "007.1_beta+2", "1.0.0-SNAPSHOT"] {
            let parsed = v(text);
            assert_eq!(v(&parsed.to_string()), parsed, "{}", text);
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(v("1.2-rc").numbers(), vec![1, 2]);
    }

    #[test]
    fn test_number_at() {
        let version = v("1.2-rc");
        assert_eq!(
            version.number_at(0).unwrap_err().to_string(),
            "pos must be greater or equal to 1: 0"
        );
        assert_eq!(version.number_at(1).unwrap(), Some(1));
        assert_eq!(version.number_at(2).unwrap(), Some(2));
        assert_eq!(version.number_at(3).unwrap(), None);
    }

    #[test]
    fn test_suffix() {
        assert_eq!(v("1.2-rc").suffix(), "-rc");
        assert_eq!(v("1.2").suffix(), "");
    }

    #[test]
    fn test_with_numbers() {
        assert_eq!(
            v("1.2-rc").with_numbers(&[]).unwrap_err().to_string(),
            "numbers must not be empty"
        );
        assert_eq!(v("1.2-rc").with_numbers(&[3, 4]).unwrap().to_string(), "3.4-rc");
    }

    #[test]
    fn test_with_suffix() {
        let version = v("1.2-rc");
        assert_eq!(version.with_suffix("").unwrap().to_string(), "1.2");
        assert_eq!(version.with_suffix("alpha").unwrap().to_string(), "1.2-alpha");
        assert_eq!(version.with_suffix("3").unwrap().to_string(), "1.2-3");
        assert_eq!(version.with_suffix(".alpha").unwrap().to_string(), "1.2.alpha");
        assert!(version.with_suffix("alpha").unwrap().is_alpha());
    }

    #[test]
    fn test_with_suffix_reparses_numeric_continuation() {
        let changed = v("1.2").with_suffix(".3").unwrap();
        assert_eq!(changed, v("1.2.3"));
        assert_eq!(changed.numbers(), vec![1, 2, 3]);
        assert!(changed.suffix_tokens().is_empty());
        assert_eq!(changed.compare_to(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_with_suffix_rejects_characters_outside_grammar() {
        assert!(matches!(v("1.2").with_suffix("!x"), Err(VersionError::Format { .. })));
        assert!(matches!(
            v("1.2").with_suffix("bad suffix"),
            Err(VersionError::Format { .. })
        ));
    }

    #[test]
    fn test_derived_versions_survive_reparse() {
        let version = v("1.2.3-rc.4");
        let derived = [
            version.without_suffix(),
            version.with_suffix("final").unwrap(),
            version.with_number_at(5, 1).unwrap(),
            version.without_number_at(2).unwrap(),
        ];
        for d in derived {
            let reparsed = v(&d.to_string());
            assert_eq!(reparsed, d);
            assert_eq!(reparsed.suffix_tokens(), d.suffix_tokens());
        }
    }

    #[test]
    fn test_without_suffix() {
        assert_eq!(v("1.2-rc").without_suffix().to_string(), "1.2");
        assert!(v("1.2-rc").without_suffix().suffix_tokens().is_empty());
    }

    #[test]
    fn test_with_number_at() {
        let version = v("1.2-rc");
        assert_eq!(
            version.with_number_at(0, 5).unwrap_err().to_string(),
            "pos must be greater or equal to 1: 0"
        );
        assert_eq!(version.with_number_at(1, 9).unwrap().to_string(), "9.2-rc");
        assert_eq!(version.with_number_at(2, 9).unwrap().to_string(), "1.9-rc");
        assert_eq!(version.with_number_at(3, 9).unwrap().to_string(), "1.2.9-rc");
        assert_eq!(version.with_number_at(4, 9).unwrap().to_string(), "1.2.0.9-rc");
    }

    #[test]
    fn test_with_number_at_rejects_huge_position() {
        let version = v("1.2");
        let err = version.with_number_at(usize::MAX, 0).unwrap_err();
        assert!(matches!(err, VersionError::Argument(_)));
        assert!(err.to_string().starts_with("pos must be less or equal to"));
        assert!(version.increment_number(MAX_POSITION + 1).is_err());

        let widest = version.with_number_at(MAX_POSITION, 7).unwrap();
        assert_eq!(widest.numbers().len(), MAX_POSITION);
        assert_eq!(widest.number_at(MAX_POSITION).unwrap(), Some(7));
    }

    #[test]
    fn test_without_number_at() {
        let version = v("1.2-rc");
        assert_eq!(
            version.without_number_at(0).unwrap_err().to_string(),
            "pos must be greater or equal to 2: 0"
        );
        assert_eq!(
            version.without_number_at(1).unwrap_err().to_string(),
            "pos must be greater or equal to 2: 1"
        );
        assert_eq!(version.without_number_at(2).unwrap().to_string(), "1-rc");
        assert_eq!(version.without_number_at(3).unwrap().to_string(), "1.2-rc");
    }

    #[test]
    fn test_truncate_then_reexpand_restores_numbers() {
        let version = v("4.5.6.7-beta");
        let truncated = version.without_number_at(4).unwrap();
        assert_eq!(truncated.numbers(), vec![4, 5, 6]);
        let restored = truncated.with_number_at(4, 7).unwrap();
        assert_eq!(restored, version);
    }

    #[test]
    fn test_increment_number() {
        let version = v("1.2-rc");
        assert_eq!(
            version.increment_number(0).unwrap_err().to_string(),
            "pos must be greater or equal to 1: 0"
        );
        assert_eq!(version.increment_number(1).unwrap().to_string(), "2.2-rc");
        assert_eq!(version.increment_number_at(1, 10).unwrap().to_string(), "11.2-rc");
        assert_eq!(version.increment_number(2).unwrap().to_string(), "1.3-rc");
        assert_eq!(version.increment_number_at(2, 10).unwrap().to_string(), "1.12-rc");
        assert_eq!(version.increment_number(3).unwrap().to_string(), "1.2.1-rc");
        assert_eq!(version.increment_number_at(3, 10).unwrap().to_string(), "1.2.10-rc");
        assert_eq!(version.increment_number(4).unwrap().to_string(), "1.2.0.1-rc");
        assert_eq!(version.increment_number_at(4, 10).unwrap().to_string(), "1.2.0.10-rc");
    }

    #[test]
    fn test_increment_overflow_is_argument_error() {
        let version = v(&format!("{}", u64::MAX));
        assert!(matches!(version.increment_number(1), Err(VersionError::Argument(_))));
    }

    #[test]
    fn test_operations_leave_original_untouched() {
        let version = v("1.2-rc");
        let _ = version.with_number_at(5, 1).unwrap();
        let _ = version.without_suffix();
        assert_eq!(version.to_string(), "1.2-rc");
    }

    #[test]
    fn test_compare_to() {
        assert_eq!(v("1.2").compare_to(&v("1.2.3")), Ordering::Less);
        assert_eq!(v("1.2.3").compare_to(&v("1.2")), Ordering::Greater);

        assert_eq!(v("1.2-snapshot").compare_to(&v("1.2.3")), Ordering::Less);
        assert_eq!(v("1.2.3").compare_to(&v("1.2-snapshot")), Ordering::Greater);

        assert_eq!(v("1.2-snapshot").compare_to(&v("1.2")), Ordering::Less);
        assert_eq!(v("1.2").compare_to(&v("1.2-snapshot")), Ordering::Greater);
    }

    #[test]
    fn test_compare_to_qualifier_ladder() {
        let ladder = [
            "1.0-dev", "1.0-alpha1", "1.0-beta", "1.0-m2", "1.0-rc1", "1.0-rc2", "1.0-nightly",
            "1.0-SNAPSHOT", "1.0", "1.0.RELEASE", "1.0-sp1",
        ];
        for pair in ladder.windows(2) {
            assert_eq!(
                v(pair[0]).compare_to(&v(pair[1])),
                Ordering::Less,
                "{} < {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_compare_ignores_case_and_separators() {
        assert_eq!(v("1.0-RC1").compare_to(&v("1.0.rc-1")), Ordering::Equal);
        assert_ne!(v("1.0-RC1"), v("1.0.rc-1"));
    }

    #[test]
    fn test_compare_is_antisymmetric_and_transitive() {
        let versions: Vec<Version> = [
            "1", "1.0", "1.0-rc1", "1.0-RC1", "1.0-sec01", "1.0.1", "2.0-m1", "2.0-x", "2.0-1",
            "2.0-SNAPSHOT",
        ]
        .iter()
        .map(|s| v(s))
        .collect();

        for a in &versions {
            for b in &versions {
                assert_eq!(a.compare_to(b), b.compare_to(a).reverse(), "{} vs {}", a, b);
                for c in &versions {
                    if a.compare_to(b).is_le() && b.compare_to(c).is_le() {
                        assert!(a.compare_to(c).is_le(), "{} <= {} <= {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_has_suffix() {
        assert!(!v("1").has_suffix());
        assert!(!v("1-2").has_suffix());
        assert!(v("1-token").has_suffix());
    }

    #[test]
    fn test_is_release() {
        for text in ["1", "1-2", "1-release", "1-r", "1-final", "1-ga", "1-sp", "1.0.Final"] {
            assert!(v(text).is_release(), "{}", text);
        }
        for text in ["1-SNAPSHOT", "1-rc1", "2.5.6.SEC01", "1-token"] {
            assert!(!v(text).is_release(), "{}", text);
        }
    }

    #[test]
    fn test_is_snapshot() {
        assert!(!v("1").is_snapshot());
        assert!(v("1-SNAPSHOT").is_snapshot());
        assert!(v("1-SNAPSHOT2").is_snapshot());
        assert!(v("1-SNAPSHOT-2").is_snapshot());
    }

    #[test]
    fn test_is_rc() {
        assert!(!v("1").is_rc());
        for text in ["1-RC", "1-rc2", "1-rc-2", "1-cr", "1-cr2", "1-cr-2"] {
            assert!(v(text).is_rc(), "{}", text);
        }
    }

    #[test]
    fn test_is_milestone() {
        assert!(!v("1").is_milestone());
        for text in ["1-milestone", "1-MILESTONE2", "1-milestone-2", "1-m", "1-m2", "1-m-2"] {
            assert!(v(text).is_milestone(), "{}", text);
        }
    }

    #[test]
    fn test_is_beta() {
        assert!(!v("1").is_beta());
        for text in ["1-beta", "1-beta2", "1-BETA-2", "1-b", "1-b2", "1-b-2"] {
            assert!(v(text).is_beta(), "{}", text);
        }
    }

    #[test]
    fn test_is_alpha() {
        assert!(!v("1").is_alpha());
        for text in ["1-alpha", "1-alpha2", "1-alpha-2", "1-a", "1-a2", "1-a-2"] {
            assert!(v(text).is_alpha(), "{}", text);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("1.2.3-rc.4")).unwrap();
        assert_eq!(json, "\"1.2.3-rc.4\"");

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("1.2.3-rc.4"));

        assert!(serde_json::from_str::<Version>("\"not a version\"").is_err());
    }
}
