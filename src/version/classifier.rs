//! Maturity classification of declared version numbers

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `rc` with a non-letter on both sides (`2.0.0-rc.1`, `1.0-rc-2`)
static RC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-z]rc[^A-z]").expect("valid rc pattern"));

/// `pre` with a non-letter on both sides (`1.0.0-pre.3`)
static PRE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-z]pre[^A-z]").expect("valid pre pattern"));

/// Maturity of a published version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Alpha,
    Beta,
    Release,
}

impl VersionType {
    /// Returns the string representation of the version type
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Alpha => "alpha",
            VersionType::Beta => "beta",
            VersionType::Release => "release",
        }
    }
}

impl std::fmt::Display for VersionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a version string by the markers it contains.
///
/// `alpha` anywhere wins, then `beta` anywhere or a bounded `rc`/`pre` token.
/// Everything else, including the empty string, is a release.
pub fn classify(version: &str) -> VersionType {
    if version.contains("alpha") {
        VersionType::Alpha
    } else if version.contains("beta") || RC_TOKEN.is_match(version) || PRE_TOKEN.is_match(version)
    {
        VersionType::Beta
    } else {
        VersionType::Release
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0.0-alpha.1", VersionType::Alpha)]
    #[case("alpha", VersionType::Alpha)]
    #[case("1.0.0-alpha-beta", VersionType::Alpha)] // alpha checked first
    #[case("1.0.0-beta.2", VersionType::Beta)]
    #[case("1.0beta", VersionType::Beta)]
    #[case("2.0.0-rc.1", VersionType::Beta)]
    #[case("2.0-rc-1", VersionType::Beta)]
    #[case("1.0.0-pre.3", VersionType::Beta)]
    #[case("1.0.0 pre 3", VersionType::Beta)]
    #[case("1.0.0-rc1", VersionType::Beta)]
    #[case("1.0.0", VersionType::Release)]
    #[case("", VersionType::Release)]
    fn classify_returns_expected(#[case] version: &str, #[case] expected: VersionType) {
        assert_eq!(classify(version), expected);
    }

    #[rstest]
    #[case("1.0.0prefix")] // pre followed by a letter
    #[case("rc.1")] // no character before rc
    #[case("1.0-rc")] // no character after rc
    #[case("1.0.0-src.1")] // preceded by a letter
    #[case("1.0_rc_1")] // underscore falls inside A-z
    #[case("1.0.0-preview")] // pre followed by a letter
    #[case("RC-1.0-RC1")] // case-sensitive
    fn classify_unbounded_tokens_are_release(#[case] version: &str) {
        assert_eq!(classify(version), VersionType::Release);
    }

    #[test]
    fn version_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VersionType::Beta).unwrap(),
            "\"beta\""
        );
        assert_eq!(VersionType::Alpha.to_string(), "alpha");
    }
}
