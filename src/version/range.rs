//! Comparator-list range matching
//!
//! Expressions follow the npm semver range grammar:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `>=1.2.0 <2.0.0` - space-separated comparators, all must satisfy
//! - `1.2.x || >=2.0.0` - alternatives, any must satisfy
//! - `^1.2.3`, `~1.2.3` - caret and tilde ranges
//! - `1.2`, `1.x`, `*` - partial versions behave as wildcards
//! - `1.0.0 - 2.0.0` - hyphen range (inclusive)
//!
//! Partial versions widen to the whole range they name, so `<=1.16`
//! accepts every `1.16.x`, and `>1.16` starts at `1.17.0`.

use semver::Version;
use tracing::debug;

use crate::version::semver::{PartialVersion, exclusive_bound, parse_version};

/// Return the versions satisfying at least one of `ranges`, in input order.
///
/// An empty `ranges` list matches nothing. Versions that cannot be parsed
/// and expressions that cannot be parsed never match.
pub fn match_semver<S: AsRef<str>>(ranges: &[S], versions: &[String]) -> Vec<String> {
    if ranges.is_empty() {
        return Vec::new();
    }

    let specs: Vec<RangeSpec> = ranges
        .iter()
        .filter_map(|range| {
            let range = range.as_ref();
            let spec = RangeSpec::parse(range);
            if spec.is_none() {
                debug!("Ignoring unparseable version range '{}'", range);
            }
            spec
        })
        .collect();

    versions
        .iter()
        .filter(|version| {
            parse_version(version)
                .is_some_and(|parsed| specs.iter().any(|spec| spec.satisfies(&parsed)))
        })
        .cloned()
        .collect()
}

/// A parsed range expression: alternatives separated by `||`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    /// Any alternative must be satisfied (OR)
    alternatives: Vec<ComparatorSet>,
}

impl RangeSpec {
    /// Parse a range expression. Returns `None` if any comparator is invalid.
    pub fn parse(spec: &str) -> Option<Self> {
        let alternatives: Option<Vec<ComparatorSet>> =
            spec.split("||").map(ComparatorSet::parse).collect();

        alternatives.map(|alternatives| RangeSpec { alternatives })
    }

    /// Check if a version satisfies any alternative
    pub fn satisfies(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|set| set.satisfies(version))
    }
}

/// Space-separated comparators, all of which must be satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComparatorSet {
    comparators: Vec<Comparator>,
}

impl ComparatorSet {
    fn parse(spec: &str) -> Option<Self> {
        let tokens: Vec<&str> = spec.split_whitespace().collect();
        let mut comparators = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            // Hyphen range: "1.0.0 - 2.0.0"
            if i + 2 < tokens.len() && tokens[i + 1] == "-" {
                comparators.extend(Self::parse_hyphen(tokens[i], tokens[i + 2])?);
                i += 3;
                continue;
            }

            // Operator separated from its version: ">= 1.2.0"
            if Operator::is_bare(tokens[i]) && i + 1 < tokens.len() {
                let joined = format!("{}{}", tokens[i], tokens[i + 1]);
                comparators.extend(Self::parse_comparator(&joined)?);
                i += 2;
                continue;
            }

            comparators.extend(Self::parse_comparator(tokens[i])?);
            i += 1;
        }

        // An empty set behaves like `*`
        if comparators.is_empty() {
            comparators.push(Comparator::Any);
        }

        Some(ComparatorSet { comparators })
    }

    /// Parse a single comparator token such as `>=1.2` or `^1.2.3`
    fn parse_comparator(token: &str) -> Option<Vec<Comparator>> {
        let (operator, rest) = Operator::split(token);
        let partial = PartialVersion::parse(rest)?;
        operator.desugar(partial)
    }

    /// Parse hyphen range bounds: partial lower bounds are zero-filled,
    /// partial upper bounds widen to the whole range they name
    fn parse_hyphen(from: &str, to: &str) -> Option<Vec<Comparator>> {
        let lower = match PartialVersion::parse(from)? {
            PartialVersion::Any => Comparator::Any,
            PartialVersion::Major(major) => Comparator::Gte(Version::new(major, 0, 0)),
            PartialVersion::Minor(major, minor) => Comparator::Gte(Version::new(major, minor, 0)),
            PartialVersion::Full(v) => Comparator::Gte(v),
        };
        let upper = match PartialVersion::parse(to)? {
            PartialVersion::Any => Comparator::Any,
            PartialVersion::Major(major) => {
                Comparator::Lt(exclusive_bound(major.checked_add(1)?, 0, 0)?)
            }
            PartialVersion::Minor(major, minor) => {
                Comparator::Lt(exclusive_bound(major, minor.checked_add(1)?, 0)?)
            }
            PartialVersion::Full(v) => Comparator::Lte(v),
        };
        Some(vec![lower, upper])
    }

    fn satisfies(&self, version: &Version) -> bool {
        if !self.comparators.iter().all(|c| c.satisfies(version)) {
            return false;
        }

        if version.pre.is_empty() {
            return true;
        }

        // A prerelease only matches when a comparator opts into prereleases
        // of the same major.minor.patch
        self.comparators.iter().any(|c| {
            c.version().is_some_and(|bound| {
                !bound.pre.is_empty()
                    && bound.major == version.major
                    && bound.minor == version.minor
                    && bound.patch == version.patch
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Gte,
    Gt,
    Lte,
    Lt,
    Caret,
    Tilde,
}

impl Operator {
    const PREFIXES: [(&'static str, Operator); 8] = [
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("~>", Operator::Tilde),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("=", Operator::Eq),
        ("^", Operator::Caret),
        ("~", Operator::Tilde),
    ];

    /// Split the leading operator off a token (bare versions are `Eq`)
    fn split(token: &str) -> (Operator, &str) {
        Self::PREFIXES
            .iter()
            .find_map(|(prefix, op)| token.strip_prefix(prefix).map(|rest| (*op, rest)))
            .unwrap_or((Operator::Eq, token))
    }

    fn is_bare(token: &str) -> bool {
        Self::PREFIXES.iter().any(|(prefix, _)| *prefix == token)
    }

    /// Expand an operator applied to a partial version into plain comparators
    fn desugar(self, partial: PartialVersion) -> Option<Vec<Comparator>> {
        use PartialVersion::{Any, Full, Major, Minor};

        let comparators = match (self, partial) {
            // `>*` and `<*` can never be satisfied
            (Operator::Gt | Operator::Lt, Any) => vec![Comparator::Lt(exclusive_bound(0, 0, 0)?)],
            (_, Any) => vec![Comparator::Any],

            (Operator::Eq | Operator::Tilde | Operator::Caret, Major(major)) => vec![
                Comparator::Gte(Version::new(major, 0, 0)),
                Comparator::Lt(exclusive_bound(major.checked_add(1)?, 0, 0)?),
            ],
            (Operator::Eq | Operator::Tilde, Minor(major, minor))
            | (Operator::Caret, Minor(major @ 0, minor)) => vec![
                Comparator::Gte(Version::new(major, minor, 0)),
                Comparator::Lt(exclusive_bound(major, minor.checked_add(1)?, 0)?),
            ],
            (Operator::Caret, Minor(major, minor)) => vec![
                Comparator::Gte(Version::new(major, minor, 0)),
                Comparator::Lt(exclusive_bound(major.checked_add(1)?, 0, 0)?),
            ],
            (Operator::Eq, Full(v)) => vec![Comparator::Exact(v)],
            (Operator::Tilde, Full(v)) => {
                let upper = exclusive_bound(v.major, v.minor.checked_add(1)?, 0)?;
                vec![Comparator::Gte(v), Comparator::Lt(upper)]
            }
            (Operator::Caret, Full(v)) => {
                // ^1.2.3 -> <2.0.0, ^0.2.3 -> <0.3.0, ^0.0.3 -> <0.0.4
                let upper = if v.major > 0 {
                    exclusive_bound(v.major.checked_add(1)?, 0, 0)?
                } else if v.minor > 0 {
                    exclusive_bound(0, v.minor.checked_add(1)?, 0)?
                } else {
                    exclusive_bound(0, 0, v.patch.checked_add(1)?)?
                };
                vec![Comparator::Gte(v), Comparator::Lt(upper)]
            }

            (Operator::Gte, Major(major)) => vec![Comparator::Gte(Version::new(major, 0, 0))],
            (Operator::Gte, Minor(major, minor)) => {
                vec![Comparator::Gte(Version::new(major, minor, 0))]
            }
            (Operator::Gte, Full(v)) => vec![Comparator::Gte(v)],

            (Operator::Gt, Major(major)) => {
                vec![Comparator::Gte(Version::new(major.checked_add(1)?, 0, 0))]
            }
            (Operator::Gt, Minor(major, minor)) => {
                vec![Comparator::Gte(Version::new(major, minor.checked_add(1)?, 0))]
            }
            (Operator::Gt, Full(v)) => vec![Comparator::Gt(v)],

            (Operator::Lte, Major(major)) => {
                vec![Comparator::Lt(exclusive_bound(major.checked_add(1)?, 0, 0)?)]
            }
            (Operator::Lte, Minor(major, minor)) => {
                vec![Comparator::Lt(exclusive_bound(major, minor.checked_add(1)?, 0)?)]
            }
            (Operator::Lte, Full(v)) => vec![Comparator::Lte(v)],

            (Operator::Lt, Major(major)) => vec![Comparator::Lt(exclusive_bound(major, 0, 0)?)],
            (Operator::Lt, Minor(major, minor)) => {
                vec![Comparator::Lt(exclusive_bound(major, minor, 0)?)]
            }
            (Operator::Lt, Full(v)) => vec![Comparator::Lt(v)],
        };

        Some(comparators)
    }
}

/// A primitive bound on a full version
#[derive(Debug, Clone, PartialEq, Eq)]
enum Comparator {
    Any,
    Exact(Version),
    Gte(Version),
    Gt(Version),
    Lte(Version),
    Lt(Version),
}

impl Comparator {
    fn satisfies(&self, version: &Version) -> bool {
        match self {
            Comparator::Any => true,
            Comparator::Exact(v) => version == v,
            Comparator::Gte(v) => version >= v,
            Comparator::Gt(v) => version > v,
            Comparator::Lte(v) => version <= v,
            Comparator::Lt(v) => version < v,
        }
    }

    fn version(&self) -> Option<&Version> {
        match self {
            Comparator::Any => None,
            Comparator::Exact(v)
            | Comparator::Gte(v)
            | Comparator::Gt(v)
            | Comparator::Lte(v)
            | Comparator::Lt(v) => Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn matches(spec: &str, version: &str) -> bool {
        let spec = RangeSpec::parse(spec).unwrap();
        spec.satisfies(&Version::parse(version).unwrap())
    }

    #[test]
    fn match_semver_returns_empty_for_empty_ranges() {
        let ranges: [&str; 0] = [];
        let catalog = strings(&["1.16", "1.17"]);

        assert!(match_semver(&ranges, &catalog).is_empty());
    }

    #[test]
    fn match_semver_pads_two_component_catalog_versions() {
        let catalog = strings(&["1.15.2", "1.16", "1.16.5", "1.17"]);

        assert_eq!(
            match_semver(&[">=1.16.0 <1.17.0"], &catalog),
            vec!["1.16", "1.16.5"]
        );
    }

    #[test]
    fn match_semver_ors_across_ranges_and_keeps_catalog_order() {
        let catalog = strings(&["1.20.1", "1.19.4", "1.18.2", "1.17.1", "1.16.5"]);

        assert_eq!(
            match_semver(&["1.16.x", ">=1.19"], &catalog),
            vec!["1.20.1", "1.19.4", "1.16.5"]
        );
    }

    #[test]
    fn match_semver_skips_unparseable_catalog_versions() {
        let catalog = strings(&["23w13a", "1.20", "1.RV-Pre1", "b1.7.3", "1.20.1"]);

        assert_eq!(match_semver(&[">=1.20"], &catalog), vec!["1.20", "1.20.1"]);
    }

    #[test]
    fn match_semver_ignores_unparseable_ranges() {
        let catalog = strings(&["1.19", "1.20"]);

        assert_eq!(match_semver(&["not a range", "1.20"], &catalog), vec!["1.20"]);
        assert!(match_semver(&[">=1.a"], &catalog).is_empty());
    }

    #[rstest]
    #[case("1.16.5", "1.16.5", true)]
    #[case("=1.16.5", "1.16.5", true)]
    #[case("1.16.5", "1.16.4", false)]
    #[case(">=1.16.0 <1.17.0", "1.16.9", true)]
    #[case(">=1.16.0 <1.17.0", "1.17.0", false)]
    #[case(">= 1.16.0", "1.16.0", true)]
    #[case(">1.16.0", "1.16.0", false)]
    #[case("<=1.16.0", "1.16.0", true)]
    #[case("<1.16.0", "1.16.0", false)]
    fn full_version_comparators(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(matches(spec, version), expected);
    }

    #[rstest]
    // A partial version names a whole minor series
    #[case("1.16", "1.16.0", true)]
    #[case("1.16", "1.16.5", true)]
    #[case("1.16", "1.17.0", false)]
    #[case("1", "1.20.4", true)]
    #[case("1", "2.0.0", false)]
    #[case("<=1.16", "1.16.5", true)]
    #[case("<=1.16", "1.17.0", false)]
    #[case("<1.16", "1.15.2", true)]
    #[case("<1.16", "1.16.0", false)]
    #[case(">1.16", "1.16.5", false)]
    #[case(">1.16", "1.17.0", true)]
    #[case(">=1.16", "1.16.0", true)]
    #[case(">=1.16", "1.15.9", false)]
    #[case("*", "0.0.1", true)]
    #[case(">*", "1.0.0", false)]
    #[case("<*", "1.0.0", false)]
    fn partial_version_comparators(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(matches(spec, version), expected);
    }

    #[rstest]
    #[case("^1.2.3", "1.9.9", true)]
    #[case("^1.2.3", "2.0.0", false)]
    #[case("^0.2.3", "0.2.9", true)]
    #[case("^0.2.3", "0.3.0", false)]
    #[case("^0.0.3", "0.0.4", false)]
    #[case("^0.14", "0.14.5", true)]
    #[case("^0.14", "0.15.0", false)]
    #[case("~1.2.3", "1.2.9", true)]
    #[case("~1.2.3", "1.3.0", false)]
    #[case("~1.2", "1.2.0", true)]
    #[case("~>1.2.3", "1.2.4", true)]
    #[case("1.2.x", "1.2.7", true)]
    #[case("1.x", "1.9.0", true)]
    #[case("1.x", "2.0.0", false)]
    fn caret_tilde_and_wildcards(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(matches(spec, version), expected);
    }

    #[rstest]
    #[case("1.0.0 - 2.0.0", "2.0.0", true)]
    #[case("1.0.0 - 2.0.0", "2.0.1", false)]
    #[case("1.0 - 2.0", "2.0.5", true)]
    #[case("1.0 - 2.0", "0.9.9", false)]
    #[case("1.16.x || 1.18.x", "1.18.2", true)]
    #[case("1.16.x || 1.18.x", "1.17.1", false)]
    fn hyphen_and_or_ranges(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(matches(spec, version), expected);
    }

    #[rstest]
    // Prereleases only match comparators that name the same version core
    #[case(">=1.14.0", "1.14.4-pre1", false)]
    #[case(">=1.14.4-pre1", "1.14.4-pre2", true)]
    #[case(">=1.14.4-pre1", "1.14.5-pre1", false)]
    #[case("<=1.16", "1.17.0-pre1", false)]
    #[case("*", "1.17.0-pre1", false)]
    fn prerelease_versions(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(matches(spec, version), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_expression_matches_everything(#[case] spec: &str) {
        assert!(matches(spec, "1.20.1"));
    }

    #[rstest]
    #[case("1.2.3.4")]
    #[case(">=abc")]
    #[case("1.16 - ")]
    // Bounds past the largest representable component
    #[case("<=18446744073709551615")]
    #[case(">18446744073709551615")]
    #[case(">1.18446744073709551615")]
    #[case("~1.18446744073709551615")]
    #[case("^18446744073709551615.0.0")]
    #[case("^0.0.18446744073709551615")]
    #[case("1.0.0 - 1.18446744073709551615")]
    fn invalid_expressions_fail_to_parse(#[case] spec: &str) {
        assert_eq!(RangeSpec::parse(spec), None);
    }

    #[test]
    fn match_semver_treats_overflowing_bounds_as_unparseable() {
        let catalog = strings(&["1.20", "1.20.1"]);

        assert!(match_semver(&["<=18446744073709551615"], &catalog).is_empty());
        assert_eq!(
            match_semver(&["~1.18446744073709551615", "1.20.1"], &catalog),
            vec!["1.20.1"]
        );
    }
}
