use semver::{Prerelease, Version};

/// Parse a catalog version string into a semver::Version.
///
/// Versions with exactly two numeric components get a `.0` patch appended
/// before parsing; anything else is parsed as-is.
///
/// Examples:
/// - "1.16" -> Version(1, 16, 0)
/// - "1.16.5" -> Version(1, 16, 5)
/// - "1.14.4-pre1" -> Version(1, 14, 4-pre1)
/// - "23w13a" -> None
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let is_numeric = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    if parts.len() == 2 && parts.iter().all(|part| is_numeric(part)) {
        Version::parse(&format!("{version}.0")).ok()
    } else {
        Version::parse(version).ok()
    }
}

/// A version that may leave trailing components unspecified (`1`, `1.2`, `1.x`, `*`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialVersion {
    /// `*`, `x`, `X` or empty
    Any,
    /// `1`, `1.x`
    Major(u64),
    /// `1.2`, `1.2.x`
    Minor(u64, u64),
    /// `1.2.3`, `1.2.3-rc.1`
    Full(Version),
}

impl PartialVersion {
    /// Parse a partial version. A leading `v` is accepted.
    ///
    /// Once a component is a wildcard the remaining components are ignored.
    /// Prerelease and build metadata are only accepted on full versions.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        let spec = spec.strip_prefix('v').unwrap_or(spec);

        if spec.is_empty() || is_wildcard(spec) {
            return Some(PartialVersion::Any);
        }

        let core_end = spec.find(['-', '+']).unwrap_or(spec.len());
        let core = &spec[..core_end];
        let parts: Vec<&str> = core.split('.').collect();

        if parts.len() > 3 {
            return None;
        }

        let mut numbers = Vec::with_capacity(3);
        for part in &parts {
            if is_wildcard(part) {
                break;
            }
            numbers.push(parse_component(part)?);
        }

        let has_suffix = core_end < spec.len();
        match numbers.as_slice() {
            [] if !has_suffix => Some(PartialVersion::Any),
            [major] if !has_suffix => Some(PartialVersion::Major(*major)),
            [major, minor] if !has_suffix => Some(PartialVersion::Minor(*major, *minor)),
            [_, _, _] => Version::parse(spec).ok().map(PartialVersion::Full),
            _ => None,
        }
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "*" | "x" | "X")
}

fn parse_component(part: &str) -> Option<u64> {
    // Leading zeros are not valid semver
    if part.is_empty() || (part.len() > 1 && part.starts_with('0')) {
        return None;
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// `major.minor.patch-0`: the smallest version with this core.
///
/// Used as an exclusive upper bound so that prereleases of the next
/// version are excluded as well.
pub fn exclusive_bound(major: u64, minor: u64, patch: u64) -> Option<Version> {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").ok()?;
    Some(version)
}
