//! Interval-notation version ranges
//!
//! Translates ranges such as `[1.16,1.17)` or `(,1.16],[1.18,1.20),1.21`
//! into comparator-list expressions understood by [`match_semver`].
//!
//! | Interval    | Expression     |
//! |-------------|----------------|
//! | `(,hi]`     | `<=hi`         |
//! | `(,hi)`     | `<hi`          |
//! | `[v]`       | `v`            |
//! | `[lo,)`     | `>=lo`         |
//! | `(lo,)`     | `>lo`          |
//! | `(lo,hi)`   | `>lo <hi`      |
//! | `[lo,hi]`   | `>=lo <=hi`    |
//! | `(lo,hi]`   | `>lo <=hi`     |
//! | `[lo,hi)`   | `>=lo <hi`     |
//!
//! A segment without brackets is an exact version.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::version::range::match_semver;

/// Interval shapes, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntervalForm {
    AtMost,
    Below,
    Exactly,
    AtLeast,
    Above,
    Open,
    Closed,
    OpenClosed,
    ClosedOpen,
}

impl IntervalForm {
    const PATTERNS: [(&'static str, IntervalForm); 9] = [
        (r"^\(,(.*)\]$", IntervalForm::AtMost),
        (r"^\(,(.*)\)$", IntervalForm::Below),
        (r"^\[([^,]*)\]$", IntervalForm::Exactly),
        (r"^\[(.*),\)$", IntervalForm::AtLeast),
        (r"^\((.*),\)$", IntervalForm::Above),
        (r"^\((.*),(.*)\)$", IntervalForm::Open),
        (r"^\[(.*),(.*)\]$", IntervalForm::Closed),
        (r"^\((.*),(.*)\]$", IntervalForm::OpenClosed),
        (r"^\[(.*),(.*)\)$", IntervalForm::ClosedOpen),
    ];

    fn comparator(self, caps: &Captures<'_>) -> String {
        let first = caps.get(1).map_or("", |m| m.as_str());
        let second = caps.get(2).map_or("", |m| m.as_str());

        match self {
            IntervalForm::AtMost => format!("<={first}"),
            IntervalForm::Below => format!("<{first}"),
            IntervalForm::Exactly => first.to_string(),
            IntervalForm::AtLeast => format!(">={first}"),
            IntervalForm::Above => format!(">{first}"),
            IntervalForm::Open => format!(">{first} <{second}"),
            IntervalForm::Closed => format!(">={first} <={second}"),
            IntervalForm::OpenClosed => format!(">{first} <={second}"),
            IntervalForm::ClosedOpen => format!(">={first} <{second}"),
        }
    }
}

static INTERVAL_FORMS: LazyLock<Vec<(Regex, IntervalForm)>> = LazyLock::new(|| {
    IntervalForm::PATTERNS
        .iter()
        .map(|(pattern, form)| (Regex::new(pattern).expect("valid interval pattern"), *form))
        .collect()
});

/// Split an interval expression into segments.
///
/// Each bracketed segment ends at whichever of `)` or `]` comes first,
/// regardless of the opening bracket. Text left over once no more
/// brackets open is kept as one trailing bare segment. Blank input has
/// no segments.
fn split_segments(expr: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = expr.trim();

    while rest.starts_with(['(', '[']) {
        let Some(end) = rest.find([')', ']']) else {
            break;
        };
        segments.push(&rest[..=end]);

        rest = rest[end + 1..].trim();
        if let Some(stripped) = rest.strip_prefix(',') {
            rest = stripped.trim();
        }
    }

    if !rest.is_empty() {
        segments.push(rest);
    }

    segments
}

/// Translate one segment into a comparator-list expression
fn translate_segment(segment: &str) -> Option<String> {
    if !segment.starts_with(['(', '[']) {
        return Some(segment.to_string());
    }

    INTERVAL_FORMS.iter().find_map(|(pattern, form)| {
        pattern
            .captures(segment)
            .map(|caps| form.comparator(&caps))
    })
}

/// Translate an interval expression into comparator-list expressions,
/// one per segment. Segments that match no interval shape are dropped.
pub fn translate_interval(expr: &str) -> Vec<String> {
    split_segments(expr)
        .into_iter()
        .filter_map(|segment| {
            let translated = translate_segment(segment);
            if translated.is_none() {
                debug!("Dropping unrecognized interval segment '{}'", segment);
            }
            translated
        })
        .collect()
}

/// Return the versions inside any interval of `expr`, in input order
pub fn match_interval(expr: &str, versions: &[String]) -> Vec<String> {
    if expr.is_empty() {
        return Vec::new();
    }
    match_semver(&translate_interval(expr), versions)
}
