//! Version classification and range matching
//!
//! This module turns declared version ranges into the subset of a known
//! game-version catalog they are compatible with.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Interval   │────▶│    Range     │────▶│   Catalog    │
//! │ ([1.19,1.20))│     │(>=1.19 <1.20)│     │  (versions)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │    Semver    │
//!                      │(parse, pad)  │
//!                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Known game versions and their classification
//! - [`classifier`]: Maturity (alpha/beta/release) of a version string
//! - [`interval`]: Interval notation to comparator-list translation
//! - [`range`]: Comparator-list matching against catalog versions
//! - [`semver`]: Version parsing and normalization helpers

pub mod catalog;
pub mod classifier;
pub mod interval;
pub mod range;
pub mod semver;
