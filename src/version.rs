//! Derives the next release version by bumping the trailing numeric segment.
use log::*;
use regex::Regex;
use std::sync::LazyLock;

use crate::{ReleaseError, Result};

/// Version shape accepted by [`next_version`]: an optional "v", two numeric
/// segments and a trailing numeric segment that gets incremented.
pub const VERSION_PATTERN: &str = r"(v?[0-9]+\.[0-9]+\.)([0-9]+)";

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{VERSION_PATTERN}")).unwrap()
});

/// Compute the version following `version` by incrementing its last numeric
/// segment. The result keeps the zero-padding width of the original segment
/// and is allowed to grow a digit on overflow ("09" -> "10", "99" -> "100").
///
/// Only the start of `version` has to match [`VERSION_PATTERN`]; anything
/// after the trailing numeric segment is not carried over.
pub fn next_version(version: &str) -> Result<String> {
    let captures = VERSION_REGEX
        .captures(version)
        .ok_or_else(|| ReleaseError::invalid_version(version, VERSION_PATTERN))?;

    let prefix = &captures[1];
    let patch = &captures[2];
    let width = patch.len();

    let current: u64 = patch
        .parse()
        .map_err(|_| ReleaseError::invalid_version(version, VERSION_PATTERN))?;

    let bumped = current
        .checked_add(1)
        .ok_or_else(|| ReleaseError::invalid_version(version, VERSION_PATTERN))?;

    let next = format!("{prefix}{bumped:0width$}");

    debug!("incremented {patch} to {bumped} keeping width {width}");

    Ok(next)
}
