//! Pattern matching collaborator contract.
//!
//! Name and tag filters match through a [`PatternMatcher`] so the glob
//! dialect stays pluggable. [`GlobMatcher`] is the default, backed by
//! `globset` with `**` crossing path separators (the registry
//! convention for repository names like `library/**`).

use thiserror::Error;

/// A pattern that failed to compile.
#[derive(Debug, Error)]
#[error("invalid pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    source: globset::Error,
}

/// Matches candidate strings against glob-style patterns.
pub trait PatternMatcher {
    /// An empty pattern matches everything.
    fn matches(&self, pattern: &str, candidate: &str) -> Result<bool, PatternError>;
}

/// Default matcher: `globset` globs with literal path separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl PatternMatcher for GlobMatcher {
    fn matches(&self, pattern: &str, candidate: &str) -> Result<bool, PatternError> {
        if pattern.is_empty() {
            return Ok(true);
        }
        let glob = globset::GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| PatternError {
                pattern: pattern.to_owned(),
                source: e,
            })?;
        Ok(glob.compile_matcher().is_match(candidate))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
