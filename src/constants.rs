//! Centralized constants for the SQL injection guard.
//!
//! Fixed messages, matcher fragments and environment variable names live here
//! so they are easy to find and change in one place.

// =============================================================================
// Violation Constants
// =============================================================================

/// Message carried by every injection violation.
pub const INJECTION_MESSAGE: &str = "sql injection found";

/// Placeholder rendered for absent violation fields.
pub const MISSING_FIELD: &str = "<none>";

/// Maximum number of bytes of an offending value written to logs.
pub const MAX_LOGGED_VALUE_LEN: usize = 200;

// =============================================================================
// Matcher Constants
// =============================================================================

/// Inline block comment that may be spliced into a keyword, `/**/` included.
///
/// The body is lazy so the comment ends at the first `*/`.
pub const INLINE_COMMENT_PATTERN: &str = r"/\*.*?\*/";

/// Gap allowed between the leading and trailing keyword of a rule.
pub const KEYWORD_GAP_PATTERN: &str = ".*";

// =============================================================================
// Environment Variables
// =============================================================================

/// Enables or disables scanning entirely.
pub const ENV_ENABLED: &str = "SQLGUARD_ENABLED";

/// Walks mappings and lists nested inside lists.
pub const ENV_DEEP_LISTS: &str = "SQLGUARD_DEEP_LISTS";

/// Includes offending values in warning logs.
pub const ENV_LOG_VALUES: &str = "SQLGUARD_LOG_VALUES";

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Scanning is on unless explicitly disabled.
pub const DEFAULT_ENABLED: bool = true;

/// Lists are scanned shallowly by default.
pub const DEFAULT_DEEP_LISTS: bool = false;

/// Offending values stay out of logs by default.
pub const DEFAULT_LOG_VALUES: bool = false;
