//! Application-wide constants
//!
//! This module contains all constant values used throughout the gateway.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Extra room in the request body for JSON framing around `code`
pub const BODY_LIMIT_OVERHEAD_BYTES: usize = 64 * 1024;

/// Worst-case growth of a string when JSON-escaped (`\u00XX`)
pub const JSON_ESCAPE_FACTOR: usize = 6;

// =============================================================================
// ENGINE DEFAULTS
// =============================================================================

/// Environment variable overriding the engine binary location
pub const ENGINE_BIN_ENV: &str = "SENTINEL_BIN";

/// Default engine binary location
pub const DEFAULT_ENGINE_BIN: &str = "./sentinel";

/// Default wall-clock limit for one engine invocation
pub const DEFAULT_ENGINE_TIMEOUT_SECONDS: u64 = 10;

/// How long to keep draining engine pipes once the process is gone
pub const DEFAULT_ENGINE_OUTPUT_GRACE_MS: u64 = 500;

// =============================================================================
// SUBMISSION LIMITS
// =============================================================================

/// Maximum UTF-8 byte length of submitted code (~200 KB)
pub const DEFAULT_MAX_CODE_BYTES: usize = 200_000;

/// Maximum length of the advisory `filename` label
pub const MAX_FILENAME_LENGTH: u64 = 255;

/// Label assumed when the caller does not name the submission
pub const DEFAULT_SOURCE_FILENAME: &str = "submission.c";

// =============================================================================
// WORKSPACE
// =============================================================================

/// Prefix of every workspace file name
pub const WORKSPACE_PREFIX: &str = "sentinel-";

/// Suffix of every workspace file name
pub const WORKSPACE_SUFFIX: &str = ".c";

// =============================================================================
// VERDICT FIELDS
// =============================================================================

/// Field the gateway adds to every verdict
pub const SOURCE_FILE_FIELD: &str = "source_file";
