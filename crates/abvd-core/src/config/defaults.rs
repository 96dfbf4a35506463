//! Default values for abvd configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Download Defaults
// ============================================================================

/// Export endpoint; `{db}` and `{id}` are filled per request.
pub const DEFAULT_BASE_URL: &str =
    "http://abvd.shh.mpg.de/utils/save/?type=xml&section={db}&language={id}";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum number of requests in flight during a batch download.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// First language id of a batch download.
pub const DEFAULT_START_ID: u32 = 1;

/// Upper bound (exclusive) of language ids for batch downloads.
pub const DEFAULT_MAX_LANGUAGE_ID: u32 = 1800;

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "abvd-data";

/// Extension of raw downloads.
pub const RAW_EXTENSION: &str = "xml";

/// Extension of parsed documents.
pub const DOCUMENT_EXTENSION: &str = "json";

// ============================================================================
// Config Files
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "abvd.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "abvd";

/// User config file name.
pub const USER_CONFIG_FILE: &str = "config.toml";
