//! Centralized defaults for the billing service
//!
//! Single source of truth for default values used across the workspace.

/// Parser window sizes, in characters of normalized text
///
/// Chosen empirically on spoken restaurant and shop orders; not derived.
/// They are exposed through `ParserConfig` so they can be tuned against a
/// real transcript corpus.
pub mod windows {
    /// Characters before an alias match inspected for a conflicting qualifier
    pub const QUALIFIER_WINDOW_CHARS: usize = 14;

    /// Characters before an alias match searched for a quantity
    pub const QUANTITY_LOOKBEHIND_CHARS: usize = 14;

    /// Characters after an alias match searched for a quantity
    pub const QUANTITY_LOOKAHEAD_CHARS: usize = 10;

    /// Upper bound accepted for any window
    pub const MAX_WINDOW_CHARS: usize = 64;
}

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
}

/// Fallback biller defaults
pub mod fallback {
    pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;
}

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "VOICE_BILL";
