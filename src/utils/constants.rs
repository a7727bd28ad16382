//! Unified constants module for toolbelt
//!
//! Centralizes the tunables shared across modules so sizes and formats
//! stay consistent between hashing and verification, logging and the CLI.

// ============================================================================
// Hash Record Layout (security module)
// ============================================================================

/// Random salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Derived key length in bytes (the PBKDF2-HMAC-SHA1 output width).
pub const KEY_SIZE: usize = 20;

/// PBKDF2 iteration count. Changing this invalidates every existing record.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

// ============================================================================
// Logger
// ============================================================================

/// Timestamp format for log lines (local time, long form).
pub const LOG_TIME_FORMAT: &str = "%H:%M:%S";

/// Log file used by the CLI when --file is not given.
pub const DEFAULT_LOG_FILE: &str = "toolbelt.log";

// ============================================================================
// Timer
// ============================================================================

/// Countdown tick interval in milliseconds.
pub const TICK_MILLIS: u64 = 1000;

// ============================================================================
// Commander
// ============================================================================

/// Prompt written before each read of the command loop.
pub const PROMPT: &str = "> ";

/// Reserved keyword that terminates the command loop (case-insensitive).
pub const EXIT_KEYWORD: &str = "exit";
