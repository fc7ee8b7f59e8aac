//! Stable exit codes for the wrapper.
//!
//! When the tool itself fails, its own status is passed through instead.

/// The tool ran and exited successfully.
pub const OK: i32 = 0;
/// The wrapper refused to run or could not start the tool (missing
/// variables, bad settings, activation failure, tool not found).
pub const FAILURE: i32 = 1;
/// Added to the signal number when the tool is killed by a signal.
pub const SIGNAL_BASE: i32 = 128;
