//! Exit codes for the CLI

/// Success
pub const SUCCESS: u8 = 0;

/// Configuration, manifest or I/O error
pub const ERROR: u8 = 1;

/// One or more packages failed
pub const PACKAGE_FAILURE: u8 = 2;

/// Pre-flight remote check failed
pub const VERIFY_FAILED: u8 = 3;

/// Exit code for the outcome of a batch
pub fn for_outcome(success: bool) -> u8 {
    if success {
        SUCCESS
    } else {
        PACKAGE_FAILURE
    }
}
