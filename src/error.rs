//! Fatal bootstrap error taxonomy.
//!
//! Every step returns `Result`; only `main` maps these kinds to a process
//! exit status, so no step terminates the process itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("unsupported platform: kernel {kernel:?} (expected Darwin or Linux)")]
    UnsupportedPlatform { kernel: String },

    /// Consent was denied for an install the bootstrap cannot proceed without.
    #[error("aborted: {0}")]
    Aborted(String),

    /// An external tool exited non-zero during an install or sync step.
    #[error("installation failed: {0}")]
    InstallationFailure(String),

    #[error("environment activation failed: {0}")]
    ActivationFailure(String),
}

impl BootstrapError {
    /// Exit codes are deliberately undifferentiated: every fatal kind is 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
