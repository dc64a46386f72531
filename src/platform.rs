//! Host platform classification from the kernel name.

use anyhow::{Context, Result};
use std::fmt;
use std::process::Command;

use crate::error::BootstrapError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsFamily {
    MacOs,
    Linux,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::MacOs => write!(f, "macOS"),
            OsFamily::Linux => write!(f, "Linux"),
        }
    }
}

/// Map a kernel name to a supported family. Anything outside
/// Darwin/Linux is fatal before any other bootstrap step runs.
pub fn classify(kernel: &str) -> Result<OsFamily, BootstrapError> {
    match kernel.trim() {
        "Darwin" => Ok(OsFamily::MacOs),
        "Linux" => Ok(OsFamily::Linux),
        other => Err(BootstrapError::UnsupportedPlatform {
            kernel: other.to_string(),
        }),
    }
}

/// Detect the host family from `uname -s`.
pub fn detect() -> Result<OsFamily> {
    let output = Command::new("uname")
        .arg("-s")
        .output()
        .context("run uname -s")?;
    let kernel = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let family = classify(&kernel)?;
    tracing::info!(%kernel, "detected {family} host");
    Ok(family)
}
