//! Runtime validation: make sure `python3` resolves, auto-installing it on
//! macOS (consent-gated, via Homebrew) and failing with guidance on Linux.

use anyhow::Result;
use std::env;
use std::fs;
use std::process::Command;

use crate::context::{BootstrapContext, BREW, PYTHON};
use crate::error::BootstrapError;
use crate::exec;
use crate::platform::OsFamily;
use crate::prompt::{Consent, Prompter};
use crate::venv;

const HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Ensure the runtime is present, then drive isolated-environment setup.
pub fn ensure_runtime(ctx: &mut BootstrapContext, prompter: &mut dyn Prompter) -> Result<()> {
    if which::which(PYTHON).is_ok() {
        ctx.runtime_present = true;
        tracing::info!("{PYTHON} already available");
        return venv::ensure_isolated_env(ctx);
    }

    match ctx.os_family {
        OsFamily::MacOs => install_runtime_macos(ctx, prompter)?,
        OsFamily::Linux => {
            // No automatic installer on Linux; documented asymmetry.
            return Err(BootstrapError::InstallationFailure(format!(
                "{PYTHON} not found; install it with your distribution's package \
                 manager (e.g. apt install python3) and re-run"
            ))
            .into());
        }
    }

    venv::ensure_isolated_env(ctx)
}

fn install_runtime_macos(ctx: &mut BootstrapContext, prompter: &mut dyn Prompter) -> Result<()> {
    if which::which(BREW).is_ok() {
        tracing::info!("Homebrew already installed");
    } else {
        let consent =
            prompter.confirm("Homebrew is required to install Python 3. Install Homebrew now?")?;
        if consent == Consent::Denied {
            return Err(BootstrapError::Aborted("Homebrew install declined".into()).into());
        }
        install_homebrew()?;
    }

    if prompter.confirm("Install Python 3 via Homebrew?")? == Consent::Denied {
        return Err(BootstrapError::Aborted("Python 3 install declined".into()).into());
    }

    tracing::info!("installing {PYTHON} via Homebrew");
    let mut install = Command::new(BREW);
    install.args(["install", "python3"]);
    exec::run_checked(&mut install, "brew install python3")?;

    ctx.runtime_present = true;
    Ok(())
}

/// Fetch the upstream install script and run it through bash, mirroring the
/// documented Homebrew installation flow.
fn install_homebrew() -> Result<()> {
    tracing::info!("installing Homebrew");
    let script = env::temp_dir().join("envboot_install_homebrew.sh");

    let mut download = Command::new("curl");
    download.args(["-fsSL", HOMEBREW_INSTALL_URL, "-o"]).arg(&script);
    exec::run_checked(&mut download, "download Homebrew install script")?;

    let mut install = Command::new("/bin/bash");
    install.arg(&script);
    let result = exec::run_checked(&mut install, "Homebrew install script");
    let _ = fs::remove_file(&script);
    result
}
