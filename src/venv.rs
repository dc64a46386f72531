//! Isolated environment lifecycle: create `.venv` when missing, reuse it when
//! present, and activate it into the bootstrap context.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::context::{BootstrapContext, ENV_DIR, PYTHON};
use crate::error::BootstrapError;
use crate::exec;
use crate::platform::OsFamily;

/// Ensure an isolated environment exists and is active in the context.
///
/// An already-active environment (`VIRTUAL_ENV` set by the caller's shell) is
/// reused as-is. An existing `.venv` directory short-circuits creation and is
/// trusted as provisioned; only a missing directory triggers `python3 -m venv`.
pub fn ensure_isolated_env(ctx: &mut BootstrapContext) -> Result<()> {
    if let Some(active) = env::var_os("VIRTUAL_ENV").filter(|value| !value.is_empty()) {
        let env_path = PathBuf::from(active);
        if env_path.is_dir() {
            tracing::info!(path = %env_path.display(), "virtualenv already active, reusing");
            ctx.isolation_tool_present = true;
            return activate_env(ctx, env_path);
        }
        tracing::warn!(
            path = %env_path.display(),
            "VIRTUAL_ENV points at a missing directory, ignoring"
        );
    }

    ensure_venv_module(ctx)?;

    let env_path = PathBuf::from(ENV_DIR);
    if env_path.is_dir() {
        tracing::info!("{ENV_DIR} already provisioned");
    } else {
        tracing::info!("creating virtualenv at {ENV_DIR}");
        let mut create = ctx.command(PYTHON);
        create.args(["-m", "venv", ENV_DIR]);
        exec::run_checked(&mut create, "python3 -m venv")?;
    }

    activate_env(ctx, env_path)
}

/// Activate an environment directory: verify its interpreter and activation
/// artifact, then record the overrides in the context.
pub fn activate_env(ctx: &mut BootstrapContext, env_path: PathBuf) -> Result<()> {
    // Absolute paths keep the overrides valid for subprocesses with their
    // own working directories.
    let env_path = env_path.canonicalize().unwrap_or(env_path);
    let bin_dir = env_path.join("bin");
    if !bin_dir.join("python").is_file() || !bin_dir.join("activate").is_file() {
        return Err(BootstrapError::ActivationFailure(format!(
            "{} is missing its interpreter or activation script",
            env_path.display()
        ))
        .into());
    }
    tracing::info!(path = %env_path.display(), "activating virtualenv");
    ctx.activate(env_path);
    Ok(())
}

/// Verify `python3` can create virtualenvs at all; remediation differs by
/// platform because Debian-family distros split venv into its own package.
fn ensure_venv_module(ctx: &mut BootstrapContext) -> Result<()> {
    let mut check = ctx.command(PYTHON);
    check.args(["-c", "import venv, ensurepip"]);
    let status = exec::probe(&mut check)?;
    if !status.success() {
        let remediation = match ctx.os_family {
            OsFamily::MacOs => "reinstall Python 3 (brew reinstall python3)",
            OsFamily::Linux => "install the venv module (e.g. apt install python3-venv)",
        };
        return Err(BootstrapError::InstallationFailure(format!(
            "{PYTHON} cannot create virtualenvs; {remediation}"
        ))
        .into());
    }
    ctx.isolation_tool_present = true;
    Ok(())
}
