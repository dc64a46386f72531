//! Dual-strategy dependency installation: prefer the `uv` resolver when it
//! resolves on the search path, fall back to pip otherwise.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::context::{BootstrapContext, ENV_DIR, PYTHON, UV};
use crate::exec;
use crate::prompt::{Consent, Prompter};
use crate::venv;

/// Materialize the manifest into the active environment.
///
/// Resolver present: re-provision with `uv venv`, activate, `uv pip sync`.
/// Resolver absent: offer to install it; on denial, fall back to pip against
/// the environment from runtime setup. Re-running with an unchanged manifest
/// is a no-op beyond the installers' own idempotent semantics.
pub fn install(
    ctx: &mut BootstrapContext,
    prompter: &mut dyn Prompter,
    manifest: &Path,
) -> Result<()> {
    ctx.resolver_present = which::which(UV).is_ok();
    if ctx.resolver_present {
        return sync_with_resolver(ctx, manifest);
    }

    match prompter.confirm("uv is not installed. Install uv for faster dependency syncs?")? {
        Consent::Granted => {
            install_resolver(ctx)?;
            ctx.resolver_present = true;
            sync_with_resolver(ctx, manifest)
        }
        Consent::Denied => install_with_pip(ctx, manifest),
    }
}

fn sync_with_resolver(ctx: &mut BootstrapContext, manifest: &Path) -> Result<()> {
    tracing::info!("provisioning virtualenv with uv");
    let mut provision = ctx.command(UV);
    provision.args(["venv", ENV_DIR]);
    exec::run_checked(&mut provision, "uv venv")?;

    venv::activate_env(ctx, PathBuf::from(ENV_DIR))?;

    tracing::info!(manifest = %manifest.display(), "syncing dependencies with uv");
    let mut sync = ctx.command(UV);
    sync.args(["pip", "sync"]).arg(manifest);
    exec::run_checked(&mut sync, "uv pip sync")
}

fn install_resolver(ctx: &BootstrapContext) -> Result<()> {
    tracing::info!("installing uv with pip");
    let mut install = ctx.command(PYTHON);
    install.args(["-m", "pip", "install", UV]);
    exec::run_checked(&mut install, "pip install uv")
}

fn install_with_pip(ctx: &mut BootstrapContext, manifest: &Path) -> Result<()> {
    if !ctx.env_active() {
        venv::ensure_isolated_env(ctx)?;
    }

    tracing::info!("upgrading pip");
    let mut upgrade = ctx.command(PYTHON);
    upgrade.args(["-m", "pip", "install", "--upgrade", "pip"]);
    exec::run_checked(&mut upgrade, "pip upgrade")?;

    tracing::info!(manifest = %manifest.display(), "installing dependencies with pip");
    let mut install = ctx.command(PYTHON);
    install.args(["-m", "pip", "install", "-r"]).arg(manifest);
    exec::run_checked(&mut install, "pip install -r")
}
