//! Linear bootstrap pipeline: detect platform, ensure runtime and
//! environment, install dependencies, run the wrapped program, deactivate.

use anyhow::Result;
use std::path::Path;
use std::process::ExitStatus;

use crate::context::{BootstrapContext, MANIFEST_PATH, PYTHON};
use crate::install;
use crate::platform;
use crate::prompt::Prompter;
use crate::runtime;

/// Entry point of the wrapped program, invoked through the activated
/// environment's interpreter.
pub const DOWNSTREAM_ENTRY: &str = "main.py";

/// Run the full pipeline and return the process exit code.
///
/// The wrapped program's exit status is the run's status; deactivation always
/// happens but cannot mask it.
pub fn run(args: &[String], prompter: &mut dyn Prompter) -> Result<i32> {
    let os_family = platform::detect()?;
    let mut ctx = BootstrapContext::new(os_family);

    runtime::ensure_runtime(&mut ctx, prompter)?;
    install::install(&mut ctx, prompter, Path::new(MANIFEST_PATH))?;

    let status = invoke_downstream(&ctx, args);
    if let Some(env_path) = ctx.env_path() {
        tracing::info!(path = %env_path.display(), "virtualenv deactivated");
    }
    ctx.deactivate();

    let status = status?;
    Ok(exit_code_of(status))
}

fn invoke_downstream(ctx: &BootstrapContext, args: &[String]) -> Result<ExitStatus> {
    tracing::info!(entry = DOWNSTREAM_ENTRY, "starting wrapped program");
    let mut command = ctx.command(PYTHON);
    command.arg(DOWNSTREAM_ENTRY);
    command.args(args);
    crate::exec::run(&mut command)
}

fn exit_code_of(status: ExitStatus) -> i32 {
    // Signal-terminated processes have no code; report failure.
    status.code().unwrap_or(1)
}
