//! envboot: provision a Python environment, then run the wrapped program.
//!
//! The tool takes no flags of its own; every argument is forwarded verbatim
//! to the wrapped program. Behavior toggles come from environment variables
//! (`NO_POPUP`, `DEBUG_LOG`, `VIRTUAL_ENV`).

use clap::Parser;

mod context;
mod error;
mod exec;
mod install;
mod logging;
mod orchestrator;
mod platform;
mod prompt;
mod runtime;
mod venv;

use error::BootstrapError;

#[derive(Parser, Debug)]
#[command(
    name = "envboot",
    about = "Bootstrap a Python environment, then run the wrapped program",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Arguments forwarded verbatim to the wrapped program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let mut prompter = prompt::from_env();

    // The only place a fatal condition becomes a process exit status.
    let code = match orchestrator::run(&cli.args, prompter.as_mut()) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            err.downcast_ref::<BootstrapError>()
                .map(BootstrapError::exit_code)
                .unwrap_or(1)
        }
    };
    std::process::exit(code);
}
