//! Per-invocation bootstrap state, threaded explicitly through each step.
//!
//! Activation never mutates the process environment. The context records the
//! overrides and applies them to every `Command` it builds, so the only
//! readers of the activated search path are the subprocesses we spawn.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::platform::OsFamily;

/// Runtime interpreter probed on the search path.
pub const PYTHON: &str = "python3";
/// Fast resolver, preferred over pip when resolvable.
pub const UV: &str = "uv";
/// macOS package manager used for runtime auto-install.
pub const BREW: &str = "brew";

/// Fixed relative path of the isolated environment.
pub const ENV_DIR: &str = ".venv";
/// Fixed relative path of the dependency manifest.
pub const MANIFEST_PATH: &str = "requirements.txt";

#[derive(Debug)]
pub struct BootstrapContext {
    pub os_family: OsFamily,
    pub runtime_present: bool,
    pub isolation_tool_present: bool,
    pub resolver_present: bool,
    env_path: Option<PathBuf>,
    env_active: bool,
}

impl BootstrapContext {
    pub fn new(os_family: OsFamily) -> Self {
        Self {
            os_family,
            runtime_present: false,
            isolation_tool_present: false,
            resolver_present: false,
            env_path: None,
            env_active: false,
        }
    }

    /// Record the environment as active. Callers verify the directory and its
    /// activation artifact exist before calling; the invariant here is only
    /// that one environment is active per invocation.
    pub fn activate(&mut self, env_path: PathBuf) {
        self.env_path = Some(env_path);
        self.env_active = true;
    }

    pub fn deactivate(&mut self) {
        self.env_active = false;
    }

    pub fn env_active(&self) -> bool {
        self.env_active
    }

    pub fn env_path(&self) -> Option<&Path> {
        self.env_path.as_deref()
    }

    /// Build a command for `program`, with the activation overrides applied
    /// when an environment is active: `VIRTUAL_ENV` set and the environment's
    /// `bin` directory first on the search path.
    pub fn command(&self, program: impl AsRef<OsStr>) -> Command {
        let mut command = Command::new(program);
        if self.env_active {
            if let Some(env_path) = &self.env_path {
                command.env("VIRTUAL_ENV", env_path);
                command.env("PATH", prepend_search_path(&env_path.join("bin")));
            }
        }
        command
    }
}

fn prepend_search_path(dir: &Path) -> OsString {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = env::var_os("PATH") {
        paths.extend(env::split_paths(&existing));
    }
    env::join_paths(paths).unwrap_or_else(|_| dir.as_os_str().to_os_string())
}
