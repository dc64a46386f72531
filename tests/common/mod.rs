//! Shared stub-toolchain fixture for integration tests.
//!
//! Each test gets a temp directory holding a `bin/` of stub executables
//! placed first on `PATH` and a `work/` directory the binary runs in. Stubs
//! append their argv to a call log that assertions read back, so tests can
//! verify which external tools ran and in what order.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub struct StubToolchain {
    root: TempDir,
}

/// Creates the venv layout activation expects: bin/activate plus interpreter
/// copies of the python3 stub so venv-resolved commands keep logging.
///
/// Every stub re-extends its own PATH with the system directories so tests
/// that hide them from the binary under test can still use cp/mkdir/chmod.
const MKVENV: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
dir="${1:-.venv}"
mkdir -p "$dir/bin"
: > "$dir/bin/activate"
cp "$STUB_BIN/python3" "$dir/bin/python"
cp "$STUB_BIN/python3" "$dir/bin/python3"
chmod 755 "$dir/bin/python" "$dir/bin/python3"
exit 0
"#;

const PYTHON3: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
echo "python3 $*" >> "$CALL_LOG"
if [ "$1" = "-c" ]; then
    exit 0
fi
if [ "$1" = "-m" ]; then
    case "$2" in
        venv)
            mkvenv "$3"
            exit $?
            ;;
        pip)
            if [ "$3" = "install" ] && [ "$4" = "uv" ]; then
                cp "$STUB_BIN/uv.stub" "$STUB_BIN/uv"
                chmod 755 "$STUB_BIN/uv"
            fi
            if [ "$3" = "install" ] && [ "$4" = "-r" ]; then
                exit "${PIP_EXIT:-0}"
            fi
            exit 0
            ;;
    esac
    exit 0
fi
if [ "$1" = "main.py" ]; then
    echo "downstream $*"
    exit "${DOWNSTREAM_EXIT:-0}"
fi
exit 0
"#;

const UV: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
echo "uv $*" >> "$CALL_LOG"
case "$1" in
    venv)
        mkvenv "${2:-.venv}"
        exit $?
        ;;
    pip)
        exit "${UV_SYNC_EXIT:-0}"
        ;;
esac
exit 0
"#;

/// Installing python3 materializes the dormant python3 stub, mirroring what
/// a real `brew install python3` makes resolvable afterwards.
const BREW: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
echo "brew $*" >> "$CALL_LOG"
if [ "$1" = "install" ] && [ "$2" = "python3" ]; then
    cp "$STUB_BIN/python3.stub" "$STUB_BIN/python3"
    chmod 755 "$STUB_BIN/python3"
fi
exit 0
"#;

/// Writes a fake Homebrew install script to the `-o` target; running it
/// through bash materializes the brew stub. Also keeps the real curl (and
/// any network access) out of reach of every test.
const CURL: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
echo "curl $*" >> "$CALL_LOG"
out=""
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then
        out="$2"
    fi
    shift
done
if [ -n "$out" ]; then
    {
        echo '#!/bin/sh'
        echo 'PATH="$PATH:/usr/bin:/bin"'
        echo "cp $STUB_BIN/brew.stub $STUB_BIN/brew"
        echo "chmod 755 $STUB_BIN/brew"
    } > "$out"
    chmod 755 "$out"
fi
exit 0
"#;

impl StubToolchain {
    /// Build a toolchain whose `uname -s` reports `kernel`. Starts with
    /// `uname`, `mkvenv`, `curl`, and dormant `.stub` copies of the
    /// installable tools; tests opt into python3 and uv explicitly.
    pub fn new(kernel: &str) -> Self {
        let root = TempDir::new().expect("create toolchain tempdir");
        let toolchain = Self { root };
        fs::create_dir_all(toolchain.bin_dir()).expect("create bin dir");
        fs::create_dir_all(toolchain.work_dir()).expect("create work dir");
        fs::write(toolchain.work_dir().join("requirements.txt"), "requests\n")
            .expect("write manifest");

        toolchain.write_stub("uname", &format!("#!/bin/sh\necho {kernel}\n"));
        toolchain.write_stub("mkvenv", MKVENV);
        toolchain.write_stub("uv.stub", UV);
        toolchain.write_stub("python3.stub", PYTHON3);
        toolchain.write_stub("brew.stub", BREW);
        toolchain.write_stub("curl", CURL);
        toolchain
    }

    pub fn install_python(&self) {
        self.write_stub("python3", PYTHON3);
    }

    pub fn install_uv(&self) {
        self.write_stub("uv", UV);
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn env_dir(&self) -> PathBuf {
        self.work_dir().join(".venv")
    }

    fn call_log(&self) -> PathBuf {
        self.root.path().join("calls.log")
    }

    /// Recorded stub invocations, one per line, in execution order.
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.call_log()) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear_calls(&self) {
        let _ = fs::remove_file(self.call_log());
    }

    /// envboot command with the stub bin first on PATH and toggles scrubbed.
    pub fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_envboot"));
        command
            .current_dir(self.work_dir())
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin_dir().display()))
            .env("CALL_LOG", self.call_log())
            .env("STUB_BIN", self.bin_dir())
            .env_remove("VIRTUAL_ENV")
            .env_remove("NO_POPUP")
            .env_remove("DEBUG_LOG");
        command
    }

    /// envboot command whose PATH holds only the stub bin, for scenarios
    /// where host tools like the real python3 must stay invisible.
    pub fn command_isolated(&self) -> Command {
        let mut command = self.command();
        command.env("PATH", self.bin_dir());
        command
    }

    fn write_stub(&self, name: &str, script: &str) {
        let path = self.bin_dir().join(name);
        fs::write(&path, script).expect("write stub");
        let mut perms = fs::metadata(&path).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub");
    }
}

/// Run envboot with the given stdin content, capturing output.
pub fn run_with_input(command: &mut Command, input: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn envboot");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for envboot")
}

/// Skip guard for tests that rely on a tool being absent from the system
/// directories the fixture PATH still exposes.
pub fn host_has(tool: &str) -> bool {
    ["/usr/bin", "/bin"]
        .iter()
        .any(|dir| Path::new(dir).join(tool).exists())
}
