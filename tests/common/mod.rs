use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated sandbox for one binary run: its own HOME (so no real config
/// file leaks in), its own data directory, and its own working directory
/// (where histogram files land). The metadata API env vars are scrubbed so
/// every add goes through manual entry.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub data_dir: PathBuf,
    pub work_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let data_dir = tmp.path().join("data");
        let work_dir = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work_dir).expect("create work dir");
        Self {
            _tmp: tmp,
            home,
            data_dir,
            work_dir,
        }
    }

    /// Command with the sandbox wired up but no login preselected.
    pub fn cmd(&self, backend: &str) -> Command {
        let mut cmd = Command::cargo_bin("cinelog").expect("binary builds");
        cmd.env("HOME", &self.home)
            .env_remove("OMDB_API_KEY")
            .env_remove("OMDB_API_URL")
            .current_dir(&self.work_dir)
            .arg("--backend")
            .arg(backend)
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }

    /// Command logged in as `user` via the --user flag.
    pub fn cmd_as(&self, backend: &str, user: &str) -> Command {
        let mut cmd = self.cmd(backend);
        cmd.arg("--user").arg(user);
        cmd
    }

    /// Drive one full session as alice with `script` on stdin.
    pub fn run_script(&self, backend: &str, script: &str) -> assert_cmd::assert::Assert {
        self.cmd_as(backend, "alice")
            .write_stdin(script.to_string())
            .assert()
    }
}

pub const BACKENDS: [&str; 2] = ["json", "sqlite"];
