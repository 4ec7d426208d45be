//! Test environment builder for isolated Dockyard testing.
//!
//! Provides `TestEnv` - a temp service directory and a temp home, plus
//! helpers to run the dockyard binary against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables read by the config loader; cleared so the host never leaks in
const CONFIG_VARS: [&str; 6] = [
    "DOCKYARD_INSTALLER",
    "DOCKYARD_OPENAPI_GENERATOR",
    "DOCKYARD_DOCKER",
    "DOCKYARD_KUBECTL",
    "DOCKYARD_REPOSITORY",
    "DOCKYARD_NAMESPACE",
];

/// Result of running a dockyard command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid NDJSON line {line:?}: {e}"))
            })
            .collect()
    }
}

/// Isolated service directory with its own home
pub struct TestEnv {
    pub service_root: TempDir,
    pub home_dir: TempDir,
    env: Vec<(String, String)>,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    /// Path relative to the service root
    pub fn service_path(&self, relative: &str) -> PathBuf {
        self.service_root.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.service_path(relative))
            .unwrap_or_else(|e| panic!("cannot read {relative}: {e}"))
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(self.service_root.path(), relative, content);
    }

    /// Run dockyard against the service root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.home_dir.path())
            .arg("-C")
            .arg(self.service_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("RUST_LOG");
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        for (key, value) in vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute dockyard");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture");
}

/// Builder for `TestEnv`
#[derive(Default)]
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    env: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn with_service(self, yaml: &str) -> Self {
        self.with_file("service.yaml", yaml)
    }

    pub fn with_api(self, document: &str) -> Self {
        self.with_file("openapi/api.json", document)
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Replace every external tool with `true` so phases run offline
    pub fn with_stub_tools(self) -> Self {
        self.with_env("DOCKYARD_INSTALLER", "true")
            .with_env("DOCKYARD_OPENAPI_GENERATOR", "true")
            .with_env("DOCKYARD_DOCKER", "true")
            .with_env("DOCKYARD_KUBECTL", "true")
    }

    pub fn build(self) -> TestEnv {
        let service_root = tempfile::tempdir().expect("Failed to create service dir");
        let home_dir = tempfile::tempdir().expect("Failed to create home dir");
        for (relative, content) in &self.files {
            write_file(service_root.path(), relative, content);
        }
        TestEnv {
            service_root,
            home_dir,
            env: self.env,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_dockyard")),
        }
    }
}
