//! Custom assertion macros for scenario tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that a file exists relative to the service root.
///
/// # Example
/// ```ignore
/// assert_written!(env, "builder/Dockerfile");
/// ```
#[macro_export]
macro_rules! assert_written {
    ($env:expr, $path:expr) => {
        let full_path = $env.service_path($path);
        assert!(
            full_path.exists(),
            "Expected file at '{}', but it doesn't exist.\n\
             Service root: {:?}\n\
             Files found:\n  {}",
            $path,
            $env.service_root.path(),
            $crate::common::list_all_files($env.service_root.path()).join("\n  ")
        );
    };
}

/// Assert that a file does NOT exist relative to the service root.
#[macro_export]
macro_rules! assert_not_written {
    ($env:expr, $path:expr) => {
        let full_path = $env.service_path($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT exist, but it does.\n\
             Service root: {:?}",
            $path,
            $env.service_root.path()
        );
    };
}

/// Assert that combined stdout/stderr contains a string.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let output = $result.combined_output();
        assert!(
            output.contains($needle),
            "Expected output to contain {:?}.\nstdout:\n{}\nstderr:\n{}",
            $needle,
            $result.stdout,
            $result.stderr
        );
    };
}
