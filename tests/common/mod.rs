//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture directory with a configuration document,
//! generator scripts and a stand-in for `ssh-keygen`, so tests only need
//! `git` and `/bin/sh` on the host.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::ONE_USER);
//!     fixture.command().arg(fixture.config_path()).assert().success();
//! }
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration snippets for testing.
pub mod configs {
    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "users: [unclosed";

    /// Valid YAML without the `users` mapping.
    pub const NO_USERS: &str = "people:\n  alice: {}\n";

    /// One user without repositories.
    pub const ONE_USER: &str = "users:\n  alice:\n    repos: {}\n";
}

/// Stand-in for ssh-keygen: writes the private and public key files named
/// by `-f` and records the arguments next to them.
const FAKE_KEYGEN: &str = r#"#!/bin/sh
for arg in "$@"; do
  if [ "$prev" = "-f" ]; then key="$arg"; fi
  prev="$arg"
done
echo "$@" > "$key.args"
echo private > "$key"
echo public > "$key.pub"
"#;

/// Generator script: `gen.sh <name> [args...]`. Appends its working
/// directory and extra arguments to `generator.log` in the fixture root, then
/// creates `<name>.git` with one commit.
const GENERATOR: &str = r#"#!/bin/sh
name="$1"; shift
echo "$(pwd -P) $*" >> "$(dirname "$0")/../generator.log"
work="$(mktemp -d)"
git init --quiet "$work"
echo "$name" > "$work/README"
git -C "$work" add README
git -C "$work" -c user.name=gin -c user.email=gin@example.org commit --quiet -m "Initial commit"
git clone --quiet --bare "$work" "$name.git"
rm -rf "$work"
"#;

/// A temporary directory holding a config, scripts and the output tree.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with the fake key generator and `gen.sh` installed.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.write_executable("bin/fake-keygen", FAKE_KEYGEN);
        fixture.write_executable("scripts/gen.sh", GENERATOR);
        fs::create_dir_all(fixture.output()).expect("Failed to create output directory");
        fixture
    }

    /// Write `data.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("data.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Install an extra executable script in `scripts/`.
    pub fn with_script(self, name: &str, body: &str) -> Self {
        self.write_executable(&format!("scripts/{}", name), body);
        self
    }

    fn write_executable(&self, relative: &str, body: &str) {
        let child = self.temp_dir.child(relative);
        child.write_str(body).expect("Failed to write script");
        fs::set_permissions(child.path(), fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("data.yaml")
    }

    /// Root of the generated tree.
    pub fn output(&self) -> PathBuf {
        self.path().join("out")
    }

    pub fn scripts(&self) -> PathBuf {
        self.path().join("scripts")
    }

    pub fn keygen(&self) -> PathBuf {
        self.path().join("bin/fake-keygen")
    }

    /// Lines written by `gen.sh`, one per invocation.
    pub fn generator_runs(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("generator.log"))
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Library settings pointing at this fixture.
    pub fn settings(&self) -> gin_mkdata::settings::Settings {
        gin_mkdata::settings::Settings::new(self.output())
            .with_script_dir(self.scripts())
            .with_keygen(self.keygen().to_string_lossy())
    }

    /// Create a bare repository with one commit outside the output tree and
    /// return its path.
    pub fn upstream(&self, name: &str) -> PathBuf {
        let status = Command::new(self.scripts().join("gen.sh"))
            .arg(name)
            .current_dir(self.path())
            .status()
            .expect("Failed to run gen.sh");
        assert!(status.success());
        fs::remove_file(self.path().join("generator.log")).expect("Failed to reset log");
        self.path().join(format!("{}.git", name))
    }

    /// CLI command for the `gin-mkdata` binary, writing into `out/` with the
    /// fixture's scripts and key generator.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gin-mkdata");
        cmd.current_dir(self.output())
            .env("GIN_MKDATA_SCRIPTS", self.scripts())
            .env("GIN_MKDATA_KEYGEN", self.keygen())
            .env_remove("GIN_MKDATA_ROOT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Every path below the output root with the content of regular files,
    /// in a stable order.
    pub fn snapshot(&self) -> Vec<(PathBuf, Option<Vec<u8>>)> {
        let root = self.output();
        WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.expect("Failed to walk output");
                let relative = entry
                    .path()
                    .strip_prefix(&root)
                    .expect("Entry outside output root")
                    .to_path_buf();
                let content = entry
                    .file_type()
                    .is_file()
                    .then(|| fs::read(entry.path()).expect("Failed to read file"));
                (relative, content)
            })
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
