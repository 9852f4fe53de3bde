//! Run-time settings for gin-mkdata.
//!
//! This module collects the values that are not part of the configuration
//! document: where the tree is written, where generator programs live, and
//! which external programs are invoked. The CLI fills them from flags and
//! environment variables; the defaults are provided here.

use std::path::{Path, PathBuf};

/// Default git executable.
pub const DEFAULT_GIT: &str = "git";

/// Default SSH key generator.
pub const DEFAULT_KEYGEN: &str = "ssh-keygen";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory receiving `users/`, `repos/` and `tmp/`.
    pub root: PathBuf,
    /// Directory the first word of a `generate` command is resolved against.
    pub script_dir: PathBuf,
    /// Git executable used for bare clones.
    pub git: String,
    /// Program invoked with `ssh-keygen` arguments.
    pub keygen: String,
}

impl Settings {
    /// Settings writing to `root`, with every other value defaulted.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            script_dir: default_script_dir(),
            git: DEFAULT_GIT.to_string(),
            keygen: DEFAULT_KEYGEN.to_string(),
        }
    }

    pub fn with_script_dir(mut self, script_dir: impl Into<PathBuf>) -> Self {
        self.script_dir = script_dir.into();
        self
    }

    pub fn with_git(mut self, git: impl Into<String>) -> Self {
        self.git = git.into();
        self
    }

    pub fn with_keygen(mut self, keygen: impl Into<String>) -> Self {
        self.keygen = keygen.into();
        self
    }
}

/// Returns the default directory for generator programs.
///
/// This is the directory containing the running executable, so helper
/// scripts installed next to `gin-mkdata` are found regardless of the current
/// directory. Falls back to the current directory if the executable path
/// cannot be determined.
///
/// This can be overridden by the `--script-dir` CLI flag or the
/// `GIN_MKDATA_SCRIPTS` environment variable.
pub fn default_script_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
