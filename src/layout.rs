//! Paths of the generated tree
//!
//! Everything `gin-mkdata` writes lives below one output root:
//!
//! ```text
//! <root>/users/<user>/<user>.ssh.key[.pub]
//! <root>/repos/git/<user>/<name>.git/
//! <root>/tmp/<name>.git/
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory holding one sub-directory per user.
pub const USERS_DIR: &str = "users";
/// Directory holding the published repositories.
pub const REPOS_DIR: &str = "repos";
/// Directory holding the canonical repositories shared between users.
pub const STAGING_DIR: &str = "tmp";

/// Path computations for one output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `root`, made absolute against the current
    /// directory so recorded repository paths stay valid for child processes
    /// running elsewhere.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            root: std::path::absolute(root.as_ref())?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_root(&self) -> PathBuf {
        self.root.join(USERS_DIR)
    }

    pub fn user_dir(&self, user: &str) -> PathBuf {
        self.users_root().join(user)
    }

    /// Private key path; the public key is the same path with `.pub` appended.
    pub fn key_path(&self, user: &str) -> PathBuf {
        self.user_dir(user).join(format!("{}.ssh.key", user))
    }

    pub fn repos_root(&self) -> PathBuf {
        self.root.join(REPOS_DIR)
    }

    /// Directory holding all repositories published for `user`.
    pub fn publish_dir(&self, user: &str) -> PathBuf {
        self.repos_root().join("git").join(user)
    }

    pub fn publish_path(&self, user: &str, name: &str) -> PathBuf {
        self.publish_dir(user).join(format!("{}.git", name))
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    pub fn canonical_path(&self, name: &str) -> PathBuf {
        self.staging_dir().join(format!("{}.git", name))
    }
}
