//! # User Provisioning
//!
//! Every user gets a directory under `users/` holding an RSA keypair named
//! after them. Both the directory and the key are created at most once: a
//! present private key file is trusted as is, without checking its contents.
//!
//! Keys are produced by an external generator invoked as
//! `ssh-keygen -t rsa -b 4096 -C <user> -f <key> -P ""`, which writes the
//! private key and its `.pub` sibling. A failing generator aborts the run.

use std::fs;
use std::process::Command;

use log::{debug, info};

use crate::error::Result;
use crate::layout::Layout;
use crate::process::run_checked;

/// What [`UserProvisioner::ensure_user`] had to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserOutcome {
    pub dir_created: bool,
    pub key_generated: bool,
}

/// Creates user directories and SSH keypairs.
#[derive(Debug, Clone)]
pub struct UserProvisioner {
    layout: Layout,
    keygen: String,
}

impl UserProvisioner {
    /// `keygen` is the program invoked with `ssh-keygen` arguments.
    pub fn new(layout: Layout, keygen: impl Into<String>) -> Self {
        Self {
            layout,
            keygen: keygen.into(),
        }
    }

    /// Ensure the directory and keypair of `user` exist.
    pub fn ensure_user(&self, user: &str) -> Result<UserOutcome> {
        let mut outcome = UserOutcome::default();

        let dir = self.layout.user_dir(user);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("Created user directory {}", dir.display());
            outcome.dir_created = true;
        }

        let key = self.layout.key_path(user);
        if key.exists() {
            debug!("Key for {} already present at {}", user, key.display());
            return Ok(outcome);
        }

        run_checked(
            Command::new(&self.keygen)
                .args(["-t", "rsa", "-b", "4096", "-C", user, "-f"])
                .arg(&key)
                .args(["-P", ""]),
        )?;
        info!("Generated SSH key for {} at {}", user, key.display());
        outcome.key_generated = true;

        Ok(outcome)
    }
}
