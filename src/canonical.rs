//! # Canonical Repositories
//!
//! Repositories referenced by several users are produced once, in the staging
//! directory (`tmp/<name>.git`), and every published copy is cloned from
//! there. Staged repositories survive between runs and act as a cache.
//!
//! ## Key Components
//!
//! - **`KnownRepos`**: the index from repository name to the absolute path
//!   of its canonical repository for the current run.
//! - **`Materializer`**: owns the index and produces missing canonical
//!   repositories, either by running a generator program or by bare-cloning
//!   a source location.
//!
//! The first reference to a name decides how it is produced; later
//! references reuse the recorded path even if their spec differs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};

use crate::config::{RepoSource, RepoSpec};
use crate::error::{Error, Result};
use crate::git;
use crate::layout::Layout;
use crate::process::run_checked;
use crate::shell;

/// Index of canonical repository paths for one run
#[derive(Debug, Clone, Default)]
pub struct KnownRepos {
    paths: HashMap<String, PathBuf>,
}

impl KnownRepos {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the canonical path of `name`, replacing any previous entry.
    pub fn record(&mut self, name: &str, path: PathBuf) {
        self.paths.insert(name.to_string(), path);
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// What [`Materializer::ensure_canonical`] did for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// The canonical repository was already staged.
    Cached,
    /// The generator program ran successfully.
    Generated,
    /// The source was cloned.
    Cloned,
    /// The clone failed; the canonical repository is absent.
    CloneFailed { message: String },
}

/// Produces canonical repositories in the staging directory.
#[derive(Debug, Clone)]
pub struct Materializer {
    layout: Layout,
    script_dir: PathBuf,
    git: String,
    known: KnownRepos,
}

impl Materializer {
    /// `script_dir` is where generator programs are looked up; `git` is the
    /// git executable used for clones.
    pub fn new(layout: Layout, script_dir: impl Into<PathBuf>, git: impl Into<String>) -> Self {
        Self {
            layout,
            script_dir: script_dir.into(),
            git: git.into(),
            known: KnownRepos::new(),
        }
    }

    pub fn known(&self) -> &KnownRepos {
        &self.known
    }

    /// Path of the canonical repository recorded for `name`, if any.
    pub fn canonical_path(&self, name: &str) -> Option<&Path> {
        self.known.get(name)
    }

    /// Ensure the canonical repository for `spec` exists.
    ///
    /// The target path is recorded in the index before anything else, so the
    /// index holds the intended location even when the repository is already
    /// staged or could not be cloned.
    pub fn ensure_canonical(&mut self, spec: &RepoSpec) -> Result<Materialized> {
        let staging = self.layout.staging_dir();
        fs::create_dir_all(&staging)?;

        let target = self.layout.canonical_path(&spec.name);
        self.known.record(&spec.name, target.clone());

        if target.exists() {
            if !git::is_bare_repository(&self.git, &target) {
                warn!(
                    "Staged {} exists but is not a bare repository",
                    target.display()
                );
            }
            debug!("Using staged repository {}", target.display());
            return Ok(Materialized::Cached);
        }

        match &spec.source {
            Some(RepoSource::Generate(command)) => {
                self.generate(command, &staging)?;
                if target.exists() {
                    info!("Generated canonical repository {}", target.display());
                } else {
                    warn!(
                        "Generator for '{}' finished without creating {}",
                        spec.name,
                        target.display()
                    );
                }
                Ok(Materialized::Generated)
            }
            Some(RepoSource::Clone(location)) => {
                match git::clone_bare(&self.git, location, &target) {
                    Ok(()) => {
                        info!("Cloned {} into {}", location, target.display());
                        Ok(Materialized::Cloned)
                    }
                    Err(e) => {
                        warn!("{}", e);
                        Ok(Materialized::CloneFailed {
                            message: e.to_string(),
                        })
                    }
                }
            }
            None => Err(Error::MissingSource {
                name: spec.name.clone(),
            }),
        }
    }

    /// Run a generator command with the staging directory as its working
    /// directory. Only the child's directory changes, never ours.
    fn generate(&self, command: &str, staging: &Path) -> Result<()> {
        let line = shell::parse_command(command, &self.script_dir)?;
        info!(
            "Running generator {} {}",
            line.program.display(),
            line.args.join(" ")
        );
        run_checked(
            Command::new(&line.program)
                .args(&line.args)
                .current_dir(staging),
        )?;
        Ok(())
    }
}
