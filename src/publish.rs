//! # Publishing Repositories
//!
//! A published repository is a bare clone of the canonical repository placed
//! in the user's namespace, `repos/git/<user>/<name>.git`, and annotated with
//! the metadata the hosting service reads:
//!
//! ```text
//! <name>.git/gin/public          present iff the repository is public
//! <name>.git/gin/sharing/<buddy> access level granted to <buddy>
//! <name>.git/description         repository description, when given
//! ```
//!
//! Published repositories are never updated: an existing publish path is
//! left untouched. Metadata is only written once the clone has produced the
//! repository directory.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::canonical::{Materialized, Materializer};
use crate::config::RepoSpec;
use crate::error::{Error, Result};
use crate::git;
use crate::layout::Layout;

/// Name of the metadata directory inside a published repository.
pub const GIN_DIR: &str = "gin";

/// What [`Publisher::publish`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Published {
    /// The publish path already existed.
    AlreadyPresent,
    /// The repository was cloned and annotated. `materialized` is set when
    /// this call was the first use of the repository name.
    Created { materialized: Option<Materialized> },
}

/// Clones canonical repositories into user namespaces.
#[derive(Debug, Clone)]
pub struct Publisher {
    layout: Layout,
    git: String,
}

impl Publisher {
    pub fn new(layout: Layout, git: impl Into<String>) -> Self {
        Self {
            layout,
            git: git.into(),
        }
    }

    /// Publish `spec` for `user`, materializing its canonical repository
    /// through `materializer` on first use of the name.
    pub fn publish(
        &self,
        user: &str,
        spec: &RepoSpec,
        materializer: &mut Materializer,
    ) -> Result<Published> {
        let path = self.layout.publish_path(user, &spec.name);
        if path.exists() {
            debug!("{} already published at {}", spec.name, path.display());
            return Ok(Published::AlreadyPresent);
        }
        fs::create_dir_all(self.layout.publish_dir(user))?;

        let materialized = if materializer.known().contains(&spec.name) {
            None
        } else {
            Some(materializer.ensure_canonical(spec)?)
        };
        let canonical = materializer
            .canonical_path(&spec.name)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.layout.canonical_path(&spec.name));

        // Materialization may itself have populated the publish path.
        if path.exists() {
            return Ok(Published::AlreadyPresent);
        }

        if !canonical.exists() {
            return Err(Error::CanonicalMissing {
                name: spec.name.clone(),
                path: canonical,
            });
        }

        git::clone_bare(&self.git, &canonical.to_string_lossy(), &path)?;
        if !path.is_dir() {
            return Err(Error::GitClone {
                source_location: canonical.to_string_lossy().into_owned(),
                target: path,
                message: "clone finished without creating the repository".to_string(),
            });
        }

        write_metadata(&path, spec)?;
        info!("Published {} for {} at {}", spec.name, user, path.display());
        Ok(Published::Created { materialized })
    }
}

/// Write sharing and visibility metadata into the published repository at
/// `repo_path`, which must exist.
pub fn write_metadata(repo_path: &Path, spec: &RepoSpec) -> Result<()> {
    let gin = repo_path.join(GIN_DIR);
    fs::create_dir(&gin)?;

    if spec.public {
        fs::write(gin.join("public"), "")?;
    }

    // always present, even when nobody is shared with
    let sharing = gin.join("sharing");
    fs::create_dir(&sharing)?;
    for (buddy, level) in &spec.shared {
        fs::write(sharing.join(buddy), level)?;
    }

    if let Some(description) = &spec.description {
        fs::write(repo_path.join("description"), description)?;
    }

    Ok(())
}
