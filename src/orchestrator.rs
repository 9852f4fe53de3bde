//! # Run Orchestration
//!
//! Ties the steps together in dependency order:
//!
//! 1. Create the `users/` and `repos/` roots.
//! 2. For each user, in document order, provision the user directory and key.
//! 3. For each of the user's repositories, in document order, publish it.
//!    Publishing materializes the canonical repository on the first use of a
//!    name; one [`Materializer`] is shared by the whole run.
//!
//! The first fatal error aborts the run. Whatever was written before it stays
//! on disk, and a later run picks up from there.

use std::fmt;
use std::fs;

use log::info;

use crate::canonical::{Materialized, Materializer};
use crate::config::Document;
use crate::error::Result;
use crate::layout::Layout;
use crate::publish::{Published, Publisher};
use crate::settings::Settings;
use crate::users::UserProvisioner;

/// Counts of what a run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub users_created: usize,
    pub keys_generated: usize,
    pub repos_generated: usize,
    pub repos_cloned: usize,
    pub repos_published: usize,
    pub repos_already_present: usize,
}

impl Summary {
    /// Whether the run changed anything on disk.
    pub fn created_anything(&self) -> bool {
        self.users_created
            + self.keys_generated
            + self.repos_generated
            + self.repos_cloned
            + self.repos_published
            > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users created, {} keys generated, {} repositories generated, {} cloned, \
             {} published, {} already present",
            self.users_created,
            self.keys_generated,
            self.repos_generated,
            self.repos_cloned,
            self.repos_published,
            self.repos_already_present
        )
    }
}

/// Create everything `document` describes below `settings.root`.
pub fn run(document: &Document, settings: &Settings) -> Result<Summary> {
    let layout = Layout::new(&settings.root)?;
    fs::create_dir_all(layout.users_root())?;
    fs::create_dir_all(layout.repos_root())?;

    let script_dir = std::path::absolute(&settings.script_dir)?;
    let users = UserProvisioner::new(layout.clone(), settings.keygen.as_str());
    let publisher = Publisher::new(layout.clone(), settings.git.as_str());
    let mut materializer = Materializer::new(layout, script_dir, settings.git.as_str());

    let mut summary = Summary::default();
    for user in &document.users {
        let outcome = users.ensure_user(&user.id)?;
        summary.users_created += usize::from(outcome.dir_created);
        summary.keys_generated += usize::from(outcome.key_generated);

        for spec in &user.repos {
            match publisher.publish(&user.id, spec, &mut materializer)? {
                Published::AlreadyPresent => summary.repos_already_present += 1,
                Published::Created { materialized } => {
                    summary.repos_published += 1;
                    match materialized {
                        Some(Materialized::Generated) => summary.repos_generated += 1,
                        Some(Materialized::Cloned) => summary.repos_cloned += 1,
                        Some(Materialized::Cached | Materialized::CloneFailed { .. }) | None => {}
                    }
                }
            }
        }
    }

    info!("Done: {}", summary);
    Ok(summary)
}
