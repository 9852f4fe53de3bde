//! # Configuration Document
//!
//! This module defines the records that describe which users and repositories
//! `gin-mkdata` creates, and the loader that reads them from YAML.
//!
//! ## Document Shape
//!
//! ```yaml
//! users:
//!   alice:
//!     repos:
//!       demo:
//!         generate: "mkrepo.sh demo --commits 10"
//!         public: true
//!         shared:
//!           bob: rw
//!   bob:
//!     repos:
//!       upstream:
//!         clone: https://example.org/upstream.git
//!         description: A mirror of upstream
//! ```
//!
//! Users and repositories keep their document order, which is also the order
//! in which they are created.
//!
//! ## Parsing
//!
//! The YAML text is first deserialized into private raw records that mirror
//! the document, then converted into the public [`Document`]. The conversion
//! is where the shape is enforced: missing `users` or `repos`, unknown keys in
//! a user or repository, and a repository with both `generate` and `clone`
//! all surface as [`Error::ConfigParse`]. Every name that later becomes a path
//! component is checked with [`validate_name`].

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Alphabet accepted for names that become path components.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+$").expect("name pattern is a valid regex")
});

/// The parsed configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Users in document order.
    pub users: Vec<User>,
}

/// A user and the repositories published in their namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The user identifier, used for the user directory and key names.
    pub id: String,
    /// Repositories in document order.
    pub repos: Vec<RepoSpec>,
}

/// How a canonical repository is produced when it is not yet staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// A shell-style command line run inside the staging directory.
    Generate(String),
    /// A path or URL passed to `git clone --bare`.
    Clone(String),
}

/// A single repository definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Repository name, taken from the mapping key.
    pub name: String,
    /// How to materialize the canonical repository, if it has to be.
    pub source: Option<RepoSource>,
    /// Whether the published repository is marked public.
    pub public: bool,
    /// Buddy user id to access level, in document order.
    pub shared: IndexMap<String, String>,
    /// Text written to the published repository's `description` file.
    pub description: Option<String>,
}

impl RepoSpec {
    /// Create a spec with no source, not public and not shared.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            public: false,
            shared: IndexMap::new(),
            description: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    users: Option<IndexMap<String, Option<RawUser>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUser {
    #[serde(default)]
    repos: Option<IndexMap<String, Option<RawRepo>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRepo {
    #[serde(default)]
    generate: Option<String>,
    #[serde(default)]
    clone: Option<String>,
    #[serde(default)]
    public: bool,
    #[serde(default)]
    shared: Option<IndexMap<String, String>>,
    #[serde(default)]
    description: Option<String>,
}

/// Check that `name` can be used as a single path component.
///
/// `kind` only feeds the error message ("user", "repository", ...).
pub fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    if name == "." || name == ".." || !NAME_PATTERN.is_match(name) {
        return Err(Error::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Parse a configuration document from a YAML string.
pub fn parse(yaml_content: &str) -> Result<Document> {
    if yaml_content.trim().is_empty() {
        return Err(Error::ConfigParse {
            message: "the document is empty".to_string(),
            hint: Some("Start the document with a top-level 'users:' mapping".to_string()),
        });
    }

    let raw: RawDocument = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Expected 'users' -> <user> -> 'repos' -> <name> -> {generate|clone, public, shared}"
                .to_string(),
        ),
    })?;

    let raw_users = raw.users.ok_or_else(|| Error::ConfigParse {
        message: "missing top-level 'users' mapping".to_string(),
        hint: None,
    })?;

    let mut users = Vec::with_capacity(raw_users.len());
    for (id, raw_user) in raw_users {
        validate_name("user", &id)?;
        let raw_repos = raw_user
            .and_then(|u| u.repos)
            .ok_or_else(|| Error::ConfigParse {
                message: format!("user '{}' has no 'repos' mapping", id),
                hint: Some("Use 'repos: {}' for a user without repositories".to_string()),
            })?;

        let mut repos = Vec::with_capacity(raw_repos.len());
        for (name, raw_repo) in raw_repos {
            repos.push(convert_repo(name, raw_repo.unwrap_or_default())?);
        }
        users.push(User { id, repos });
    }

    Ok(Document { users })
}

fn convert_repo(name: String, raw: RawRepo) -> Result<RepoSpec> {
    validate_name("repository", &name)?;

    let source = match (raw.generate, raw.clone) {
        (Some(_), Some(_)) => {
            return Err(Error::ConfigParse {
                message: format!("repository '{}' has both 'generate' and 'clone'", name),
                hint: Some("Keep only one of the two keys".to_string()),
            })
        }
        (Some(command), None) => Some(RepoSource::Generate(command)),
        (None, Some(location)) => Some(RepoSource::Clone(location)),
        (None, None) => None,
    };

    let shared = raw.shared.unwrap_or_default();
    for buddy in shared.keys() {
        validate_name("buddy", buddy)?;
    }

    Ok(RepoSpec {
        name,
        source,
        public: raw.public,
        shared,
        description: raw.description,
    })
}

/// Load a configuration document from a file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
