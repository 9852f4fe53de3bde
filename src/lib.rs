//! # gin-mkdata Library
//!
//! This library creates the sample data tree used to seed integration tests
//! of a git hosting service: users with SSH keys, and bare repositories
//! published into each user's namespace with sharing and visibility
//! metadata. It backs the `gin-mkdata` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use gin_mkdata::config::{self, RepoSource};
//!
//! let document = config::parse(r#"
//! users:
//!   alice:
//!     repos:
//!       demo:
//!         generate: "mkrepo.sh demo"
//!         public: true
//!         shared:
//!           bob: rw
//! "#).unwrap();
//!
//! let demo = &document.users[0].repos[0];
//! assert_eq!(demo.source, Some(RepoSource::Generate("mkrepo.sh demo".to_string())));
//! assert_eq!(demo.shared["bob"], "rw");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the YAML document listing users and their
//!   repositories.
//! - **Users (`users`)**: per-user directories and keypairs.
//! - **Canonical repositories (`canonical`)**: one staged bare repository per
//!   name, generated by a helper program or cloned, reused by every user.
//! - **Publishing (`publish`)**: per-user bare clones with `gin/` metadata.
//! - **Orchestration (`orchestrator`)**: runs the steps in order and reports
//!   a [`orchestrator::Summary`].
//!
//! Every step checks for existing output first, so running the tool again
//! over a partially generated tree only fills in what is missing.

pub mod canonical;
pub mod config;
pub mod error;
pub mod git;
pub mod layout;
pub mod orchestrator;
pub mod process;
pub mod publish;
pub mod settings;
pub mod shell;
pub mod users;
