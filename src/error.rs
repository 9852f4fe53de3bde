//! # Error Handling
//!
//! This module defines the centralized error type for `gin-mkdata`. It uses
//! the `thiserror` library to describe every failure mode the generator can
//! run into, from a malformed configuration document to an external program
//! exiting with a non-zero status.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (paths,
//!   program names, captured stderr) to explain the failure without a stack
//!   trace.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Tolerated failures, such as a canonical repository clone that could not
//! reach its source, are not represented here: they are logged and reported
//! through the step outcomes instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gin-mkdata operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration document does not have the expected shape.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the document
        hint: Option<String>,
    },

    /// A user, repository or buddy name cannot be used as a path component.
    #[error("Invalid {kind} name {name:?}: only letters, digits, '.', '_' and '-' are allowed")]
    InvalidName { kind: &'static str, name: String },

    /// An external program could not be started or exited unsuccessfully.
    #[error("Command `{program}` failed: {message}{}", if stderr.is_empty() { String::new() } else { format!("\n  stderr: {}", stderr.trim_end()) })]
    Command {
        program: String,
        message: String,
        stderr: String,
    },

    /// A `generate` command line could not be split into words.
    #[error("Invalid command line {command:?}: {message}")]
    CommandLine { command: String, message: String },

    /// `git clone --bare` did not produce the target repository.
    #[error("Git clone error for {source_location} -> {}: {message}", target.display())]
    GitClone {
        source_location: String,
        target: PathBuf,
        message: String,
    },

    /// A repository has to be materialized but names neither `generate` nor `clone`.
    #[error("Repository '{name}' does not exist in the staging area and has neither 'generate' nor 'clone'")]
    MissingSource { name: String },

    /// The canonical repository was expected on disk but is absent.
    #[error("Canonical repository for '{name}' is missing at {}; was it generated or cloned successfully?", path.display())]
    CanonicalMissing { name: String, path: PathBuf },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
