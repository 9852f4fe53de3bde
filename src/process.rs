//! Running external programs whose failure aborts the run

use std::process::{Command, Output};

use log::debug;

use crate::error::{Error, Result};

/// Run `command` to completion, capturing its output.
///
/// A spawn failure or a non-zero exit status becomes [`Error::Command`] with
/// the captured stderr. Stdout is logged at debug level.
pub fn run_checked(command: &mut Command) -> Result<Output> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!("running {:?}", command);

    let output = command.output().map_err(|e| Error::Command {
        program: program.clone(),
        message: e.to_string(),
        stderr: String::new(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!("{}: {}", program, stdout.trim_end());
    }

    if !output.status.success() {
        return Err(Error::Command {
            program,
            message: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output)
}
