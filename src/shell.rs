//! Shell-style command lines for repository generators
//!
//! A `generate` entry is a single string such as
//! `mkrepo.sh "my repo" --commits 10`. It is split into words with POSIX
//! shell rules (no variable expansion, no globbing, no comments):
//!
//! - unquoted whitespace separates words,
//! - single quotes preserve everything up to the closing quote,
//! - double quotes preserve everything except `\"` and `\\`,
//! - an unquoted backslash makes the next character literal.
//!
//! The first word names the generator program. It is resolved relative to
//! the script directory, not the current directory, so helper scripts are
//! found next to the tool. An absolute program path is used as is.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A generator invocation after splitting and program resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split `command` into words using POSIX shell quoting rules.
pub fn split(command: &str) -> Result<Vec<String>> {
    let invalid = |message: &str| Error::CommandLine {
        command: command.to_string(),
        message: message.to_string(),
    };

    let mut words = Vec::new();
    let mut word = String::new();
    // Distinguishes an empty quoted word ('') from no word at all.
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| invalid("no escaped character"))?;
                    word.push(escaped);
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut word));
                        in_word = false;
                    }
                }
                c => {
                    word.push(c);
                    in_word = true;
                }
            },
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                c => word.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => word.push(next),
                    Some(next) => {
                        word.push('\\');
                        word.push(next);
                    }
                    None => return Err(invalid("no closing quotation")),
                },
                c => word.push(c),
            },
        }
    }

    if quote != Quote::None {
        return Err(invalid("no closing quotation"));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// Split `command` and resolve its program against `script_dir`.
pub fn parse_command(command: &str, script_dir: &Path) -> Result<CommandLine> {
    let mut words = split(command)?.into_iter();
    let program = words.next().ok_or_else(|| Error::CommandLine {
        command: command.to_string(),
        message: "empty command".to_string(),
    })?;

    Ok(CommandLine {
        program: resolve_program(&program, script_dir),
        args: words.collect(),
    })
}

/// Resolve a generator program name relative to `script_dir`.
pub fn resolve_program(program: &str, script_dir: &Path) -> PathBuf {
    // Path::join replaces the base when `program` is absolute.
    script_dir.join(program)
}
