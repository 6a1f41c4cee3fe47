//! The crate error type.

use std::num::ParseIntError;

use thiserror::Error;

/// Everything that can go wrong while configuring or running a lab script. The tree itself never
/// fails; its "not found" answers are `Option`s and `bool`s.
#[derive(Error, Debug)]
pub enum LabError {
    /// The first word of a line isn't a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A command ran out of arguments.
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        /// The command being parsed.
        command: String,
        /// What was still needed, e.g. "a key".
        expected: &'static str,
    },

    /// An argument that should be a key isn't an `i32`.
    #[error("invalid key `{token}`")]
    InvalidKey {
        /// The offending token.
        token: String,
        /// Why it didn't parse.
        source: ParseIntError,
    },

    /// An argument that should be a rank isn't an integer.
    #[error("invalid rank `{token}`")]
    InvalidRank {
        /// The offending token.
        token: String,
        /// Why it didn't parse.
        source: ParseIntError,
    },

    /// A command got more arguments than it takes.
    #[error("unexpected argument `{token}` after `{command}`")]
    TrailingArgument {
        /// The command being parsed.
        command: String,
        /// The first extra token.
        token: String,
    },

    /// A script line failed.
    #[error("script line {line}")]
    Line {
        /// 1-based line number in the script.
        line: usize,
        /// What went wrong on that line.
        source: Box<LabError>,
    },

    /// Reading the script or writing its output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command line arguments or environment.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, LabError>;
