use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Process exit code on success, and after printing the version.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code when no input was named, or help was requested.
pub const EXIT_USAGE: i32 = 1;
/// Process exit code for invalid arguments or an unusable config file.
pub const EXIT_PARSE_CONFIG: i32 = 2;
/// Process exit code when the input document cannot be read.
pub const EXIT_READ_INPUT: i32 = 3;
/// Process exit code when the page cannot be written out.
pub const EXIT_WRITE_OUTPUT: i32 = 4;
/// Process exit code when the viewer cannot be launched.
pub const EXIT_LAUNCH_VIEWER: i32 = 5;
/// Process exit code when comrak fails to format the document.
pub const EXIT_RENDER: i32 = 6;

/// Everything that can abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// The input document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        /// Path of the input document.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// comrak could not format the parsed document.
    #[error("failed to render document: {0}")]
    Render(#[from] fmt::Error),

    /// The scratch directory could not be resolved or created.
    #[error("failed to prepare scratch directory {}: {source}", path.display())]
    ScratchDir {
        /// Directory that was being prepared.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// The page could not be persisted to its destination.
    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        /// Destination of the page.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write to standard output: {0}")]
    Stdout(#[source] io::Error),

    /// The default viewer could not be started on the page.
    #[error("failed to open {} in a viewer: {source}", path.display())]
    LaunchViewer {
        /// File the viewer was asked to open.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// The config file could not be read or split into arguments.
    #[error("invalid config file {}: {reason}", path.display())]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

impl Error {
    /// The process exit code this error should terminate the run with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } => EXIT_PARSE_CONFIG,
            Error::ReadInput { .. } => EXIT_READ_INPUT,
            Error::ScratchDir { .. } | Error::WriteOutput { .. } | Error::Stdout(_) => {
                EXIT_WRITE_OUTPUT
            }
            Error::LaunchViewer { .. } => EXIT_LAUNCH_VIEWER,
            Error::Render(_) => EXIT_RENDER,
        }
    }
}
