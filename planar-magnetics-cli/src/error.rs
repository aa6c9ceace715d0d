//! This module defines all the errors that can occur while executing the
//! CLI app.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur during execution of the planar-magnetics CLI app
#[derive(Error, Debug)]
pub enum CliError {
    /// Error if the output file already exists
    #[error("output file \"{filename}\" exists; use --overwrite to replace it")]
    OutputExists {
        /// The existing file
        filename: PathBuf,
    },
    /// Error while creating the output file
    #[error("unable to create \"{filename}\": {error}")]
    OutputCreate {
        /// Underlying IO error
        error: std::io::Error,
        /// The file that could not be created
        filename: PathBuf,
    },
    /// Error while reading a design parameter file
    #[error("unable to read design parameters from \"{filename}\": {error}")]
    DesignRead {
        /// Underlying IO error
        error: std::io::Error,
        /// The file that could not be read
        filename: PathBuf,
    },
    /// Error while parsing a design parameter file
    #[error("invalid design parameters in \"{filename}\": {error}")]
    DesignParse {
        /// Underlying JSON error
        error: serde_json::Error,
        /// The offending file
        filename: PathBuf,
    },
    /// Error while reading a changelog file
    #[error("unable to read changelog \"{filename}\": {error}")]
    ChangelogRead {
        /// Underlying IO error
        error: std::io::Error,
        /// The file that could not be read
        filename: PathBuf,
    },
    /// Error raised by the design library
    #[error(transparent)]
    Magnetics(#[from] planar_magnetics::Error),
}
