//! Error type shared by the whole crate

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the oracle, the file readers and the command line
#[derive(Error, Debug)]
pub enum Error {
    /// An input bit outside of {0, 1}
    #[error("invalid value {value} for input {name}: expected 0 or 1")]
    InvalidInput {
        /// Name of the offending input (a, b or cin)
        name: &'static str,
        /// Value that was given
        value: u8,
    },

    /// At least one test vector produced an unexpected output
    #[error("{nb_failed} of {nb_tests} test vectors failed for {name}")]
    Mismatch {
        /// Label of the implementation under test
        name: String,
        /// Number of failing vectors
        nb_failed: usize,
        /// Number of vectors run
        nb_tests: usize,
    },

    /// The network does not have the interface of a full adder
    #[error("a full adder needs 3 inputs and 2 outputs, got {nb_inputs} inputs and {nb_outputs} outputs")]
    Interface {
        /// Number of primary inputs of the network
        nb_inputs: usize,
        /// Number of primary outputs of the network
        nb_outputs: usize,
    },

    /// Malformed netlist file
    #[error("line {line}: {message}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Feature or file type that is not handled
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Unknown file extension
    #[error("unknown extension for {}", .0.display())]
    UnknownExtension(PathBuf),

    /// Underlying IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
