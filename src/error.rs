//! Error types for stlmesh

use thiserror::Error;

/// stlmesh error types
#[derive(Error, Debug)]
pub enum Error {
    /// A line did not match what the grammar expects in the current state
    #[error("line {line}: expecting {expected}, got '{found}'")]
    UnexpectedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// A `vertex` line without exactly three numeric fields
    #[error("line {line}: expecting 'vertex' with three coordinates, got '{found}'")]
    VertexFields { line: usize, found: String },

    /// Non-blank content after `endsolid`
    #[error("line {line}: extra line '{found}' after 'endsolid'")]
    ExtraContent { line: usize, found: String },

    /// The stream ended before `endsolid`
    #[error("STL document is incomplete: stream ended while expecting {expected}")]
    Incomplete { expected: &'static str },

    /// Growing the vertex buffer failed
    #[error("Failed to allocate vertex buffer for {0} coordinates")]
    Allocation(usize),

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File load error
    #[error("File load error: {0}")]
    FileLoad(String),

    /// File save error
    #[error("File save error: {0}")]
    FileSave(String),
}

impl Error {
    /// Source line number of a grammar error, if the error has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedLine { line, .. }
            | Error::VertexFields { line, .. }
            | Error::ExtraContent { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for stlmesh operations
pub type Result<T> = std::result::Result<T, Error>;
