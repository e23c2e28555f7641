use std::io;
use std::path::PathBuf;

/// A source file that could not be parsed. The file is skipped; the run goes on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}:{line}:{column}: {message}", .path.display())]
pub struct ParseError {
    /// The file that failed.
    pub path: PathBuf,

    /// One-based line of the error, `0` when unknown.
    pub line: usize,

    /// One-based column of the error, `0` when unknown.
    pub column: usize,

    /// The parser's message.
    pub message: String,
}

/// Errors that can occur while converting files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input source.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The input is neither a directory nor a file with a recognized extension.
    #[error("unsupported input `{}`", .0.display())]
    UnsupportedInput(PathBuf),

    /// Reading, writing or creating directories failed. These abort the run.
    #[error("failed to {action} `{}`", .path.display())]
    Io {
        /// What was being done, e.g. `read` or `create directory`.
        action: &'static str,

        /// The path involved.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Walking the input directory failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// The printer could not render the rewritten module.
    #[error("failed to print `{}`", .path.display())]
    Print {
        /// The file being printed.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io {
            action,
            path,
            source,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
