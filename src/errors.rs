use thiserror::Error;

/// Failure to obtain the list of installed packages.
#[derive(Error, Debug)]
pub enum ListError {
    /// pip ran but exited non-zero; `stderr` is its raw diagnostic output.
    #[error("package listing failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },

    /// The interpreter could not be started at all.
    #[error("failed to launch package manager: {0}")]
    Launch(#[from] std::io::Error),
}
