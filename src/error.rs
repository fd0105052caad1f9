use std::path::PathBuf;

/// Errors raised by scene edits, image import and export.
///
/// None of these are fatal: the GUI reports them to the user and keeps the
/// previous state.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("{value} is not a legal {what}; please enter a positive number")]
    InvalidArgument { what: &'static str, value: String },

    #[error("couldn't read image {}: {reason}", path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("the output file name must end with .png, .jpg or .jpeg (got {})", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("the image could not be saved to {}: {reason}", path.display())]
    WriteFailure { path: PathBuf, reason: String },

    #[error("font load error: {name}")]
    FontLoad { name: String },
}

impl SceneError {
    pub(crate) fn invalid(what: &'static str, value: impl ToString) -> Self {
        SceneError::InvalidArgument {
            what,
            value: value.to_string(),
        }
    }
}
