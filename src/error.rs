// Error types. Every variant states *where* things went wrong.
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a photo or the watermark could not be turned into pixels.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("could not read image: {0}")]
    Decode(String),

    #[error("could not load stamp image {}: {reason}", .path.display())]
    StampLoad { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("png encode failed: {0}")]
    Encode(String),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_error_names_the_file() {
        let err = LoadError::StampLoad {
            path: PathBuf::from("förslag 112.png"),
            reason: "missing".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("förslag 112.png"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: Error = LoadError::NoFileSelected.into();
        assert_eq!(err.to_string(), "no file selected");

        let err: Error = ExportError::Write(std::io::Error::other("disk full")).into();
        assert!(err.to_string().contains("disk full"));
    }
}
