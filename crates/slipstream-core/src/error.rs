use thiserror::Error;

/// Errors produced by the stream layer.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("stream is closed")]
    Closed,

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("codec error: {0}")]
    Codec(String),
}

pub type StreamResult<T> = Result<T, StreamError>;

impl From<StreamError> for std::io::Error {
    fn from(e: StreamError) -> Self {
        use std::io::ErrorKind;
        let kind = match &e {
            StreamError::InvalidArgument(_) => ErrorKind::InvalidInput,
            StreamError::Unsupported(_) => ErrorKind::Unsupported,
            StreamError::Closed | StreamError::Codec(_) => ErrorKind::Other,
        };
        std::io::Error::new(kind, e)
    }
}
