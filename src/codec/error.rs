use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Missing `{expected}` declaration")]
    Prefix { expected: &'static str },

    #[error("Malformed array literal: {0}")]
    Json5(#[from] serde_json5::Error),

    #[error("Record {index}: {reason}")]
    Shape { index: usize, reason: String },

    #[error("Malformed searchdata manifest: {0}")]
    Manifest(String),
}

impl CodecError {
    pub(crate) fn shape(index: usize, reason: impl Into<String>) -> Self {
        Self::Shape {
            index,
            reason: reason.into(),
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
