//! Process exit codes.
//!
//! | code | meaning                              |
//! |------|--------------------------------------|
//! | 0    | success                              |
//! | 1    | nothing found, or validation issues  |
//! | 2    | configuration error                  |
//! | 3    | parse or decode error                |
//! | 4    | I/O error                            |

use crate::codec::CodecError;
use crate::error::IndexError;
use crate::io::envelope::ResultCode;
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    NotFound,
    ValidationFailed,
    ConfigError,
    ParseError,
    IoError,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NotFound | Self::ValidationFailed => 1,
            Self::ConfigError => 2,
            Self::ParseError => 3,
            Self::IoError => 4,
        }
    }

    pub fn result_code(self) -> ResultCode {
        match self {
            Self::Success => ResultCode::Ok,
            Self::NotFound => ResultCode::NotFound,
            Self::ValidationFailed => ResultCode::ValidationFailed,
            Self::ConfigError => ResultCode::ConfigError,
            Self::ParseError => ResultCode::ParseError,
            Self::IoError => ResultCode::IoError,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

impl From<&CodecError> for ExitCode {
    fn from(_: &CodecError) -> Self {
        Self::ParseError
    }
}

impl From<&IndexError> for ExitCode {
    fn from(err: &IndexError) -> Self {
        match err {
            IndexError::FileRead { .. } | IndexError::FileWrite { .. } => Self::IoError,
            IndexError::Parser { .. } => Self::ParseError,
            IndexError::Config(_) => Self::ConfigError,
            IndexError::ThreadPool(_) | IndexError::General(_) => Self::IoError,
        }
    }
}

impl From<&StorageError> for ExitCode {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::Io { .. } => Self::IoError,
            StorageError::Codec { .. } | StorageError::Metadata(_) => Self::ParseError,
            StorageError::NotFound(_) => Self::NotFound,
        }
    }
}
