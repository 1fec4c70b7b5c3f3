//! Output plumbing for the CLI: the JSON envelope and exit codes.

pub mod envelope;
pub mod exit_code;

pub use envelope::{EntityType, Envelope, ErrorDetails, MessageType, Meta, ResultCode, SCHEMA_VERSION, Status};
pub use exit_code::ExitCode;
