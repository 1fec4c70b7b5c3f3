//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod index;
pub mod init;
pub mod inspect;
pub mod parse;
pub mod search;
pub mod validate;
