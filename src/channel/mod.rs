//! Line-oriented input/output abstraction.
//!
//! The interpreter consumes its transport only through [`LineChannel`].
//! Both calls block; either may fail, and a failure is fatal for the
//! session, which then resumes from the last checkpoint on restart.

pub mod stdio;

pub use stdio::StdioChannel;

use crate::Result;

/// Blocking line transport.
pub trait LineChannel {
    /// Read the next line without its terminator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EndOfInput`](crate::AppError::EndOfInput) when the
    /// input is exhausted, or [`AppError::Channel`](crate::AppError::Channel)
    /// on a transport failure.
    fn read_line(&mut self) -> Result<String>;

    /// Write one line.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Channel`](crate::AppError::Channel) on a transport
    /// failure.
    fn write_line(&mut self, line: &str) -> Result<()>;
}
