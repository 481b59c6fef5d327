// src/exit.rs
//! Standardized process exit codes for `msgscan`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum MsgscanExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, parser setup).
    Error = 1,
    /// Input validation failed (malformed baseline, missing input).
    InvalidInput = 2,
    /// Invalid configuration or command-line settings.
    ConfigError = 3,
    /// Extraction failure in strict mode.
    ExtractionFailure = 4,
}

impl MsgscanExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps an error chain to the exit code of its root library error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<Error>() {
            Some(Error::Config(_)) => Self::ConfigError,
            Some(Error::MalformedInput { .. }) => Self::InvalidInput,
            Some(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Self::InvalidInput
            }
            Some(Error::Extraction { .. }) => Self::ExtractionFailure,
            _ => Self::Error,
        }
    }
}

impl Termination for MsgscanExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for MsgscanExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => {
                eprintln!("Error: {e:#}");
                Self::for_error(&e)
            }
        }
    }
}
