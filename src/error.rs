use std::io;
use std::process::ExitCode;
use thiserror::Error;

/// Exit status for messages that cannot be obtained as UTF-8 text.
pub const EXIT_INVALID_MESSAGE: u8 = 255;

/// Exit status for discovery, connection and write failures.
pub const EXIT_CONNECTION: u8 = 254;

/// Everything that can abort sending a message. None of these are retried.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("No serial device available")]
    NoDevice,

    #[error("Failed to enumerate serial ports: {0}")]
    Enumeration(#[source] serialport::Error),

    #[error("Failed to open {port}: {source}")]
    Connection {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Failed to write to {port}: {source}")]
    Write {
        port: String,
        #[source]
        source: io::Error,
    },

    /// Message text with invalid sequences replaced, for reporting only.
    #[error("Not valid UTF-8: {0:?}")]
    Encoding(String),

    #[error("Failed to read message from stdin: {0}")]
    Input(#[source] io::Error),
}

impl SendError {
    /// True for failures that happen before any port is touched.
    #[must_use]
    pub fn is_message_error(&self) -> bool {
        matches!(self, SendError::Encoding(_) | SendError::Input(_))
    }

    #[must_use]
    pub fn exit_status(&self) -> u8 {
        if self.is_message_error() {
            EXIT_INVALID_MESSAGE
        } else {
            EXIT_CONNECTION
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
