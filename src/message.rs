use crate::error::SendError;
use std::ffi::OsString;
use std::io::BufRead;

/// Terminator expected by the firmware after every message.
pub const TERMINATOR: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    text: String,
}

impl Message {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Message {
        Message { text: text.into() }
    }

    /// Takes the message from the command line if given, otherwise reads one
    /// line from `input`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the text is not valid UTF-8 or `input` fails.
    pub fn acquire(arg: Option<OsString>, input: impl BufRead) -> Result<Message, SendError> {
        match arg {
            Some(arg) => Message::from_arg(arg),
            None => Message::read_line(input),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if `arg` is not valid UTF-8.
    pub fn from_arg(arg: OsString) -> Result<Message, SendError> {
        arg.into_string()
            .map(Message::new)
            .map_err(|arg| SendError::Encoding(arg.to_string_lossy().into_owned()))
    }

    /// Reads a single line without its terminator. End of stream yields an
    /// empty message.
    ///
    /// # Errors
    ///
    /// Will return `Err` if reading fails or the line is not valid UTF-8.
    pub fn read_line(mut input: impl BufRead) -> Result<Message, SendError> {
        let mut line = Vec::new();
        input
            .read_until(b'\n', &mut line)
            .map_err(SendError::Input)?;

        // `\n`, `\r\n` and a lone `\r` all end the line.
        if let Some(end) = line.iter().position(|&b| b == b'\r' || b == b'\n') {
            line.truncate(end);
        }

        String::from_utf8(line)
            .map(Message::new)
            .map_err(|e| SendError::Encoding(String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bytes as they go over the line: UTF-8 text plus one terminator.
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.text.len() + 1);
        bytes.extend_from_slice(self.text.as_bytes());
        bytes.push(TERMINATOR);
        bytes
    }
}
