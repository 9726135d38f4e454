//! Sends one null-terminated message to the first serial device that looks
//! like our board (`COMn` or `/dev/ttyACMn`).

pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod port;
pub mod sender;

pub use config::Config;
pub use error::SendError;
pub use message::Message;
pub use port::{PortBackend, SystemPorts, SERIAL_BAUD_RATE};
pub use sender::send;
