use crate::error::SendError;
use core::time::Duration;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;

/// Canonical line speed of the receiving firmware.
pub const SERIAL_BAUD_RATE: u32 = 115_200;

static PORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:COM\d+|/dev/ttyACM\d+)").expect("Invalid port pattern"));

/// Access to the host's serial ports.
pub trait PortBackend {
    /// Names of all ports currently known to the host, in enumeration order.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the host cannot enumerate its ports.
    fn port_names(&self) -> serialport::Result<Vec<String>>;

    /// # Errors
    ///
    /// Will return `Err` if the port cannot be opened.
    fn open(&self, port_name: &str, baud_rate: u32) -> serialport::Result<Box<dyn Write + Send>>;
}

/// Ports as reported by the operating system.
pub struct SystemPorts {
    timeout: Duration,
}

impl SystemPorts {
    /// `timeout` bounds a single blocking write; opening is not bounded.
    #[must_use]
    pub fn new(timeout: Duration) -> SystemPorts {
        SystemPorts { timeout }
    }
}

impl PortBackend for SystemPorts {
    fn port_names(&self) -> serialport::Result<Vec<String>> {
        Ok(serialport::available_ports()?
            .into_iter()
            .map(|p| p.port_name)
            .collect())
    }

    fn open(&self, port_name: &str, baud_rate: u32) -> serialport::Result<Box<dyn Write + Send>> {
        let serial_port = serialport::new(port_name, baud_rate)
            .timeout(self.timeout)
            .open()?;
        Ok(Box::new(serial_port))
    }
}

#[must_use]
pub fn is_candidate(port_name: &str) -> bool {
    PORT_PATTERN.is_match(port_name)
}

/// Keeps the ports that look like a device we can talk to, preserving order.
pub fn matching_ports<S: AsRef<str>>(ports: &[S]) -> Vec<&str> {
    ports
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| is_candidate(p))
        .collect()
}

/// # Errors
///
/// Will return `Err` if enumeration fails or no port matches.
pub fn find_port(backend: &impl PortBackend) -> Result<String, SendError> {
    let ports = backend.port_names().map_err(SendError::Enumeration)?;
    let matching = matching_ports(&ports);
    debug!("All available ports: {ports:?}");
    debug!("Matching ports: {matching:?}");

    matching
        .first()
        .map(|p| (*p).to_string())
        .ok_or(SendError::NoDevice)
}

/// # Errors
///
/// Will return `Err` if the port cannot be opened.
pub fn connect(
    backend: &impl PortBackend,
    port_name: &str,
    baud_rate: u32,
) -> Result<Box<dyn Write + Send>, SendError> {
    let serial_port = backend
        .open(port_name, baud_rate)
        .map_err(|source| SendError::Connection {
            port: port_name.to_string(),
            source,
        })?;
    info!("Connected to serial device on {port_name} at {baud_rate} baud");
    Ok(serial_port)
}
