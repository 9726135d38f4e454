use crate::error::SendError;
use crate::message::Message;
use crate::port::{connect, find_port, PortBackend};
use log::info;
use std::io::Write;

fn transmit(serial_port: &mut dyn Write, buf: &[u8]) -> std::io::Result<()> {
    serial_port.write_all(buf)?;
    serial_port.flush()?;
    Ok(())
}

/// Writes the message and its terminator to an already open port.
///
/// # Errors
///
/// Will return `Err` if the write or the flush fails.
pub fn write_message(
    serial_port: &mut dyn Write,
    port_name: &str,
    message: &Message,
) -> Result<(), SendError> {
    transmit(serial_port, &message.to_wire()).map_err(|source| SendError::Write {
        port: port_name.to_string(),
        source,
    })
}

/// Finds the first matching port, opens it and sends `message` once.
///
/// # Errors
///
/// Will return `Err` if no port matches, it cannot be opened or the write
/// fails. Nothing is retried.
pub fn send(
    backend: &impl PortBackend,
    message: &Message,
    baud_rate: u32,
) -> Result<(), SendError> {
    info!("Sending message: {:?}", message.text());

    let port_name = find_port(backend)?;
    let mut serial_port = connect(backend, &port_name, baud_rate)?;
    write_message(serial_port.as_mut(), &port_name, message)?;

    info!("OK");
    Ok(())
}
