use clap::Parser;
use log::{error, warn};
use std::ffi::OsString;
use std::process::ExitCode;
use write_serial::logging::{self, LogSettings};
use write_serial::{send, Config, Message, SystemPorts};

/// Send a null-terminated message to the first COM/ttyACM serial device.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Message to send; read as one line from stdin when omitted
    message: Option<OsString>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = LogSettings::from_config(&config);
    match logging::init(&settings) {
        Ok(Some(e)) => warn!("{e}, logging to stderr"),
        Ok(None) => {}
        Err(e) => eprintln!("{e}"),
    }
    if let Some(name) = &settings.unknown_level {
        warn!("Unknown log level {name:?}, using INFO");
    }

    let message = match Message::acquire(cli.message, std::io::stdin().lock()) {
        Ok(message) => message,
        Err(e) => {
            error!("Invalid message: {e}");
            return e.exit_code();
        }
    };

    let backend = SystemPorts::new(config.write_timeout());
    match send(&backend, &message, config.baud_rate) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("ERR: {e}");
            e.exit_code()
        }
    }
}
