//! Runs the real binary. The config directory is redirected through
//! `XDG_CONFIG_HOME`, which `dirs` only honours on Linux.
#![cfg(target_os = "linux")]

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use write_serial::error::{EXIT_CONNECTION, EXIT_INVALID_MESSAGE};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Sandbox {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("write-serial");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            format!("log_file = {:?}\n", dir.path().join("write-serial.log")),
        )
        .unwrap();
        Sandbox { dir }
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("write-serial.log")
    }

    fn log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    fn run<I, S>(&self, args: I) -> Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(env!("CARGO_BIN_EXE_write-serial"))
            .args(args)
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env("LOGLEVEL", "DEBUG")
            .stdin(Stdio::null())
            .output()
            .unwrap()
    }
}

#[test]
fn extra_arguments_are_a_usage_error() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(["a", "b"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!sandbox.log().contains("Sending message"));
}

#[test]
fn invalid_utf8_argument_exits_before_enumeration() {
    let sandbox = Sandbox::new();

    let output = sandbox.run([OsStr::from_bytes(b"h\xffi")]);

    assert_eq!(output.status.code(), Some(i32::from(EXIT_INVALID_MESSAGE)));
    let log = sandbox.log();
    assert!(log.contains("[ERROR] "), "{log}");
    assert!(log.contains(" - Invalid message: Not valid UTF-8: "), "{log}");
    assert!(!log.contains("Sending message"), "{log}");
    assert!(!log.contains("All available ports"), "{log}");
}

#[test]
fn empty_stdin_goes_on_to_discovery() {
    let sandbox = Sandbox::new();

    let output = sandbox.run::<[&str; 0], _>([]);

    // Whether a board is attached depends on the host; either way the
    // message was accepted and the outcome is logged.
    let log = sandbox.log();
    assert!(log.contains(" - Sending message: \"\""), "{log}");
    match output.status.code() {
        Some(0) => assert!(log.contains(" - OK"), "{log}"),
        Some(code) => {
            assert_eq!(code, i32::from(EXIT_CONNECTION));
            assert!(log.contains(" - ERR: "), "{log}");
            assert!(!log.contains("Invalid message"), "{log}");
        }
        None => panic!("terminated by signal"),
    }
}
