//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use lesspass_store::{FixedClock, State, Store};
use lesspass_types::{PasswordId, PasswordProfile, PasswordVersion};

/// 2017-02-01T22:47:16Z, the instant the clock-dependent tests freeze at.
pub const NOW: i64 = 1_485_989_236_000;

/// Store over a fresh state with the clock frozen at [`NOW`].
pub fn frozen_store() -> Store<FixedClock> {
    Store::with_clock(State::default(), FixedClock::from_millis(NOW))
}

/// Stock default template as the web client ships it.
pub fn stock_template() -> PasswordProfile {
    PasswordProfile {
        site: String::new(),
        login: String::new(),
        uppercase: true,
        lowercase: true,
        numbers: true,
        symbols: true,
        length: 16,
        counter: 1,
        version: PasswordVersion::V2,
        id: None,
    }
}

pub fn saved(id: &str, site: &str, length: u8) -> PasswordProfile {
    PasswordProfile {
        id: Some(PasswordId::new(id)),
        site: site.to_owned(),
        length,
        ..PasswordProfile::default()
    }
}

/// Run the `lesspass` binary with its home directory pointed at `home`.
pub fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lesspass"))
        .args(args)
        .env("LESSPASS_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn lesspass")
}

pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "lesspass failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
