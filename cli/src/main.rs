//! LessPass CLI - commit named mutations against the persisted client state.
//!
//! ```text
//! lesspass <MUTATION> [PAYLOAD_JSON]   commit and save, then print the state
//! lesspass show                        print the state
//! lesspass help                        list mutation names
//! ```
//!
//! State lives in `$LESSPASS_HOME/state.json` (default `~/.lesspass`), and
//! a fresh state is seeded from `config.toml` in the same directory.

use std::{
    env, fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lesspass_config::{home_dir, load_resolved};
use lesspass_store::{
    Mutation, MutationKind, PersistError, State, StateSnapshot, Store, load_state, save_state,
};

/// Diagnostics go to stderr so stdout stays a single JSON document.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .with(env_filter)
        .init();
}

#[derive(Debug, PartialEq)]
enum Command {
    Show,
    Help,
    Commit {
        name: String,
        payload: Option<Value>,
    },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Command::Help),
            [cmd] if cmd == "help" || cmd == "--help" || cmd == "-h" => Ok(Command::Help),
            [cmd] if cmd == "show" => Ok(Command::Show),
            [name] => Ok(Command::Commit {
                name: name.clone(),
                payload: None,
            }),
            [name, payload] => {
                let payload: Value = serde_json::from_str(payload)
                    .with_context(|| format!("payload for {name} is not valid JSON"))?;
                Ok(Command::Commit {
                    name: name.clone(),
                    payload: Some(payload),
                })
            }
            _ => bail!("expected `lesspass <MUTATION> [PAYLOAD_JSON]`; run `lesspass help`"),
        }
    }
}

fn help_text() -> String {
    let names: Vec<&str> = MutationKind::ALL.iter().map(|kind| kind.as_str()).collect();
    format!(
        "usage: lesspass <MUTATION> [PAYLOAD_JSON] | show | help\nmutations: {}",
        names.join(", ")
    )
}

/// Where an unreadable snapshot is moved so the next commit can start fresh.
fn quarantine_path(state_path: &Path) -> PathBuf {
    state_path.with_extension("json.corrupt")
}

fn load_or_init_state(home: &Path) -> Result<State> {
    let state_path = home.join(StateSnapshot::FILENAME);
    match load_state(&state_path) {
        Ok(Some(state)) => return Ok(state),
        Ok(None) => {}
        Err(PersistError::Json { source, .. }) => {
            let quarantine = quarantine_path(&state_path);
            tracing::warn!(
                path = %state_path.display(),
                error = %source,
                moved_to = %quarantine.display(),
                "Discarding unreadable state snapshot"
            );
            if let Err(e) = fs::rename(&state_path, &quarantine) {
                tracing::warn!(path = %state_path.display(), "Failed to move snapshot aside: {e}");
            }
        }
        Err(err) => return Err(err.into()),
    }

    let config = load_resolved()?;
    tracing::info!(base_url = config.base_url(), "Starting from a fresh state");
    Ok(State::from_config(&config))
}

fn run(args: &[String]) -> Result<()> {
    let command = Command::parse(args)?;
    if command == Command::Help {
        println!("{}", help_text());
        return Ok(());
    }

    let home = home_dir().context("could not determine the LessPass home directory")?;
    let state = load_or_init_state(&home)?;

    let state = match command {
        Command::Commit { name, payload } => {
            let mutation = Mutation::from_named(&name, payload)?;
            let mut store = Store::new(state);
            store.commit(mutation);
            let state = store.into_state();
            save_state(&home.join(StateSnapshot::FILENAME), &state)?;
            state
        }
        Command::Show | Command::Help => state,
    };

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
