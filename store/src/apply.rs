//! Mutation handlers.

use std::collections::HashSet;
use std::time::Duration;

use lesspass_types::{PasswordId, PasswordPatch, PasswordProfile, PasswordVersion};

use crate::{Clock, Mutation, State};

/// Window in which `LOAD_PASSWORD_FIRST_TIME` keeps the last active password.
pub const REUSE_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Apply `mutation` to `state` in place.
pub fn apply<C: Clock + ?Sized>(state: &mut State, mutation: Mutation, clock: &C) {
    match mutation {
        Mutation::Logout => state.authenticated = false,
        Mutation::Login => state.authenticated = true,
        Mutation::SetPassword { password } => set_password(state, password, clock),
        Mutation::SetDefaultPassword { password } => set_default_password(state, &password),
        Mutation::SetPasswords { passwords } => set_passwords(state, passwords),
        Mutation::DeletePassword { id } => delete_password(state, &id),
        Mutation::SetBaseUrl { base_url } => state.base_url = base_url,
        Mutation::SetVersion { version } => set_version(state, version),
        Mutation::LoadPasswordFirstTime => load_password_first_time(state, clock),
    }
}

fn set_password<C: Clock + ?Sized>(state: &mut State, password: PasswordProfile, clock: &C) {
    state.password = Some(password);
    state.last_use = Some(clock.now());
}

fn set_default_password(state: &mut State, patch: &PasswordPatch) {
    state.default_password.merge(patch);
}

fn set_passwords(state: &mut State, passwords: Vec<PasswordProfile>) {
    let mut seen = HashSet::new();
    for id in passwords.iter().filter_map(|profile| profile.id.as_ref()) {
        if !seen.insert(id) {
            tracing::warn!(%id, "SET_PASSWORDS received duplicate password id");
        }
    }
    state.passwords = passwords;
}

fn delete_password(state: &mut State, id: &PasswordId) {
    match state.passwords.iter().position(|profile| profile.has_id(id)) {
        Some(index) => {
            state.passwords.remove(index);
        }
        None => tracing::debug!(%id, "DELETE_PASSWORD: no saved password with this id"),
    }

    if state
        .password
        .as_ref()
        .is_some_and(|active| active.has_id(id))
    {
        state.password = Some(state.default_password.clone());
    }
}

fn set_version(state: &mut State, version: PasswordVersion) {
    match state.password.as_mut() {
        Some(active) => active.version = version,
        None => {
            state.password = Some(PasswordProfile {
                version,
                ..state.default_password.clone()
            });
        }
    }
}

fn load_password_first_time<C: Clock + ?Sized>(state: &mut State, clock: &C) {
    let fresh = state
        .last_use
        .is_some_and(|last_use| clock.now().elapsed_since(last_use) <= REUSE_WINDOW);
    if !fresh {
        state.password = Some(state.default_password.clone());
    }
}
