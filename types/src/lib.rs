//! Core domain types for LessPass.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod ids;
mod password;
mod time;

pub use ids::PasswordId;
pub use password::{PasswordPatch, PasswordProfile, PasswordVersion, UnknownVersionError};
pub use time::Timestamp;
