//! Storage infrastructure: configuration and preference persistence.
//!
//! - `config` reads and writes the application config file and resolves
//!   where the other files live.
//! - `preferences` is the TOML-file implementation of
//!   [`PreferencesStore`](picup_core::PreferencesStore).

pub mod config;
pub mod preferences;
