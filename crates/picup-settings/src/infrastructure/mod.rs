//! Infrastructure layer for the picture-uploads settings.
//!
//! Contains the file-system adapters (config file, preferences file, job
//! files) and the command bridge the `picup` binary talks to.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `picup_core`, but MUST NOT be imported by the `application` layer.

pub mod scheduler;
pub mod settings_bridge;
pub mod storage;
