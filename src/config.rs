//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to seed the playback
//! engine, the library scanner and logging, plus helpers to load it from disk
//! and the environment.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
