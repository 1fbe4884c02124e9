// src/config/mod.rs

//! Configuration loading and validation for procsync.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: reading a config file from disk, or falling back to
//!   defaults.
//! - `validate.rs`: turning a `RawConfigFile` into a `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, RawConfigFile, RedirectSection, WorkerSection};
