//! Layered load configuration: built-in defaults, an optional TOML file,
//! `--set` overrides, and finally explicit command-line flags.

mod builder;
mod defaults;
mod file;

pub use builder::build_load_config;
