//! Configuration loaded from `.keysafe.toml`.

pub mod settings;

pub use settings::{Backend, Settings};
