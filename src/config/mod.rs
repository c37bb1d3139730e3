//! Configuration loading and validation

mod settings;

pub use settings::{config_path, expand_home, finalize, load, load_from_path, validate};
