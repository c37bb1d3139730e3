//! dwm-statusbar: a three-bar status line generator for dwm.
//!
//! The segment engine lives in `statusbar-core` and the probes in
//! `statusbar-sources`. This crate loads the configuration, drives the poll
//! cycle and publishes the bars.

pub mod config;
pub mod runtime;
pub mod sinks;

pub use statusbar_core as engine;
pub use statusbar_sources as sources;
pub use statusbar_types as types;
