//! herald-rs library
//!
//! Turns container state changes into notifications: a repository of
//! container snapshots, an event bus, per-object notification strategies
//! gated on and off at runtime, and pluggable exporters.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod exporters;
pub mod logger;
pub mod models;
pub mod render;
pub mod repositories;
pub mod services;
pub mod state;
pub mod strategy;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
