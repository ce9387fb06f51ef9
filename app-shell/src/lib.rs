//! Dashboard application layer: state, user intents, display formatting,
//! the glossary, the font preference and configuration. Nothing here touches
//! the DOM except the small wasm-only helpers in [`prefs`].

pub mod config;
pub mod controller;
pub mod format;
pub mod glossary;
pub mod prefs;
pub mod state;

pub use config::{ConfigError, DashboardConfig};
pub use controller::{Controller, StateCell, StateFeed};
pub use glossary::{GlossaryEntry, GLOSSARY};
pub use state::DashboardState;
