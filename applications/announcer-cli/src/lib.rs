//! Announcer Studio CLI Library
//!
//! Settings handling and command implementations behind the `announcer-cli`
//! binary. Exposed as a library so the commands can be tested directly.

pub mod commands;
pub mod settings;

pub use settings::{Settings, DEFAULT_SETTINGS_FILE};
