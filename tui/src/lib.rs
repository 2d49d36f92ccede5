//! Birthday TUI - Terminal surface for the baby birthday screen
//!
//! A thin display client over `birthday-core`: it renders the
//! connection-entry screen until a payload arrives, then the themed
//! birthday screen, and converts key presses into connect/disconnect
//! intents. All business logic lives in the core crate.

pub mod app;
pub mod net;
pub mod theme;
pub mod ui;

pub use app::App;
