//! Birthday Core - Headless client logic for the baby birthday screen
//!
//! This crate holds everything the birthday app does that is not pixels:
//! the WebSocket client, the controller a presentation surface observes,
//! and the pure age/theme derivations. It has **zero** dependencies on any
//! UI framework, so it can drive a TUI, a GUI, or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Presentation Surface                   │
//! │        (ratatui TUI, or anything else)                │
//! │   observes: payload + status     emits: intents       │
//! └──────────────────────┬───────────────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────────────┐
//! │                 BirthdayController                    │
//! │   watch state: Option<BirthdayPayload>, Status        │
//! └──────────────────────┬───────────────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────────────┐
//! │                  BirthdayClient                       │
//! │   one connection, handshake, payload/status streams   │
//! └──────────────────────┬───────────────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────────────┐
//! │                    Transport                          │
//! │   WsTransport (tokio-tungstenite) / InProcess (test)  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Session flow
//!
//! The surface collects a `host:port` address and calls
//! [`BirthdayController::connect_to_server`]. The client opens
//! `ws://{address}/nanit`, sends the literal `HappyBirthday` text frame
//! once the transport reports open, and parses every inbound text frame
//! as a [`BirthdayPayload`]. The surface re-derives the theme
//! ([`Theme::from_identifier`]) and age ([`calculate_age`]) per render.
//!
//! # Module Overview
//!
//! - [`age`]: calendar-aware age-in-months-or-years calculation
//! - [`theme`]: the three themes, their palettes, and the fallback rule
//! - [`payload`]: the wire payload and its degrade-gracefully parsing
//! - [`transport`]: the connection abstraction and its implementations
//! - [`client`]: single-connection WebSocket client lifecycle
//! - [`controller`]: observable state between surface and client
//! - [`config`]: timeout/capacity defaults and env overrides

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod age;
pub mod client;
pub mod config;
pub mod controller;
pub mod payload;
pub mod theme;
pub mod transport;

// Re-exports for convenience
pub use age::{age_on, calculate_age, AgeResult};
pub use client::{BirthdayClient, ConnectionStatus, PayloadEvent, HANDSHAKE, SERVER_PATH};
pub use config::ClientConfig;
pub use controller::BirthdayController;
pub use payload::BirthdayPayload;
pub use theme::{Color, Palette, Theme};
pub use transport::{
    InProcessTransport, OutboundFrame, Transport, TransportError, TransportEvent, TransportLink,
    WsTransport,
};
