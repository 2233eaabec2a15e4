//! order-recorder library crate.
//!
//! Exposes the kiosk's components for the binary and integration tests.

pub mod app;
pub mod ascii;
pub mod camera;
pub mod cli;
pub mod config;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod preview;
pub mod session;
pub mod sink;
pub mod terminal;
