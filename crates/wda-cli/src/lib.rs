//! wda-lifecycle: Command-line interface for the WebDriverAgent lifecycle
//! manager
//!
//! Resolves agent endpoints from session configuration and runs the cache
//! validity check against a live agent without touching the device.

pub mod commands;
pub mod output;
