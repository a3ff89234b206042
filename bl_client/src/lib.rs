//! Internal modules for the bridge lobby client.
//!
//! This library provides command parsing, configuration, rendering and
//! command execution used by the bl_client binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod view;
