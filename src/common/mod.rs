//! # Common Components
//!
//! Shared utilities used by the library service and the `ss-stego` binary.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration loading
//! - [`logging`]: `env_logger` setup

pub mod config;
pub mod logging;
