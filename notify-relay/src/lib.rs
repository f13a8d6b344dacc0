//! # Notification relay
//!
//! Registers Telegram users in the external user directory on `/start`, and forwards every event
//! published on the configured pub/sub channel to all registered users. Config comes from env; the
//! binary runs the Telegram REPL and the fan-out loop side by side.

pub mod cli;
pub mod components;
pub mod config;
pub mod fanout;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_relay_components, RelayComponents};
pub use config::RelayConfig;
pub use fanout::{fan_out, CycleOutcome, FanoutLoop};
pub use handlers::{
    is_start_command, RegistrationHandler, RegistrationOutcome, CREATE_FAILED_TEXT,
    LOOKUP_FAILED_TEXT, WELCOME_TEXT,
};
pub use runner::run_relay;
