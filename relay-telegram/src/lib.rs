//! # relay-telegram
//!
//! Telegram side of the relay: converts teloxide types to core types, implements [`relay_core::Bot`]
//! on top of teloxide, and runs the REPL that hands every inbound message to a [`relay_core::Handler`].

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{build_bot, run_repl, verify_bot};
