//! # relay-core
//!
//! Core types and traits for the notification relay: [`Bot`], [`Handler`], interaction and
//! directory record types, and tracing initialization. Transport-agnostic; used by
//! relay-telegram, directory-client and notify-relay.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User, UserRecord,
};
