//! Core types: sender identity, chat, inbound message, directory record, handler response, and the
//! Handler trait.

mod chat;
mod handler;
mod message;
mod record;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::Message;
pub use record::UserRecord;
pub use response::HandlerResponse;
pub use user::User;
