//! Handlers: registration on first contact.

mod registration;

pub use registration::{
    is_start_command, RegistrationHandler, RegistrationOutcome, CREATE_FAILED_TEXT,
    LOOKUP_FAILED_TEXT, WELCOME_TEXT,
};
