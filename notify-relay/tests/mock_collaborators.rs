//! In-memory stand-ins for the relay's collaborators: outbound bot, user directory, event subscription.
//!
//! No network or file I/O; every call is recorded so tests can assert on order and counts.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use directory_client::{DirectoryClient, DirectoryError, UserRecord};
use event_channel::{Event, EventSubscription, SubscriptionError};
use relay_core::{Bot, Chat, Message, RelayError, User};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per test process; `RUST_LOG` controls the level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,notify_relay=debug"));

        let _ = fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

/// Records every send as `(chat_id, text)`. Sends to `failing` chats return an error; sends to
/// `panicking` chats panic.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(i64, String)>>,
    failing: Mutex<HashSet<i64>>,
    panicking: Mutex<HashSet<i64>>,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, chat_id: i64) {
        self.failing.lock().unwrap().insert(chat_id);
    }

    pub fn panic_for(&self, chat_id: i64) {
        self.panicking.lock().unwrap().insert(chat_id);
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> relay_core::Result<()> {
        if self.panicking.lock().unwrap().contains(&chat_id) {
            panic!("send to {chat_id} panicked");
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        if self.failing.lock().unwrap().contains(&chat_id) {
            return Err(RelayError::Bot(format!("chat {chat_id} blocked the bot")));
        }
        Ok(())
    }
}

/// Directory backed by a Vec. `exists` looks up by chat id; `create` appends on success.
#[derive(Default)]
pub struct FakeDirectory {
    users: Mutex<Vec<UserRecord>>,
    created: Mutex<Vec<UserRecord>>,
    exists_calls: AtomicUsize,
    list_calls: AtomicUsize,
    fail_exists: AtomicBool,
    create_status: Mutex<Option<u16>>,
    list_failures: AtomicUsize,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(chat_ids: &[i64]) -> Self {
        let directory = Self::new();
        directory
            .users
            .lock()
            .unwrap()
            .extend(chat_ids.iter().map(|&id| record(id)));
        directory
    }

    /// Makes `exists` fail with a decode error.
    pub fn fail_exists(&self) {
        self.fail_exists.store(true, Ordering::SeqCst);
    }

    /// Makes `create` answer with `status` instead of 201.
    pub fn reject_create_with(&self, status: u16) {
        *self.create_status.lock().unwrap() = Some(status);
    }

    /// Makes the next `count` calls to `list_all` fail.
    pub fn fail_next_lists(&self, count: usize) {
        self.list_failures.store(count, Ordering::SeqCst);
    }

    /// Every record passed to `create`, including rejected ones.
    pub fn create_calls(&self) -> Vec<UserRecord> {
        self.created.lock().unwrap().clone()
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

fn decode_error() -> DirectoryError {
    DirectoryError::Decode(serde_json::from_str::<Vec<UserRecord>>("<html>").unwrap_err())
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn exists(&self, chat_id: i64) -> directory_client::Result<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_exists.load(Ordering::SeqCst) {
            return Err(decode_error());
        }
        Ok(self.users.lock().unwrap().iter().any(|u| u.chat_id == chat_id))
    }

    async fn create(&self, user: &UserRecord) -> directory_client::Result<()> {
        self.created.lock().unwrap().push(user.clone());
        if let Some(status) = *self.create_status.lock().unwrap() {
            return Err(DirectoryError::UnexpectedStatus {
                status,
                body: String::new(),
            });
        }
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list_all(&self) -> directory_client::Result<Vec<UserRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.list_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.list_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(decode_error());
        }
        Ok(self.users.lock().unwrap().clone())
    }
}

/// Subscription fed from an unbounded channel. Keep the sender alive while the loop runs.
pub struct ChannelSubscription {
    rx: mpsc::UnboundedReceiver<Result<Event, SubscriptionError>>,
}

pub type EventSender = mpsc::UnboundedSender<Result<Event, SubscriptionError>>;

pub fn channel_subscription() -> (EventSender, ChannelSubscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, ChannelSubscription { rx })
}

pub fn publish(tx: &EventSender, payload: &str) {
    tx.send(Ok(Event::new("send_message", payload))).unwrap();
}

#[async_trait]
impl EventSubscription for ChannelSubscription {
    async fn recv(&mut self) -> event_channel::Result<Event> {
        self.rx.recv().await.unwrap_or(Err(SubscriptionError::Closed))
    }
}

pub fn record(chat_id: i64) -> UserRecord {
    UserRecord {
        chat_id,
        telegram_id: chat_id * 10,
        first_name: Some(format!("User{chat_id}")),
        last_name: None,
        language_code: Some("en".to_string()),
        username: None,
    }
}

/// Inbound message from sender 777 in chat `chat_id`.
pub fn make_message(chat_id: i64, content: &str) -> Message {
    Message {
        id: "msg_1".to_string(),
        user: User {
            id: 777,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: Some("Liddell".to_string()),
            language_code: Some("en".to_string()),
        },
        chat: Chat { id: chat_id },
        content: content.to_string(),
    }
}
