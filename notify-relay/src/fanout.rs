//! Event fan-out loop: every event received on the subscription is sent to every registered user.
//!
//! Events are processed one at a time. A directory failure drops the event (no partial delivery);
//! a failed send to one recipient does not stop the others. Nothing is retried.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use directory_client::DirectoryClient;
use event_channel::{Event, EventSubscription, SubscriptionError};
use futures::FutureExt;
use relay_core::Bot;
use tracing::{debug, error, info, instrument, warn};

/// What happened to one received event (or receive attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every recipient got one send attempt; `failed` of them returned an error.
    Delivered { recipients: usize, failed: usize },
    /// The recipient list could not be fetched; the event was dropped.
    DirectoryUnavailable,
    /// Receiving from the subscription failed.
    SubscriptionFailed,
    /// Processing the event panicked; the loop carries on.
    Panicked,
}

/// Sends `event`'s payload to every user returned by the directory, in directory order.
#[instrument(skip(directory, bot, event), fields(channel = %event.channel))]
pub async fn fan_out(directory: &dyn DirectoryClient, bot: &dyn Bot, event: &Event) -> CycleOutcome {
    let users = match directory.list_all().await {
        Ok(users) => users,
        Err(e) => {
            error!(error = %e, "Error fetching users, dropping event");
            return CycleOutcome::DirectoryUnavailable;
        }
    };

    let mut failed = 0;
    for user in &users {
        if let Err(e) = bot.send_message(user.chat_id, &event.payload).await {
            failed += 1;
            warn!(error = %e, chat_id = user.chat_id, "Delivery failed");
        }
    }

    info!(recipients = users.len(), failed, "step: event fanned out");
    CycleOutcome::Delivered {
        recipients: users.len(),
        failed,
    }
}

/// Long-running consumer of one subscription.
pub struct FanoutLoop<S> {
    subscription: S,
    directory: Arc<dyn DirectoryClient>,
    bot: Arc<dyn Bot>,
}

impl<S: EventSubscription> FanoutLoop<S> {
    pub fn new(subscription: S, directory: Arc<dyn DirectoryClient>, bot: Arc<dyn Bot>) -> Self {
        Self {
            subscription,
            directory,
            bot,
        }
    }

    /// Runs until `shutdown` resolves. Shutdown is only observed between events.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("Fan-out loop started");

        loop {
            let received = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                received = self.subscription.recv() => received,
            };
            let outcome = process(self.directory.as_ref(), self.bot.as_ref(), received).await;
            debug!(outcome = ?outcome, "step: fan-out cycle done");
        }

        info!("Fan-out loop stopped");
    }

    /// Waits for the next event and fans it out.
    pub async fn process_next(&mut self) -> CycleOutcome {
        let received = self.subscription.recv().await;
        process(self.directory.as_ref(), self.bot.as_ref(), received).await
    }
}

/// One cycle: report a receive error, or fan the event out with panics contained to this event.
async fn process(
    directory: &dyn DirectoryClient,
    bot: &dyn Bot,
    received: Result<Event, SubscriptionError>,
) -> CycleOutcome {
    let event = match received {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "Event subscription error");
            return CycleOutcome::SubscriptionFailed;
        }
    };

    match AssertUnwindSafe(fan_out(directory, bot, &event))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            error!(channel = %event.channel, "Fan-out panicked, event dropped");
            CycleOutcome::Panicked
        }
    }
}
