//! Component factory: builds the shared collaborators from config. Isolates assembly from the runner.

use directory_client::{DirectoryClient, HttpDirectoryClient};
use relay_core::Bot;
use relay_telegram::TelegramBotAdapter;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::RelayConfig;
use crate::handlers::RegistrationHandler;

/// Collaborators shared by the registration flow and the fan-out loop. Built once at startup.
#[derive(Clone)]
pub struct RelayComponents {
    pub directory: Arc<dyn DirectoryClient>,
    pub bot: Arc<dyn Bot>,
    pub teloxide_bot: teloxide::Bot,
    pub registration: Arc<RegistrationHandler>,
}

/// Builds the directory client, the outbound bot and the registration handler.
#[instrument(skip(config, teloxide_bot))]
pub fn build_relay_components(
    config: &RelayConfig,
    teloxide_bot: teloxide::Bot,
    bot_username: Option<String>,
) -> RelayComponents {
    let http_directory = HttpDirectoryClient::new(config.directory_url.as_str());
    info!(directory_url = %http_directory.base_url(), "step: directory client ready");
    let directory: Arc<dyn DirectoryClient> = Arc::new(http_directory);
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let registration = Arc::new(RegistrationHandler::new(
        directory.clone(),
        bot.clone(),
        bot_username,
    ));

    info!("Relay components built");

    RelayComponents {
        directory,
        bot,
        teloxide_bot,
        registration,
    }
}
