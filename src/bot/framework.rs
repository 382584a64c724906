//! Poise framework and serenity client wiring.

use crate::{
    bot::{BotData, commands, scheduler},
    config::Settings,
    core::FortuneStore,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let reply = if error.is_user_facing() {
                format!("⚠️ {error}")
            } else {
                "❌ An error occurred while processing that command.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Runs the bot until the gateway connection ends or Ctrl-C is received.
/// The scheduler is stopped before returning so the caller can close the store.
#[instrument(skip(token, settings, store))]
pub async fn run_bot(token: String, settings: Settings, store: Arc<FortuneStore>) -> Result<()> {
    let framework_store = Arc::clone(&store);
    let framework_settings = settings.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(settings.prefix.clone()),
                case_insensitive_commands: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(framework_store, framework_settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = scheduler::spawn(
        Arc::clone(&client.http),
        Arc::clone(&store),
        &settings,
        shutdown_rx,
    )?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down shards");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Starting bot client...");
    let result = client.start().await;

    if shutdown_tx.send(true).is_err() {
        warn!("Scheduler already stopped");
    }
    if let Err(e) = scheduler.await {
        warn!("Scheduler task ended abnormally: {}", e);
    }
    drop(client);

    result.map_err(|e| {
        error!("Client error: {:?}", e);
        Error::from(e)
    })
}
