//! Daily fortune delivery.
//!
//! A background task ticks once a minute and posts the next fortune to the
//! configured channel when [`schedule::is_due`] says so. Failures are logged and
//! the loop keeps running; a missed tick only delays the post.

use crate::{
    bot::render,
    config::Settings,
    core::{
        FortuneStore,
        schedule::{self, PostTime},
    },
    entities::fortune,
    errors::{Error, Result},
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, error, info, warn};

const TICK: Duration = Duration::from_secs(60);

/// Spawns the delivery loop. It stops when `shutdown` changes or its sender is dropped.
pub fn spawn(
    http: Arc<serenity::Http>,
    store: Arc<FortuneStore>,
    settings: &Settings,
    shutdown: watch::Receiver<bool>,
) -> Result<JoinHandle<()>> {
    let post_time =
        PostTime::new(settings.post_hour, settings.post_minute).ok_or_else(|| Error::Config {
            message: format!(
                "Invalid post time {:02}:{:02}",
                settings.post_hour, settings.post_minute
            ),
        })?;
    let channel = serenity::ChannelId::new(settings.target_channel_id);
    let prefix = settings.prefix.clone();

    info!(
        channel = %channel,
        time = %post_time.time(),
        "Starting daily fortune scheduler"
    );
    Ok(tokio::spawn(run(
        http, store, channel, post_time, prefix, shutdown,
    )))
}

async fn run(
    http: Arc<serenity::Http>,
    store: Arc<FortuneStore>,
    channel: serenity::ChannelId,
    post_time: PostTime,
    prefix: String,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                info!("Scheduler shutting down");
                break;
            }
        }

        if let Err(e) = tick(&http, &store, channel, post_time, &prefix).await {
            error!("Scheduled delivery failed: {}", e);
        }
    }
}

async fn tick(
    http: &serenity::Http,
    store: &FortuneStore,
    channel: serenity::ChannelId,
    post_time: PostTime,
    prefix: &str,
) -> Result<()> {
    let now = Utc::now().naive_utc();
    let last_delivery = store.last_delivery_date().await?;
    if !schedule::is_due(now, post_time, last_delivery) {
        return Ok(());
    }

    let delivered = store.deliver_scheduled(now.date()).await?;
    match &delivered {
        Some(fortune) => info!(id = fortune.id, "Posting scheduled fortune"),
        None => debug!("Nothing to deliver, posting empty notice"),
    }
    channel
        .say(http, render::delivery(delivered.as_ref(), prefix))
        .await
        .map_err(|e| failed_post(delivered.as_ref(), e))?;
    Ok(())
}

/// A failed send happens after the fortune was already marked used, so name it
/// in the log for `reset` or a manual `post`.
fn failed_post(delivered: Option<&fortune::Model>, err: serenity::Error) -> Error {
    match delivered {
        Some(fortune) => warn!(
            id = fortune.id,
            display_id = fortune.display_id,
            error = %err,
            "Scheduled fortune was marked used but never posted"
        ),
        None => warn!(error = %err, "Failed to post the empty rotation notice"),
    }
    Error::from(err)
}
