//! Discord command implementations organized by audience.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Submission and posting commands
pub mod fortune;

/// General utility commands
pub mod general;

/// Moderation commands
pub mod moderation;

use crate::{bot::BotData, errors::Error};

/// Every command registered with the framework.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        general::ping(),
        general::help(),
        fortune::add(),
        fortune::post(),
        fortune::say(),
        moderation::approve(),
        moderation::reject(),
        moderation::remove(),
        moderation::reset(),
        moderation::list(),
        moderation::pending(),
        moderation::export(),
    ]
}
