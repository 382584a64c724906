//! Bot layer - Discord-specific interface
//!
//! Commands, the daily scheduler, message rendering and the shared context
//! handed to every command invocation.

/// Discord command implementations (general, fortune, moderation)
pub mod commands;
/// Poise/serenity client wiring and error hook
pub mod framework;
/// Message formatting
pub mod render;
/// Daily delivery task
pub mod scheduler;

use crate::{config::Settings, core::FortuneStore};
use std::sync::Arc;

/// Shared data available to all bot commands.
pub struct BotData {
    /// The fortune store shared with the scheduler
    pub store: Arc<FortuneStore>,
    /// Bot settings
    pub settings: Settings,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(store: Arc<FortuneStore>, settings: Settings) -> Self {
        Self { store, settings }
    }
}

pub use framework::run_bot;
