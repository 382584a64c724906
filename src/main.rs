use dotenvy::dotenv;
use fortune_bot::{
    bot,
    config::{database, preloaded, settings},
    core::FortuneStore,
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;
    info!("Settings loaded.");

    // 4. Open the store
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    let store = Arc::new(FortuneStore::new(db));

    // 5. Import preloaded fortunes; already-present rows are skipped
    let entries = preloaded::load_preloaded(&settings.preloaded_path)
        .inspect_err(|e| error!("Failed to load preloaded fortunes: {}", e))?;
    store.import_preloaded(&entries).await?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;
    let bot_result = bot::run_bot(token, settings, Arc::clone(&store)).await;

    // 7. Close the store once nothing else holds it
    match Arc::try_unwrap(store) {
        Ok(store) => {
            store.close().await?;
            info!("Database closed.");
        }
        Err(_) => warn!("Store still shared at shutdown, leaving connection to drop"),
    }

    bot_result
}
