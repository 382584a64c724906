//! Moderation commands - approving and rejecting submissions, removing guild
//! fortunes, listing, resetting and exporting. All require ADMINISTRATOR.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render},
        core::export as export_ops,
        errors::{Error, Result},
    };
    use tracing::info;

    /// Approves a pending submission so it joins the rotation.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn approve(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Submission id (see pending)"] id: i64,
    ) -> Result<()> {
        let approver = ctx.author().id.to_string();
        match ctx.data().store.approve(id, &approver).await {
            Ok(fortune) => {
                info!(submission_id = id, fortune_id = fortune.id, %approver, "Submission approved");
                ctx.say(render::approved(id, &fortune)).await?;
            }
            Err(e) if e.is_user_facing() => {
                ctx.say(render::warning(&e)).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Rejects a pending submission.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn reject(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Submission id (see pending)"] id: i64,
    ) -> Result<()> {
        let moderator = ctx.author().id.to_string();
        if ctx.data().store.reject(id, &moderator).await? {
            ctx.say(format!("❌ Rejected submission #{id}")).await?;
        } else {
            ctx.say(render::warning(&Error::SubmissionNotFound { id }))
                .await?;
        }
        Ok(())
    }

    /// Deletes a guild fortune. Preloaded and global fortunes cannot be removed.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Fortune id (see list)"] id: i64,
    ) -> Result<()> {
        if ctx.data().store.remove(id).await? {
            ctx.say(format!("🗑️ Removed fortune #{id}")).await?;
        } else {
            ctx.say(format!("⚠️ Fortune #{id} not found or is not a guild fortune"))
                .await?;
        }
        Ok(())
    }

    /// Marks every fortune unused and restarts the rotation.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn reset(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().store.reset().await?;
        ctx.say("🔄 All fortunes have been reset and will be reused!")
            .await?;
        Ok(())
    }

    /// Lists every fortune with its id.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let fortunes = ctx.data().store.list().await?;
        for message in render::fortune_list(&fortunes) {
            ctx.say(message).await?;
        }
        Ok(())
    }

    /// Lists submissions awaiting approval.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn pending(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let pending = ctx.data().store.pending().await?;
        for message in render::pending_list(&pending) {
            ctx.say(message).await?;
        }
        Ok(())
    }

    /// Writes all fortunes and submissions to the export file.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn export(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let dump = data.store.export().await?;
        if dump.fortunes.is_empty() && dump.submissions.is_empty() {
            ctx.say("No fortunes to export!").await?;
            return Ok(());
        }

        let json = export_ops::to_json(&dump)?;
        tokio::fs::write(&data.settings.export_path, json).await?;
        info!(path = ?data.settings.export_path, "Fortunes exported");
        ctx.say(format!(
            "💾 Exported {} fortunes and {} submissions ({} pending) to `{}`",
            dump.fortunes.len(),
            dump.submissions.len(),
            dump.pending_count(),
            data.settings.export_path.display()
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
