//! Fortune commands available to every member - submitting fortunes - plus
//! the administrator posting commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Submits a fortune for approval.
    ///
    /// Submissions from a server are guild fortunes, submissions from a
    /// direct message are global fortunes.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The fortune to submit"]
        #[rest]
        fortune: String,
    ) -> Result<()> {
        let origin_community = ctx.guild_id().map(|id| id.to_string());
        let author = ctx.author().id.to_string();

        match ctx
            .data()
            .store
            .submit(&fortune, origin_community.as_deref(), &author)
            .await
        {
            Ok(submission) => {
                info!(submission_id = submission.id, %author, "Fortune submitted");
                ctx.say(render::submitted(&submission)).await?;
            }
            Err(e) if e.is_user_facing() => {
                ctx.say(render::warning(&e)).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Posts the next fortune to the fortune channel right away.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn post(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let delivered = data.store.select_next().await?;
        let channel = serenity::ChannelId::new(data.settings.target_channel_id);

        channel
            .say(
                ctx.http(),
                render::delivery(delivered.as_ref(), &data.settings.prefix),
            )
            .await?;
        if !matches!(ctx, poise::Context::Prefix(_)) {
            ctx.say("📬 Fortune posted.").await?;
        }
        Ok(())
    }

    /// Posts arbitrary text to the fortune channel.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn say(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Text to post"]
        #[rest]
        text: String,
    ) -> Result<()> {
        let channel = serenity::ChannelId::new(ctx.data().settings.target_channel_id);
        channel.say(ctx.http(), text).await?;
        if !matches!(ctx, poise::Context::Prefix(_)) {
            ctx.say("📬 Message posted.").await?;
        }
        Ok(())
    }
}

pub use inner::*;
